//! Blockscout explorer links.

use alloy_primitives::TxHash;

/// Base URL of the Alfajores Blockscout instance.
pub const ALFAJORES_EXPLORER: &str = "https://alfajores-blockscout.celo-testnet.org";

/// Human-readable link for a submitted transaction.
pub fn tx_url(base: &str, hash: TxHash) -> String {
    format!("{}/tx/{hash}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn links_point_at_the_tx_page() {
        let hash = b256!("0x6b175474e89094c44da98b954eedeac495271d0f6b175474e89094c44da98b95");
        assert_eq!(
            tx_url(ALFAJORES_EXPLORER, hash),
            format!("https://alfajores-blockscout.celo-testnet.org/tx/{hash}")
        );
        // trailing slashes do not double up
        assert_eq!(tx_url("https://example.org/", hash), format!("https://example.org/tx/{hash}"));
    }
}
