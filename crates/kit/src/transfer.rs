//! The dual-asset transfer sequence.

use crate::Result;
use alloy_primitives::{Address, TxHash, U256};

/// A token that can move `amount` base units to `to`.
///
/// The seam exists so the dual-asset sequence below can be exercised without
/// a network.
pub trait TokenTransfer {
    /// Submits the transfer, waits for its receipt, and returns the
    /// transaction hash.
    fn transfer(&self, to: Address, amount: U256) -> impl Future<Output = Result<TxHash>>;
}

/// Sends `amount` of CELO through the gold token contract, then `amount` of
/// cUSD through the stable token contract.
///
/// The two legs are independent transactions, submitted strictly in order
/// and fail-fast: an error on the CELO leg means the cUSD leg is never
/// issued, and a failed cUSD leg is not compensated.
pub async fn send_celo_and_cusd(
    gold: &impl TokenTransfer,
    stable: &impl TokenTransfer,
    to: Address,
    amount: U256,
) -> Result<(TxHash, TxHash)> {
    let celo_hash = gold.transfer(to, amount).await?;
    let cusd_hash = stable.transfer(to, amount).await?;
    Ok((celo_hash, cusd_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MockToken<'a> {
        calls: &'a Cell<u32>,
        fail: bool,
    }

    impl TokenTransfer for MockToken<'_> {
        async fn transfer(&self, _to: Address, _amount: U256) -> Result<TxHash> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(alloy_signer::Error::other("transfer rejected").into());
            }
            Ok(TxHash::with_last_byte(self.calls.get() as u8))
        }
    }

    #[tokio::test]
    async fn failed_first_leg_suppresses_the_second() {
        let gold_calls = Cell::new(0);
        let stable_calls = Cell::new(0);
        let gold = MockToken { calls: &gold_calls, fail: true };
        let stable = MockToken { calls: &stable_calls, fail: false };

        let result = send_celo_and_cusd(&gold, &stable, Address::ZERO, U256::from(1u64)).await;

        assert!(result.is_err());
        assert_eq!(gold_calls.get(), 1);
        assert_eq!(stable_calls.get(), 0);
    }

    #[tokio::test]
    async fn both_legs_run_in_order_on_success() {
        let gold_calls = Cell::new(0);
        let stable_calls = Cell::new(0);
        let gold = MockToken { calls: &gold_calls, fail: false };
        let stable = MockToken { calls: &stable_calls, fail: false };

        let (celo_hash, cusd_hash) =
            send_celo_and_cusd(&gold, &stable, Address::ZERO, U256::from(1u64)).await.unwrap();

        assert_eq!(gold_calls.get(), 1);
        assert_eq!(stable_calls.get(), 1);
        assert_ne!(celo_hash, TxHash::ZERO);
        assert_ne!(cusd_hash, TxHash::ZERO);
    }
}
