//! The client handle bundling provider, account and chain id.

use crate::{Result, erc20::TokenContract};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

/// Gas limit used by the walkthrough transfers. Surplus gas is returned to
/// the sender.
pub const TRANSFER_GAS_LIMIT: u64 = 200_000;

/// A thin client handle: an RPC provider, the signing account, and the chain
/// id reported by the node.
///
/// Callers hold the kit explicitly and pass it into handlers; nothing here
/// is ambient state.
#[derive(Debug, Clone)]
pub struct Kit<P> {
    provider: P,
    signer: PrivateKeySigner,
    chain_id: u64,
}

/// Connects to `rpc_url` and binds `signer` as the active account.
///
/// The chain id is read from the node once at construction.
pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Kit<impl Provider>> {
    let wallet = EthereumWallet::from(signer.clone());
    let provider = ProviderBuilder::new().wallet(wallet).connect(rpc_url).await?;
    let chain_id = provider.get_chain_id().await?;
    info!(chain_id, account = %signer.address(), "connected");
    Ok(Kit { provider, signer, chain_id })
}

impl<P: Provider> Kit<P> {
    /// The active sender.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The signing key behind the active sender.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Chain id reported by the node at connect time.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Handle on the ERC-20 token deployed at `address`.
    pub const fn token(&self, address: Address) -> TokenContract<'_, P> {
        TokenContract::new(self, address)
    }

    /// Native CELO balance of `who`, in wei.
    pub async fn native_balance(&self, who: Address) -> Result<U256> {
        Ok(self.provider.get_balance(who).await?)
    }

    /// Sends `value` wei of CELO to `to` and blocks until the receipt is
    /// available.
    ///
    /// The sender's current transaction count is fetched and used as the
    /// nonce; submission errors propagate without retry.
    pub async fn send_celo(&self, to: Address, value: U256) -> Result<TransactionReceipt> {
        let nonce = self.provider.get_transaction_count(self.address()).await?;
        let request = build_celo_transfer(self.address(), to, value, nonce, self.chain_id);
        info!(%to, %value, nonce, "sending CELO");
        let pending = self.provider.send_transaction(request).await?;
        Ok(pending.get_receipt().await?)
    }
}

/// Builds a native-transfer request carrying exactly the given nonce.
///
/// Kept pure so nonce handling is checkable without a network.
pub fn build_celo_transfer(
    from: Address,
    to: Address,
    value: U256,
    nonce: u64,
    chain_id: u64,
) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(from)
        .with_to(to)
        .with_value(value)
        .with_nonce(nonce)
        .with_chain_id(chain_id)
        .with_gas_limit(TRANSFER_GAS_LIMIT)
}
