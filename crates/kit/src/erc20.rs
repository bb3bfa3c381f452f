//! ERC-20 token contract handles.

use crate::{Kit, Result, kit::TRANSFER_GAS_LIMIT, transfer::TokenTransfer};
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, TxKind, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::{SolCall, sol};
use celo_tx::{CeloTxLegacy, sign_celo_legacy};
use tracing::info;

sol! {
    interface IErc20 {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Handle on a deployed ERC-20 token, bound to a [`Kit`].
#[derive(Debug)]
pub struct TokenContract<'k, P> {
    kit: &'k Kit<P>,
    address: Address,
    fee_currency: Option<Address>,
}

impl<'k, P: Provider> TokenContract<'k, P> {
    pub(crate) const fn new(kit: &'k Kit<P>, address: Address) -> Self {
        Self { kit, address, fee_currency: None }
    }

    /// Pays the gas for transfers in `fee_currency` instead of CELO.
    ///
    /// Such transfers are signed locally as Celo legacy transactions and
    /// submitted raw, since the fee currency rides in the transaction
    /// itself.
    pub const fn with_fee_currency(mut self, fee_currency: Address) -> Self {
        self.fee_currency = Some(fee_currency);
        self
    }

    /// Queries `balanceOf(who)`, in base units. Re-queries the network on
    /// every call; nothing is cached.
    pub async fn balance_of(&self, who: Address) -> Result<U256> {
        let calldata = IErc20::balanceOfCall { account: who }.abi_encode();
        let request = TransactionRequest::default().with_to(self.address).with_input(calldata);
        let output = self.kit.provider().call(request).await?;
        Ok(IErc20::balanceOfCall::abi_decode_returns(&output)?)
    }
}

impl<P: Provider> TokenTransfer for TokenContract<'_, P> {
    async fn transfer(&self, to: Address, amount: U256) -> Result<TxHash> {
        let kit = self.kit;
        let calldata = IErc20::transferCall { to, amount }.abi_encode();
        info!(token = %self.address, %to, %amount, fee_currency = ?self.fee_currency, "transferring");

        let receipt = match self.fee_currency {
            // Fees in the native currency: let the provider fill and sign.
            None => {
                let request = TransactionRequest::default()
                    .with_to(self.address)
                    .with_input(calldata)
                    .with_gas_limit(TRANSFER_GAS_LIMIT);
                kit.provider().send_transaction(request).await?.get_receipt().await?
            }
            Some(fee_currency) => {
                let nonce = kit.provider().get_transaction_count(kit.address()).await?;
                let gas_price = kit.provider().get_gas_price().await?;
                let tx = CeloTxLegacy {
                    chain_id: Some(kit.chain_id()),
                    nonce,
                    gas_price,
                    gas_limit: TRANSFER_GAS_LIMIT,
                    fee_currency: Some(fee_currency),
                    gateway_fee_recipient: None,
                    gateway_fee: U256::ZERO,
                    to: TxKind::Call(self.address),
                    value: U256::ZERO,
                    input: calldata.into(),
                };
                let signed = sign_celo_legacy(tx, kit.signer())?;
                kit.provider().send_raw_transaction(signed.raw()).await?.get_receipt().await?
            }
        };
        Ok(receipt.transaction_hash)
    }
}
