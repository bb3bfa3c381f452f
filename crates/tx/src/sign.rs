//! Sign-without-sending helpers.

use crate::{CeloTxLegacy, SignedCeloLegacy};
use alloy_consensus::{SignableTransaction, Signed, TxLegacy};
use alloy_signer::SignerSync;

/// Signs a plain Ethereum legacy transaction without touching the network.
///
/// Field validation is left to the signer and, later, the node; malformed
/// transactions surface the library's own error.
pub fn sign_legacy<S: SignerSync>(
    tx: TxLegacy,
    signer: &S,
) -> alloy_signer::Result<Signed<TxLegacy>> {
    let signature = signer.sign_hash_sync(&tx.signature_hash())?;
    Ok(tx.into_signed(signature))
}

/// Signs a Celo legacy transaction without touching the network.
///
/// The fee currency and gateway fields are part of the signed payload, so
/// they cannot be altered after signing.
pub fn sign_celo_legacy<S: SignerSync>(
    tx: CeloTxLegacy,
    signer: &S,
) -> alloy_signer::Result<SignedCeloLegacy> {
    let signature = signer.sign_hash_sync(&tx.signature_hash())?;
    Ok(tx.into_signed(signature))
}
