//! Wallet detection.

use crate::error::{KitError, Result};
use alloy_signer_local::PrivateKeySigner;

/// Environment variable holding the account's private key.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Builds a signer from an optional hex key.
///
/// A missing key maps to [`KitError::WalletNotFound`], whose message is the
/// fixed setup instruction; no client is constructed in that case. A present
/// but malformed key surfaces the signer library's parse error.
pub fn wallet_from_key(key: Option<&str>) -> Result<PrivateKeySigner> {
    let key = key.ok_or(KitError::WalletNotFound)?;
    Ok(key.trim().parse()?)
}

/// Probes the environment for [`PRIVATE_KEY_VAR`].
pub fn detect_wallet() -> Result<PrivateKeySigner> {
    wallet_from_key(std::env::var(PRIVATE_KEY_VAR).ok().as_deref())
}
