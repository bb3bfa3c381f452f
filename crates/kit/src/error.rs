//! Kit errors.
//!
//! The taxonomy is inherited from the client crates; the only local
//! precondition is the missing-wallet check.

/// Errors surfaced by kit operations.
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    /// No wallet key was found in the environment.
    #[error(
        "No Celo wallet found. Set PRIVATE_KEY in your environment or a .env file, then try again."
    )]
    WalletNotFound,
    /// The wallet key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidKey(#[from] alloy_signer_local::LocalSignerError),
    /// Transaction signing failed.
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
    /// RPC transport or node error.
    #[error(transparent)]
    Rpc(#[from] alloy_transport::TransportError),
    /// A submitted transaction never produced a receipt.
    #[error(transparent)]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),
    /// Contract return data did not decode.
    #[error("failed to decode contract return data: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),
}

/// Kit result type.
pub type Result<T> = core::result::Result<T, KitError>;
