#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{KitError, Result};

mod kit;
pub use kit::{Kit, TRANSFER_GAS_LIMIT, build_celo_transfer, connect};

pub mod erc20;
pub use erc20::TokenContract;

mod transfer;
pub use transfer::{TokenTransfer, send_celo_and_cusd};

mod wallet;
pub use wallet::{PRIVATE_KEY_VAR, detect_wallet, wallet_from_key};

mod explorer;
pub use explorer::{ALFAJORES_EXPLORER, tx_url};

pub mod registry;
pub mod telemetry;
pub mod units;
