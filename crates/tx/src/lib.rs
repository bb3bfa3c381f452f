#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod celo_legacy;
pub use celo_legacy::{CeloTxLegacy, SignedCeloLegacy};

mod sign;
pub use sign::{sign_celo_legacy, sign_legacy};
