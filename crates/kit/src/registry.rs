//! Alfajores testnet constants.

use alloy_primitives::{Address, address};

/// Alfajores chain id.
pub const ALFAJORES_CHAIN_ID: u64 = 44787;

/// Forno, the public Alfajores RPC endpoint.
pub const FORNO_ALFAJORES: &str = "https://alfajores-forno.celo-testnet.org";

/// The CELO (gold) token contract on Alfajores.
pub const GOLD_TOKEN: Address = address!("0xF194afDf50B03e69Bd7D057c1Aa9e10c9954E4C9");

/// The cUSD stable token contract on Alfajores.
pub const STABLE_TOKEN: Address = address!("0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1");
