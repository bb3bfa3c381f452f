//! Celo transaction walkthrough.
//!
//! Each subcommand reproduces one section of the lesson: signing an
//! Ethereum-shaped transaction, signing a Celo transaction with its three
//! extra fields, sending CELO natively, reading token balances, sending CELO
//! and cUSD through the token contracts, and sending CELO once more through
//! the `ethers` stack to show the two client libraries interoperate.

use alloy_consensus::TxLegacy;
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, hex};
use anyhow::{Context, Result};
use celo_kit::{connect, detect_wallet, registry, send_celo_and_cusd, tx_url, units};
use celo_tx::{CeloTxLegacy, sign_celo_legacy, sign_legacy};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

/// Gas price used by the offline signing examples (5 gwei).
const DEMO_GAS_PRICE: u128 = 5_000_000_000;

/// Gas limit used by the offline signing examples.
const DEMO_GAS_LIMIT: u64 = 200_000;

#[derive(Parser, Debug)]
#[command(about = "Walkthrough of Celo transactions: how they are built, signed and sent")]
struct Cli {
    /// Verbosity level, repeatable.
    #[arg(long, short, action = ArgAction::Count)]
    v: u8,

    /// RPC endpoint.
    #[arg(long, env = "CELO_RPC_URL", default_value = registry::FORNO_ALFAJORES)]
    rpc_url: String,

    /// Chain id used when signing offline.
    #[arg(long, default_value_t = registry::ALFAJORES_CHAIN_ID)]
    chain_id: u64,

    /// Recipient used by the transfer sections.
    #[arg(long, default_value = "0xD86518b29BB52a5DAC5991eACf09481CE4B0710d")]
    to: Address,

    /// CELO (gold) token contract.
    #[arg(long, default_value_t = registry::GOLD_TOKEN)]
    gold_token: Address,

    /// cUSD stable token contract.
    #[arg(long, default_value_t = registry::STABLE_TOKEN)]
    stable_token: Address,

    /// Explorer base URL for transaction links.
    #[arg(long, default_value = celo_kit::ALFAJORES_EXPLORER)]
    explorer: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign an example Ethereum legacy transaction without sending it.
    SignEth,
    /// Sign an example Celo legacy transaction without sending it; the fee
    /// currency and gateway fields ride in the signed payload.
    SignCelo,
    /// Send CELO natively and print the explorer link.
    SendCelo {
        /// Amount in display units.
        #[arg(long, default_value = "0.1")]
        amount: String,
    },
    /// Read the CELO and cUSD balances of an address.
    Balances {
        /// Address to inspect; defaults to the walkthrough recipient.
        #[arg(long)]
        address: Option<Address>,
    },
    /// Transfer CELO and cUSD through the token contracts, paying the cUSD
    /// leg's fees in cUSD.
    Transfer {
        /// Amount in display units, used for both legs.
        #[arg(long, default_value = "0.1")]
        amount: String,
    },
    /// Send CELO through the ethers stack instead of alloy.
    SendEthers {
        /// Amount in display units.
        #[arg(long, default_value = "0.1")]
        amount: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    celo_kit::telemetry::init_tracing(cli.v);

    match &cli.command {
        Command::SignEth => sign_eth(&cli),
        Command::SignCelo => sign_celo(&cli),
        Command::SendCelo { amount } => send_celo(&cli, amount).await,
        Command::Balances { address } => balances(&cli, *address).await,
        Command::Transfer { amount } => transfer(&cli, amount).await,
        Command::SendEthers { amount } => send_ethers(&cli, amount).await,
    }
}

/// The `v` value a legacy transaction carries on the wire.
fn legacy_v(chain_id: Option<u64>, parity: bool) -> u64 {
    chain_id.map_or(27 + parity as u64, |id| 35 + 2 * id + parity as u64)
}

/// Section 2: the Ethereum transaction shape, signed offline.
fn sign_eth(cli: &Cli) -> Result<()> {
    let signer = detect_wallet()?;
    let tx = TxLegacy {
        chain_id: Some(cli.chain_id),
        nonce: 1,
        gas_price: DEMO_GAS_PRICE,
        gas_limit: DEMO_GAS_LIMIT,
        to: TxKind::Call(cli.to),
        value: U256::from(10u64),
        input: Bytes::from_static(&[0xab, 0xc1]),
    };
    let chain_id = tx.chain_id;
    let signed = sign_legacy(tx, &signer)?;

    let summary = serde_json::json!({
        "from": signer.address().to_string(),
        "transactionHash": signed.hash().to_string(),
        "rawTransaction": hex::encode_prefixed(signed.encoded_2718()),
        "v": legacy_v(chain_id, signed.signature().v()),
        "r": format!("{:#x}", signed.signature().r()),
        "s": format!("{:#x}", signed.signature().s()),
    });
    println!("Signed ETH tx: {}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Section 3: the Celo transaction shape. Same fields as Section 2 plus
/// `feeCurrency`, `gatewayFee` and `gatewayFeeRecipient`.
fn sign_celo(cli: &Cli) -> Result<()> {
    let signer = detect_wallet()?;
    let tx = CeloTxLegacy {
        chain_id: Some(cli.chain_id),
        nonce: 1,
        gas_price: DEMO_GAS_PRICE,
        gas_limit: DEMO_GAS_LIMIT,
        fee_currency: Some(cli.stable_token),
        gateway_fee_recipient: Some(Address::ZERO),
        gateway_fee: U256::from(1u64),
        to: TxKind::Call(cli.to),
        value: U256::from(10u64),
        input: Bytes::from_static(&[0xab, 0xc1]),
    };
    let signed = sign_celo_legacy(tx, &signer)?;

    let summary = serde_json::json!({
        "from": signer.address().to_string(),
        "feeCurrency": signed.tx().fee_currency.map(|a| a.to_string()),
        "gatewayFee": signed.tx().gateway_fee.to_string(),
        "gatewayFeeRecipient": signed.tx().gateway_fee_recipient.map(|a| a.to_string()),
        "transactionHash": signed.hash().to_string(),
        "rawTransaction": hex::encode_prefixed(signed.raw()),
        "v": signed.tx().eip155_v(signed.signature()),
        "r": format!("{:#x}", signed.signature().r()),
        "s": format!("{:#x}", signed.signature().s()),
    });
    println!("Signed Celo tx: {}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Section 4: a native CELO transfer, nonce fetched explicitly.
async fn send_celo(cli: &Cli, amount: &str) -> Result<()> {
    let signer = detect_wallet()?;
    let kit = connect(&cli.rpc_url, signer).await?;
    let value = units::to_wei(amount)?;

    let receipt = kit.send_celo(cli.to, value).await?;
    println!("CELO tx: {}", tx_url(&cli.explorer, receipt.transaction_hash));
    Ok(())
}

/// Section 5: read both token balances for an address.
async fn balances(cli: &Cli, address: Option<Address>) -> Result<()> {
    let signer = detect_wallet()?;
    let kit = connect(&cli.rpc_url, signer).await?;
    let who = address.unwrap_or(cli.to);

    let celo = kit.token(cli.gold_token).balance_of(who).await?;
    let cusd = kit.token(cli.stable_token).balance_of(who).await?;
    println!("{who} CELO balance: {}", units::from_wei(celo));
    println!("{who} cUSD balance: {}", units::from_wei(cusd));
    Ok(())
}

/// Section 6: transfer CELO and cUSD through the token contracts, then show
/// the sender's updated balances.
async fn transfer(cli: &Cli, amount: &str) -> Result<()> {
    let signer = detect_wallet()?;
    let kit = connect(&cli.rpc_url, signer).await?;
    let value = units::to_wei(amount)?;

    let gold = kit.token(cli.gold_token);
    let stable = kit.token(cli.stable_token).with_fee_currency(cli.stable_token);
    let (celo_hash, cusd_hash) = send_celo_and_cusd(&gold, &stable, cli.to, value).await?;

    println!("CELO transaction: {}", tx_url(&cli.explorer, celo_hash));
    println!("cUSD transaction: {}", tx_url(&cli.explorer, cusd_hash));

    let celo = gold.balance_of(kit.address()).await?;
    let cusd = stable.balance_of(kit.address()).await?;
    println!("Your new account CELO balance: {}", units::from_wei(celo));
    println!("Your new account cUSD balance: {}", units::from_wei(cusd));
    Ok(())
}

/// Section 7: the same native transfer as Section 4, driven by ethers.
async fn send_ethers(cli: &Cli, amount: &str) -> Result<()> {
    use ethers::middleware::SignerMiddleware;
    use ethers::providers::{Http, Middleware, Provider};
    use ethers::signers::{LocalWallet, Signer};

    let key = std::env::var(celo_kit::PRIVATE_KEY_VAR)
        .context("PRIVATE_KEY is not set; add it to your environment or a .env file")?;
    let wallet = key.trim().parse::<LocalWallet>()?.with_chain_id(cli.chain_id);
    let provider = Provider::<Http>::try_from(cli.rpc_url.as_str())?;
    let client = SignerMiddleware::new(provider, wallet);

    let value = units::to_wei(amount)?;
    let tx = ethers::types::TransactionRequest::new()
        .to(ethers::types::Address::from(cli.to.into_array()))
        .value(ethers::types::U256::from_big_endian(&value.to_be_bytes::<32>()));

    info!(to = %cli.to, amount, "sending CELO via ethers");
    let pending = client.send_transaction(tx, None).await?;
    let receipt = pending.await?.context("transaction dropped from the mempool")?;

    let hash = B256::from(receipt.transaction_hash.0);
    println!("celo-ethers transaction: {}", tx_url(&cli.explorer, hash));
    Ok(())
}
