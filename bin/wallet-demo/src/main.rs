//! Interactive wallet demo.
//!
//! A terminal rendition of the original demo page: `login` connects the
//! wallet and shows the account's balances, `send` transfers a fixed amount
//! of cUSD to a fixed recipient and prints the explorer link. The connected
//! session is held by the loop and passed into each handler explicitly.

use alloy_primitives::Address;
use anyhow::Result;
use celo_kit::{Kit, TokenTransfer, connect, detect_wallet, registry, tx_url, units};
use clap::{ArgAction, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "Connect a Celo account, watch its cUSD balance, send a fixed transfer")]
struct Cli {
    /// Verbosity level, repeatable.
    #[arg(long, short, action = ArgAction::Count)]
    v: u8,

    /// RPC endpoint.
    #[arg(long, env = "CELO_RPC_URL", default_value = registry::FORNO_ALFAJORES)]
    rpc_url: String,

    /// Stable token backing the balance display and the send action.
    #[arg(long, default_value_t = registry::STABLE_TOKEN)]
    token: Address,

    /// Fixed transfer recipient.
    #[arg(long, default_value = "0xD86518b29BB52a5DAC5991eACf09481CE4B0710d")]
    to: Address,

    /// Fixed transfer amount, in display units.
    #[arg(long, default_value = "0.01")]
    amount: String,

    /// Explorer base URL for transaction links.
    #[arg(long, default_value = celo_kit::ALFAJORES_EXPLORER)]
    explorer: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    celo_kit::telemetry::init_tracing(cli.v);

    println!("Commands: login, send, balance, quit");

    let mut session = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "login" | "connect" => match connect_wallet(&cli).await {
                Ok(kit) => session = Some(kit),
                Err(err) => println!("warning: {err}"),
            },
            "send" => match &session {
                Some(kit) => {
                    if let Err(err) = send(kit, &cli).await {
                        println!("warning: {err}");
                    }
                }
                None => println!("warning: no wallet connected; run `login` first"),
            },
            "balance" => match &session {
                Some(kit) => {
                    if let Err(err) = show_balance(kit, cli.token).await {
                        println!("warning: {err}");
                    }
                }
                None => println!("warning: no wallet connected; run `login` first"),
            },
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command: {other}"),
        }
    }
    Ok(())
}

/// Probes for a wallet key, binds it to the provider, and shows the initial
/// balances. A missing key yields the fixed setup instruction without
/// constructing any client.
async fn connect_wallet(cli: &Cli) -> celo_kit::Result<Kit<impl alloy_provider::Provider>> {
    let signer = detect_wallet()?;
    let kit = connect(&cli.rpc_url, signer).await?;
    println!("Connected as {}", kit.address());
    show_balance(&kit, cli.token).await?;
    Ok(kit)
}

/// Reads and renders the account's cUSD and native CELO balances at two
/// decimal places.
async fn show_balance<P: alloy_provider::Provider>(
    kit: &Kit<P>,
    token: Address,
) -> celo_kit::Result<()> {
    let cusd = kit.token(token).balance_of(kit.address()).await?;
    let celo = kit.native_balance(kit.address()).await?;
    println!("cUSD balance: {}", units::to_fixed2(cusd));
    println!("CELO balance: {}", units::to_fixed2(celo));
    Ok(())
}

/// Sends the fixed cUSD transfer, refreshes the balance display, and prints
/// the explorer link.
async fn send<P: alloy_provider::Provider>(kit: &Kit<P>, cli: &Cli) -> Result<()> {
    let amount = units::to_wei(&cli.amount)?;
    debug!(%cli.to, amount = %cli.amount, "sending demo transfer");

    let hash = kit.token(cli.token).transfer(cli.to, amount).await?;
    show_balance(kit, cli.token).await?;
    println!("Transaction: {}", tx_url(&cli.explorer, hash));
    Ok(())
}
