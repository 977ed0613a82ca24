// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use alloy::primitives::Address;
use anyhow::{bail, Result};
use clap::Parser;
use l2_stats_indexer::service::{ContractAddresses, IndexerService, IndexerServiceConfig};
use url::Url;

/// Arguments of the indexer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// URL of the L2 RPC endpoint.
    #[clap(short, long, env)]
    rpc_url: Url,
    /// DB connection string.
    #[clap(long, env = "DATABASE_URL")]
    db: String,
    /// Address of the L2 faucet contract.
    #[clap(long, env)]
    faucet_address: Option<Address>,
    /// Address of the L2 message service contract.
    #[clap(long, env)]
    message_service_address: Option<Address>,
    /// Address of the L2 token bridge contract.
    #[clap(long, env)]
    token_bridge_address: Option<Address>,
    /// Starting block number.
    #[clap(long)]
    start_block: Option<u64>,
    /// Ending block number (if set, indexer will process up to this block and exit).
    #[clap(long)]
    end_block: Option<u64>,
    /// Interval in seconds between checking for new events.
    #[clap(long, default_value = "3")]
    interval: u64,
    /// Number of retries before quitting after an error.
    #[clap(long, default_value = "10")]
    retries: u32,
    /// Number of blocks to process in each batch.
    #[clap(long, default_value = "500")]
    batch_size: u64,
    /// Whether to log in JSON format.
    #[clap(long, env, default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so the file can supply argument env vars.
    let dotenv = dotenvy::dotenv();
    let args = MainArgs::parse();

    if args.log_json {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let contracts = ContractAddresses {
        faucet: args.faucet_address,
        message_service: args.message_service_address,
        token_bridge: args.token_bridge_address,
    };
    if contracts.is_empty() {
        bail!(
            "At least one of --faucet-address, --message-service-address or \
             --token-bridge-address is required"
        );
    }

    let config = IndexerServiceConfig {
        interval: Duration::from_secs(args.interval),
        retries: args.retries,
        batch_size: args.batch_size,
        contracts,
    };

    let mut indexer_service = IndexerService::new(args.rpc_url, &args.db, config).await?;

    if let Err(err) = indexer_service.run(args.start_block, args.end_block).await {
        bail!("FATAL: Error running the indexer: {err}");
    }
    if args.end_block.is_some() {
        tracing::info!("Indexer completed successfully");
    }

    Ok(())
}
