use std::num::NonZeroU32;

use anyhow::bail;
use clap::Parser;
use tracing::info;
use uniswap_subgraph_collector::{
    collector::{self, PoolIdsStore},
    log,
    subgraph::SubgraphHttp,
    Config,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch the ids of all pools and merge them into the pool ids file", long_about = None)]
#[clap(name = "fetch-pool-ids")]
struct Args {
    /// Number of pool ids requested per page.
    #[arg(long, default_value = "1000")]
    page_size: NonZeroU32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    log::init();

    let args = Args::parse();
    let config = Config::from_env();

    info!(url = %config.redacted_subgraph_url(), "fetching pool ids");

    let subgraph = SubgraphHttp::new(&config)?;
    let store = PoolIdsStore::new(config.pool_ids_path.clone());

    let summary = collector::collect_paginated(&subgraph, &store, args.page_size).await?;

    if !summary.saved {
        bail!(
            "collected {} unique pool ids but failed to save them to {}",
            summary.pool_ids.len(),
            store.path().display()
        );
    }

    info!(
        "done fetching pool ids, {} unique ids stored",
        summary.pool_ids.len()
    );

    Ok(())
}
