use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use uniswap_subgraph_collector::{
    collector::{self, LiquidityStore, PoolIdsStore},
    log,
    subgraph::{PoolAddress, SubgraphHttp},
    time::DateRange,
    Config,
};

/// WETH/USDC 0.3% pool.
const DEFAULT_POOL_ADDRESS: &str = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8";

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch pool mints and burns over a date range into the liquidity data file", long_about = None)]
#[clap(name = "fetch-liquidity-data")]
struct Args {
    /// Pool to fetch, may be repeated.
    #[arg(long = "pool-address", default_value = DEFAULT_POOL_ADDRESS)]
    pool_addresses: Vec<PoolAddress>,
    /// Fetch every pool in the pool ids file instead of --pool-address.
    #[arg(long)]
    from_stored_pool_ids: bool,
    /// YYYY-MM-DD (UTC) or RFC 3339.
    #[arg(long, default_value = "2024-01-01")]
    start_date: String,
    /// YYYY-MM-DD (UTC) or RFC 3339, inclusive.
    #[arg(long, default_value = "2024-02-01")]
    end_date: String,
    /// Maximum number of mints, and of burns, fetched per pool.
    #[arg(long, default_value = "50")]
    limit: u32,
    /// Print the fetched data instead of merging it into the liquidity data file.
    #[arg(long)]
    print_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    log::init();

    let args = Args::parse();
    let config = Config::from_env();

    let date_range =
        DateRange::new(&args.start_date, &args.end_date).context("invalid date range")?;

    let pool_addresses = if args.from_stored_pool_ids {
        let pool_ids_store = PoolIdsStore::new(config.pool_ids_path.clone());
        let pool_ids = pool_ids_store.read_or_default();
        if pool_ids.is_empty() {
            bail!(
                "no pool ids stored in {}, run fetch-pool-ids first",
                pool_ids_store.path().display()
            );
        }
        pool_ids
    } else {
        args.pool_addresses
    };

    info!(
        url = %config.redacted_subgraph_url(),
        pools = pool_addresses.len(),
        "fetching liquidity data from {date_range}"
    );

    let subgraph = SubgraphHttp::new(&config)?;

    if args.print_only {
        for pool_address in &pool_addresses {
            if let Some(liquidity_data) =
                collector::fetch_liquidity_data(&subgraph, pool_address, &date_range, args.limit)
                    .await
            {
                println!("{}", serde_json::to_string_pretty(&liquidity_data)?);
            }
        }
        return Ok(());
    }

    let store = LiquidityStore::new(config.liquidity_data_path.clone());
    let summary = collector::collect_per_identifier(
        &subgraph,
        &store,
        &pool_addresses,
        &date_range,
        args.limit,
    )
    .await;

    if !summary.failed.is_empty() {
        warn!(
            "failed to fetch {} pools, rerun to retry them: {}",
            summary.failed.len(),
            summary.failed.join(", ")
        );
    }

    Ok(())
}
