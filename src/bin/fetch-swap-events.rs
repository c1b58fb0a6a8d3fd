use clap::Parser;
use uniswap_subgraph_collector::{collector, log, subgraph::SubgraphHttp, Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the most recent swap events as JSON", long_about = None)]
#[clap(name = "fetch-swap-events")]
struct Args {
    /// Number of swaps to fetch.
    #[arg(long, default_value = "10")]
    count: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    log::init();

    let args = Args::parse();
    let config = Config::from_env();

    let subgraph = SubgraphHttp::new(&config)?;
    let swaps = collector::collect_latest_events(&subgraph, args.count).await;

    println!("{}", serde_json::to_string_pretty(&swaps)?);

    Ok(())
}
