use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    store::JsonFileStore,
    subgraph::{LiquidityData, PoolAddress, Subgraph, SubgraphError},
    time::DateRange,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRecord {
    pub pool_address: PoolAddress,
    #[serde(flatten)]
    pub data: LiquidityData,
}

pub type LiquidityStore = JsonFileStore<Vec<LiquidityRecord>>;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LiquidityRunSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: Vec<PoolAddress>,
}

fn log_subgraph_error(pool_address: &str, e: &SubgraphError) {
    error!(pool_address, "failed to fetch liquidity data: {e}");
    if let SubgraphError::Query { details, .. } = e {
        error!(pool_address, %details, "subgraph error details");
    }
}

/// Fetch the pool summary and its mints and burns within `date_range` for a single pool.
/// Failures are logged and come back as `None`.
#[instrument(skip(subgraph, date_range))]
pub async fn fetch_liquidity_data(
    subgraph: &impl Subgraph,
    pool_address: &str,
    date_range: &DateRange,
    limit: u32,
) -> Option<LiquidityData> {
    info!("fetching liquidity data from {date_range}");

    match subgraph
        .get_liquidity_data(
            pool_address,
            date_range.start_timestamp,
            date_range.end_timestamp,
            limit,
        )
        .await
    {
        Ok(liquidity_data) => {
            debug!(
                mints = liquidity_data.mints.len(),
                burns = liquidity_data.burns.len(),
                "fetched liquidity data"
            );
            Some(liquidity_data)
        }
        Err(e) => {
            log_subgraph_error(pool_address, &e);
            None
        }
    }
}

/// Fetch liquidity data for every pool not yet in the store, in the given order. The store is
/// rewritten after each successful fetch so an interrupted run keeps everything fetched so far.
/// A pool that fails is left out and picked up again by the next run.
#[instrument(skip_all, fields(pools = pool_addresses.len(), date_range = %date_range))]
pub async fn collect_per_identifier(
    subgraph: &impl Subgraph,
    store: &LiquidityStore,
    pool_addresses: &[PoolAddress],
    date_range: &DateRange,
    page_limit: u32,
) -> LiquidityRunSummary {
    let mut records = store.read_or_default();
    let mut stored: HashSet<PoolAddress> = records
        .iter()
        .map(|record| record.pool_address.clone())
        .collect();
    info!(stored_count = records.len(), "loaded stored liquidity records");

    let mut summary = LiquidityRunSummary::default();
    let mut progress =
        pit_wall::Progress::new("collect liquidity data", pool_addresses.len() as u64);

    for pool_address in pool_addresses {
        progress.inc_work_done();

        if stored.contains(pool_address) {
            info!(%pool_address, "liquidity data already stored, skipping");
            summary.skipped += 1;
            continue;
        }

        let Some(data) = fetch_liquidity_data(subgraph, pool_address, date_range, page_limit).await
        else {
            summary.failed.push(pool_address.clone());
            continue;
        };

        stored.insert(pool_address.clone());
        records.push(LiquidityRecord {
            pool_address: pool_address.clone(),
            data,
        });
        summary.fetched += 1;

        match store.write(&records) {
            Ok(()) => info!(
                %pool_address,
                path = %store.path().display(),
                "saved liquidity data, {}",
                progress.get_progress_string()
            ),
            Err(e) => error!(%pool_address, "failed to save liquidity data: {e}"),
        }
    }

    info!(
        fetched = summary.fetched,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "done collecting liquidity data"
    );

    summary
}
