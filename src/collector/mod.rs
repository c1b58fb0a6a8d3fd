//! Incremental collection runs against a subgraph. Each run loads what was stored before, fetches
//! only what is missing and writes the merged result back.
//!
//! Runs are strictly sequential: every request and every write is awaited before the next one
//! starts. Two runs against the same store file are not supported.
mod liquidity;
mod pool_ids;
mod swaps;

pub use liquidity::{
    collect_per_identifier, fetch_liquidity_data, LiquidityRecord, LiquidityRunSummary,
    LiquidityStore,
};
pub use pool_ids::{collect_paginated, PoolIdSet, PoolIdsRunSummary, PoolIdsStore};
pub use swaps::collect_latest_events;
