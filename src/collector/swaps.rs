use tracing::{error, info, instrument};

use crate::subgraph::{Subgraph, SubgraphError, Swap};

/// The `count` most recent swaps, newest first. Nothing is persisted. A failed query is logged
/// and yields no swaps.
#[instrument(skip(subgraph))]
pub async fn collect_latest_events(subgraph: &impl Subgraph, count: u32) -> Vec<Swap> {
    match subgraph.get_swaps(count).await {
        Ok(swaps) => {
            info!("fetched {} swap events", swaps.len());
            swaps
        }
        Err(e) => {
            error!("failed to fetch swap events: {e}");
            if let SubgraphError::Query { details, .. } = &e {
                error!(%details, "subgraph error details");
            }
            vec![]
        }
    }
}
