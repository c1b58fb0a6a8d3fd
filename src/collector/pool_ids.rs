use std::{collections::HashSet, num::NonZeroU32};

use tracing::{error, info, instrument, warn};

use crate::{
    store::JsonFileStore,
    subgraph::{PoolAddress, Subgraph, SubgraphError},
};

pub type PoolIdsStore = JsonFileStore<Vec<PoolAddress>>;

/// Pool ids in the order they were first seen, each at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolIdSet {
    ids: Vec<PoolAddress>,
    seen: HashSet<PoolAddress>,
}

impl PoolIdSet {
    /// Returns false when the id was already present.
    pub fn insert(&mut self, id: PoolAddress) -> bool {
        if self.seen.contains(&id) {
            return false;
        }

        self.seen.insert(id.clone());
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[PoolAddress] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<PoolAddress> {
        self.ids
    }
}

impl FromIterator<PoolAddress> for PoolIdSet {
    fn from_iter<I: IntoIterator<Item = PoolAddress>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[derive(Debug)]
pub struct PoolIdsRunSummary {
    pub pool_ids: PoolIdSet,
    /// False when the merged set could not be written to the store.
    pub saved: bool,
}

/// Page through all pools and merge their ids into the stored set. Nothing is written unless
/// every page was fetched.
#[instrument(skip_all, fields(page_size = page_size.get()))]
pub async fn collect_paginated(
    subgraph: &impl Subgraph,
    store: &PoolIdsStore,
    page_size: NonZeroU32,
) -> Result<PoolIdsRunSummary, SubgraphError> {
    let mut pool_ids: PoolIdSet = store.read_or_default().into_iter().collect();
    let stored_count = pool_ids.len();
    info!(stored_count, "loaded stored pool ids");

    let mut skip: u32 = 0;
    let mut requests = 0;

    loop {
        let page = match subgraph.get_pool_ids(page_size.get(), skip).await {
            Ok(page) => page,
            Err(e) => {
                error!(skip, "failed to fetch pool ids, not saving: {e}");
                if let SubgraphError::Query { details, .. } = &e {
                    error!(%details, "subgraph error details");
                }
                return Err(e);
            }
        };
        requests += 1;

        if page.is_empty() {
            break;
        }

        for id in page {
            pool_ids.insert(id);
        }

        skip = match skip.checked_add(page_size.get()) {
            Some(next_skip) => next_skip,
            None => {
                warn!(skip, "pagination offset would overflow, stopping early");
                break;
            }
        };
    }

    info!(
        requests,
        new_count = pool_ids.len() - stored_count,
        total_count = pool_ids.len(),
        "fetched unique pool ids"
    );

    let saved = match store.write(&pool_ids.as_slice().to_vec()) {
        Ok(()) => {
            info!(
                path = %store.path().display(),
                "saved {} pool ids",
                pool_ids.len()
            );
            true
        }
        Err(e) => {
            error!("failed to save pool ids: {e}");
            false
        }
    };

    Ok(PoolIdsRunSummary { pool_ids, saved })
}
