use std::{path::PathBuf, time::Duration};

use tracing::warn;

use crate::env::{get_env_u64, get_env_var, obfuscate_if_secret, SECRET_LOG_BLACKLIST};

pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.thegraph.com/api";
/// Uniswap v3 on Ethereum mainnet.
pub const DEFAULT_SUBGRAPH_ID: &str = "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV";
pub const DEFAULT_POOL_IDS_PATH: &str = "poolIds.json";
pub const DEFAULT_LIQUIDITY_DATA_PATH: &str = "liquidityData.json";

/// Everything a collection run needs from the environment. Built once at startup and passed
/// down to whatever needs it.
#[derive(Clone, Debug)]
pub struct Config {
    pub gateway_url: String,
    /// Not validated, a missing key surfaces as a failing query.
    pub graph_api_key: Option<String>,
    pub liquidity_data_path: PathBuf,
    pub pool_ids_path: PathBuf,
    pub request_timeout: Option<Duration>,
    pub subgraph_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        let graph_api_key = get_env_var("GRAPH_API_KEY");
        if graph_api_key.is_none() {
            warn!("GRAPH_API_KEY not set, subgraph queries will fail");
        }

        Self {
            gateway_url: get_env_var("GRAPH_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            graph_api_key,
            liquidity_data_path: get_env_var("LIQUIDITY_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_LIQUIDITY_DATA_PATH.to_string())
                .into(),
            pool_ids_path: get_env_var("POOL_IDS_PATH")
                .unwrap_or_else(|| DEFAULT_POOL_IDS_PATH.to_string())
                .into(),
            request_timeout: get_env_u64("REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
            subgraph_id: get_env_var("SUBGRAPH_ID")
                .unwrap_or_else(|| DEFAULT_SUBGRAPH_ID.to_string()),
        }
    }

    fn make_subgraph_url(&self, api_key: &str) -> String {
        format!(
            "{}/{}/subgraphs/id/{}",
            self.gateway_url.trim_end_matches('/'),
            api_key,
            self.subgraph_id
        )
    }

    pub fn subgraph_url(&self) -> String {
        self.make_subgraph_url(self.graph_api_key.as_deref().unwrap_or_default())
    }

    /// The subgraph url with the api key obfuscated, safe to log.
    pub fn redacted_subgraph_url(&self) -> String {
        let api_key = self.graph_api_key.as_deref().unwrap_or_default();
        self.make_subgraph_url(&obfuscate_if_secret(
            &SECRET_LOG_BLACKLIST,
            "GRAPH_API_KEY",
            api_key,
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            graph_api_key: None,
            liquidity_data_path: DEFAULT_LIQUIDITY_DATA_PATH.into(),
            pool_ids_path: DEFAULT_POOL_IDS_PATH.into(),
            request_timeout: None,
            subgraph_id: DEFAULT_SUBGRAPH_ID.to_string(),
        }
    }
}
