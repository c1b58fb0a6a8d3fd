//! Functions that know how to query a subgraph through The Graph gateway. Responses are decoded
//! into typed structs at this boundary, anything that doesn't match is a [`SubgraphError::Parse`].
mod queries;
mod types;

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{config::Config, time::UnixTimestamp};

pub use types::{Burn, LiquidityData, Mint, Pool, PoolAddress, Swap, Token};

use types::{PoolsPage, SwapsPage};

#[derive(Debug, Error)]
pub enum SubgraphError {
    #[error("subgraph request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("subgraph responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("subgraph query failed: {message}")]
    Query {
        message: String,
        details: serde_json::Value,
    },
    #[error("subgraph response did not have the expected shape: {0}")]
    Parse(String),
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct PoolIdsVariables {
    limit: u32,
    skip: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LiquidityDataVariables<'a> {
    pool_address: &'a str,
    start_timestamp: UnixTimestamp,
    end_timestamp: UnixTimestamp,
    limit: u32,
}

#[derive(Serialize)]
struct SwapsVariables {
    first: u32,
}

#[automock]
#[async_trait]
pub trait Subgraph {
    /// One page of pool ids, `limit` at most, starting at offset `skip`.
    async fn get_pool_ids(&self, limit: u32, skip: u32) -> Result<Vec<PoolAddress>, SubgraphError>;
    /// Pool summary plus at most `limit` mints and `limit` burns with a timestamp within
    /// `[start_timestamp, end_timestamp]`.
    async fn get_liquidity_data(
        &self,
        pool_address: &str,
        start_timestamp: UnixTimestamp,
        end_timestamp: UnixTimestamp,
        limit: u32,
    ) -> Result<LiquidityData, SubgraphError>;
    /// The `first` most recent swaps, newest first.
    async fn get_swaps(&self, first: u32) -> Result<Vec<Swap>, SubgraphError>;
}

#[derive(Clone, Debug)]
pub struct SubgraphHttp {
    client: reqwest::Client,
    url: String,
}

impl SubgraphHttp {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let builder = reqwest::Client::builder().gzip(true);
        let builder = match config.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        Ok(Self {
            client: builder.build()?,
            url: config.subgraph_url(),
        })
    }

    pub fn new_with_url(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, SubgraphError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let res = self
            .client
            .post(&self.url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        trace!(%status, body = %body, "subgraph response");

        // Gateway errors come with a GraphQL errors array regardless of status.
        let response = match serde_json::from_str::<GraphQlResponse>(&body) {
            Ok(response) => response,
            Err(_) if !status.is_success() => {
                return Err(SubgraphError::Status { status, body });
            }
            Err(e) => return Err(SubgraphError::Parse(e.to_string())),
        };

        if !response.errors.is_empty() {
            let message = response
                .errors
                .iter()
                .map(|error| {
                    error["message"]
                        .as_str()
                        .map_or_else(|| error.to_string(), str::to_string)
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SubgraphError::Query {
                message,
                details: serde_json::Value::Array(response.errors),
            });
        }

        if !status.is_success() {
            return Err(SubgraphError::Status { status, body });
        }

        let data = response
            .data
            .ok_or_else(|| SubgraphError::Parse("response has no data".to_string()))?;

        serde_json::from_value::<T>(data).map_err(|e| SubgraphError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Subgraph for SubgraphHttp {
    async fn get_pool_ids(&self, limit: u32, skip: u32) -> Result<Vec<PoolAddress>, SubgraphError> {
        debug!(limit, skip, "fetching pool ids");
        let page = self
            .query::<_, PoolsPage>(queries::GET_POOL_IDS, PoolIdsVariables { limit, skip })
            .await?;

        Ok(page.pools.into_iter().map(|pool| pool.id).collect())
    }

    async fn get_liquidity_data(
        &self,
        pool_address: &str,
        start_timestamp: UnixTimestamp,
        end_timestamp: UnixTimestamp,
        limit: u32,
    ) -> Result<LiquidityData, SubgraphError> {
        debug!(pool_address, start_timestamp, end_timestamp, limit, "fetching liquidity data");
        self.query(
            queries::GET_LIQUIDITY_DATA,
            LiquidityDataVariables {
                pool_address,
                start_timestamp,
                end_timestamp,
                limit,
            },
        )
        .await
    }

    async fn get_swaps(&self, first: u32) -> Result<Vec<Swap>, SubgraphError> {
        debug!(first, "fetching swaps");
        let page = self
            .query::<_, SwapsPage>(queries::GET_SWAPS, SwapsVariables { first })
            .await?;

        Ok(page.swaps)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn get_pool_ids_test() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "limit": 2, "skip": 4 }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "data": { "pools": [{ "id": "0xabc" }, { "id": "0xdef" }] }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let pool_ids = subgraph.get_pool_ids(2, 4).await.unwrap();

        mock.assert_async().await;
        assert_eq!(pool_ids, vec!["0xabc".to_string(), "0xdef".to_string()]);
    }

    #[tokio::test]
    async fn get_liquidity_data_test() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "variables": {
                    "poolAddress": "0xabc",
                    "startTimestamp": 1704067200,
                    "endTimestamp": 1706745600,
                    "limit": 50
                }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "pool": {
                            "id": "0xabc",
                            "token0": { "symbol": "USDC" },
                            "token1": { "symbol": "WETH" },
                            "feeTier": "3000",
                            "liquidity": "100",
                            "volumeUSD": "200.5",
                            "totalValueLockedUSD": "300.5"
                        },
                        "mints": [],
                        "burns": []
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let liquidity_data = subgraph
            .get_liquidity_data("0xabc", 1704067200, 1706745600, 50)
            .await
            .unwrap();

        assert_eq!(liquidity_data.pool.id, "0xabc");
        assert!(liquidity_data.mints.is_empty());
    }

    #[tokio::test]
    async fn get_swaps_test() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({ "variables": { "first": 1 } })),
                Matcher::Regex("orderBy: timestamp, orderDirection: desc".to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "swaps": [{
                            "id": "0xccc#3",
                            "sender": "0x1",
                            "recipient": "0x2",
                            "amount0": "-1",
                            "amount1": "2",
                            "sqrtPriceX96": "79228162514264337593543950336",
                            "tick": "0",
                            "timestamp": "1706745599"
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let swaps = subgraph.get_swaps(1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].sqrt_price_x96, "79228162514264337593543950336");
    }

    #[tokio::test]
    async fn graphql_errors_test() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                json!({
                    "errors": [{
                        "message": "auth error: malformed API key",
                        "locations": [{ "line": 2, "column": 3 }]
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let error = subgraph.get_pool_ids(1000, 0).await.unwrap_err();

        match error {
            SubgraphError::Query { message, details } => {
                assert_eq!(message, "auth error: malformed API key");
                assert_eq!(details[0]["locations"][0]["line"], 2);
            }
            error => panic!("expected a query error, got {error:?}"),
        }
    }

    #[tokio::test]
    async fn bad_status_test() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let error = subgraph.get_swaps(10).await.unwrap_err();

        assert!(matches!(
            error,
            SubgraphError::Status { status, .. } if status == StatusCode::BAD_GATEWAY
        ));
    }

    #[tokio::test]
    async fn missing_pool_is_parse_error_test() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(json!({ "data": { "pool": null, "mints": [], "burns": [] } }).to_string())
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let error = subgraph
            .get_liquidity_data("0xdoesnotexist", 0, 1, 10)
            .await
            .unwrap_err();

        assert!(matches!(error, SubgraphError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_data_is_parse_error_test() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let subgraph = SubgraphHttp::new_with_url(&server.url());
        let error = subgraph.get_pool_ids(1000, 0).await.unwrap_err();

        assert!(matches!(error, SubgraphError::Parse(_)));
    }
}
