//! Shapes returned by the Uniswap v3 subgraph. Decimal amounts and uint160/uint128 values stay
//! strings, they don't fit a float without losing precision.

use serde::{Deserialize, Serialize};

use crate::json_codecs::{i64_from_string, to_i64_string};
use crate::time::UnixTimestamp;

pub type PoolAddress = String;

#[derive(Debug, Deserialize)]
pub(super) struct PoolId {
    pub id: PoolAddress,
}

#[derive(Debug, Deserialize)]
pub(super) struct PoolsPage {
    pub pools: Vec<PoolId>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SwapsPage {
    pub swaps: Vec<Swap>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Token {
    pub symbol: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: PoolAddress,
    pub token0: Token,
    pub token1: Token,
    /// In hundredths of a basis point, 3000 is 0.3%.
    #[serde(deserialize_with = "i64_from_string", serialize_with = "to_i64_string")]
    pub fee_tier: i64,
    pub liquidity: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Mint {
    pub id: String,
    pub sender: Option<String>,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: Option<String>,
    #[serde(deserialize_with = "i64_from_string", serialize_with = "to_i64_string")]
    pub timestamp: UnixTimestamp,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Burn {
    pub id: String,
    pub owner: Option<String>,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: Option<String>,
    #[serde(deserialize_with = "i64_from_string", serialize_with = "to_i64_string")]
    pub timestamp: UnixTimestamp,
}

/// Pool summary plus the mints and burns within a time range, oldest first.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct LiquidityData {
    pub pool: Pool,
    pub mints: Vec<Mint>,
    pub burns: Vec<Burn>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub amount0: String,
    pub amount1: String,
    pub sqrt_price_x96: String,
    #[serde(deserialize_with = "i64_from_string", serialize_with = "to_i64_string")]
    pub tick: i64,
    #[serde(deserialize_with = "i64_from_string", serialize_with = "to_i64_string")]
    pub timestamp: UnixTimestamp,
}
