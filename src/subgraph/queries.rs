pub const GET_POOL_IDS: &str = r#"
query GetAllPools($limit: Int!, $skip: Int!) {
  pools(first: $limit, skip: $skip) {
    id
  }
}
"#;

pub const GET_LIQUIDITY_DATA: &str = r#"
query GetLiquidityData(
  $poolAddress: String!
  $startTimestamp: Int!
  $endTimestamp: Int!
  $limit: Int!
) {
  pool(id: $poolAddress) {
    id
    token0 {
      symbol
    }
    token1 {
      symbol
    }
    feeTier
    liquidity
    volumeUSD
    totalValueLockedUSD
  }

  mints(
    first: $limit
    where: {
      timestamp_gte: $startTimestamp
      timestamp_lte: $endTimestamp
      pool: $poolAddress
    }
    orderBy: timestamp
    orderDirection: asc
  ) {
    id
    sender
    amount0
    amount1
    amountUSD
    timestamp
  }

  burns(
    first: $limit
    where: {
      timestamp_gte: $startTimestamp
      timestamp_lte: $endTimestamp
      pool: $poolAddress
    }
    orderBy: timestamp
    orderDirection: asc
  ) {
    id
    owner
    amount0
    amount1
    amountUSD
    timestamp
  }
}
"#;

pub const GET_SWAPS: &str = r#"
query GetSwapEvents($first: Int!) {
  swaps(first: $first, orderBy: timestamp, orderDirection: desc) {
    id
    sender
    recipient
    amount0
    amount1
    sqrtPriceX96
    tick
    timestamp
  }
}
"#;
