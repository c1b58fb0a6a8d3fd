//! Collect Uniswap v3 pool data from The Graph into local JSON files. Each binary runs one
//! collection mode, see [`collector`].
pub mod collector;
pub mod config;
mod env;
mod json_codecs;
pub mod log;
pub mod store;
pub mod subgraph;
pub mod time;

pub use config::Config;
