pub mod constants;
pub mod earn;
pub mod error;
pub mod indexer;
pub mod onchain;
pub mod optimization;
pub mod pair;
pub mod paths;
pub mod pool;
pub mod types;
pub use anyhow::{Context, Result};
