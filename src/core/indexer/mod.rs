pub mod pool;
pub use super::constants;
pub use super::types;
pub use anyhow::Result;
