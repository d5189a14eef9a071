/// Swap fee complement on a 10_000 basis, i.e. a 0.30% pool fee.
pub const FEE_FACTOR: u32 = 9970;

pub const DEFAULT_STRAT_CONTRACT: &str = "MinichefLP1.sol:StratX4MinichefLP1";

pub const SNAPSHOT_HEADER: [&str; 5] = ["pair", "token0", "token1", "reserve0", "reserve1"];
