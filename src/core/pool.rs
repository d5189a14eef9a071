use super::error::RouteError;
use super::indexer::pool::{read_poolmap_data_from_disk, write_poolmap_data_on_disk};
use super::pair::PairReserveProvider;
use super::types::{PairReserves, Pool, PoolMap};
use super::Result;
use alloy::primitives::Address;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::path::Path;

/// Canonical (token0, token1) ordering of a token pair.
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

impl Pool {
    pub fn new(
        address: Address,
        token_a: Address,
        token_b: Address,
        reserve_a: BigUint,
        reserve_b: BigUint,
    ) -> Self {
        let (token0, token1) = sort_tokens(token_a, token_b);
        let (reserve0, reserve1) = if token0 == token_a {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        Self {
            address,
            token0,
            token1,
            reserve0,
            reserve1,
        }
    }

    /// Reserves with `token_in` as input, `None` if the token is not in the pool.
    pub fn oriented(&self, token_in: Address) -> Option<PairReserves> {
        let (reserve_in, reserve_out) = if token_in == self.token0 {
            (self.reserve0.clone(), self.reserve1.clone())
        } else if token_in == self.token1 {
            (self.reserve1.clone(), self.reserve0.clone())
        } else {
            return None;
        };
        Some(PairReserves {
            pair: self.address,
            reserve_in,
            reserve_out,
        })
    }
}

/// Serves reserves from a fixed set of pools, typically a snapshot taken from chain.
#[derive(Clone, Debug, Default)]
pub struct SnapshotReserveProvider {
    pools: PoolMap,
    pairs: HashMap<(Address, Address), Address>,
}

impl SnapshotReserveProvider {
    pub fn new(pool_map: PoolMap) -> Self {
        let pairs = pool_map
            .values()
            .map(|pool| (sort_tokens(pool.token0, pool.token1), pool.address))
            .collect();
        Self {
            pools: pool_map,
            pairs,
        }
    }

    pub fn from_pools(pools: impl IntoIterator<Item = Pool>) -> Self {
        Self::new(pools.into_iter().map(|pool| (pool.address, pool)).collect())
    }

    pub fn load<P: AsRef<Path>>(snapshot_file_path: P) -> Result<Self> {
        let pool_map = read_poolmap_data_from_disk(snapshot_file_path)
            .context("Error reading reserve snapshot")?;
        Ok(Self::new(pool_map))
    }

    pub fn save<P: AsRef<Path>>(&self, snapshot_file_path: P) -> Result<()> {
        write_poolmap_data_on_disk(snapshot_file_path, &self.pools)
    }

    pub fn pools(&self) -> &PoolMap {
        &self.pools
    }
}

#[async_trait]
impl PairReserveProvider for SnapshotReserveProvider {
    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RouteError> {
        Ok(self
            .pairs
            .get(&sort_tokens(token_a, token_b))
            .copied()
            .unwrap_or(Address::ZERO))
    }

    async fn get_oriented_reserves(
        &self,
        pair: Address,
        token_in: Address,
    ) -> Result<PairReserves, RouteError> {
        let pool = self
            .pools
            .get(&pair)
            .ok_or(RouteError::PairNotFound { pair, token_in })?;
        pool.oriented(token_in)
            .ok_or_else(|| anyhow!("token {} is not part of pair {}", token_in, pair).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    #[test]
    fn new_pool_stores_canonical_order() {
        let pool = Pool::new(addr(7), addr(3), addr(1), BigUint::from(30u32), BigUint::from(10u32));
        assert_eq!(pool.token0, addr(1));
        assert_eq!(pool.reserve0, BigUint::from(10u32));
        assert_eq!(pool.reserve1, BigUint::from(30u32));
    }

    #[tokio::test]
    async fn reserves_follow_the_input_token() {
        let provider = SnapshotReserveProvider::from_pools([Pool::new(
            addr(7),
            addr(1),
            addr(3),
            BigUint::from(10u32),
            BigUint::from(30u32),
        )]);

        let pair = provider.get_pair(addr(3), addr(1)).await.unwrap();
        assert_eq!(pair, addr(7));

        let from_token1 = provider.get_oriented_reserves(pair, addr(3)).await.unwrap();
        assert_eq!(from_token1.reserve_in, BigUint::from(30u32));
        assert_eq!(from_token1.reserve_out, BigUint::from(10u32));

        let from_token0 = provider.get_oriented_reserves(pair, addr(1)).await.unwrap();
        assert_eq!(from_token0.reserve_in, BigUint::from(10u32));
    }

    #[tokio::test]
    async fn pools_with_swapped_tokens_are_still_found() {
        let swapped = Pool {
            address: addr(0x77),
            token0: addr(5),
            token1: addr(1),
            reserve0: BigUint::from(100u32),
            reserve1: BigUint::from(200u32),
        };
        let provider = SnapshotReserveProvider::from_pools([swapped]);

        let pair = provider.get_pair(addr(5), addr(1)).await.unwrap();
        assert_eq!(pair, addr(0x77));
        let reserves = provider.get_oriented_reserves(pair, addr(5)).await.unwrap();
        assert_eq!(reserves.reserve_in, BigUint::from(100u32));
        assert_eq!(reserves.reserve_out, BigUint::from(200u32));
    }

    #[tokio::test]
    async fn unknown_pair_is_not_found() {
        let provider = SnapshotReserveProvider::default();
        let pair = provider.get_pair(addr(1), addr(2)).await.unwrap();
        assert_eq!(pair, Address::ZERO);

        let err = provider.get_oriented_reserves(pair, addr(1)).await.unwrap_err();
        assert!(err.is_pair_not_found());
    }
}
