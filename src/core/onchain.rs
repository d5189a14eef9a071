use super::error::RouteError;
use super::pair::PairReserveProvider;
use super::types::{PairReserves, Pool, PoolMap, PoolTokens};
use super::Result;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use anyhow::Context;
use async_trait::async_trait;
use num_bigint::BigUint;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

sol! {
    #[sol(rpc)]
    interface IMinichefV2 {
        function lpToken(uint256 pid) external view returns (address);
    }

    #[sol(rpc)]
    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function factory() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }

    #[sol(rpc)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IERC20 {
        function symbol() external view returns (string memory);
    }
}

/// The LP token staked in a farm pool and its constituents.
#[derive(Clone, Debug)]
pub struct FarmPool {
    pub asset: Address,
    pub factory: Address,
    pub tokens: PoolTokens,
    pub symbol0: String,
    pub symbol1: String,
}

pub fn connect(rpc_url: &str) -> Result<DynProvider> {
    let url: Url = rpc_url
        .parse()
        .with_context(|| format!("Invalid RPC URL {}", rpc_url))?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

// Reads the LP token of `pid` from a MinichefV2 farm, then the pair behind it
pub async fn read_farm_pool(provider: &DynProvider, farm: Address, pid: u64) -> Result<FarmPool> {
    let minichef = IMinichefV2::new(farm, provider);
    let asset = minichef
        .lpToken(U256::from(pid))
        .call()
        .await
        .with_context(|| format!("Error reading lpToken({}) from farm {}", pid, farm))?;

    let pair = IUniswapV2Pair::new(asset, provider);
    let factory = pair.factory().call().await.context("Error reading pair factory")?;
    let token0 = pair.token0().call().await.context("Error reading pair token0")?;
    let token1 = pair.token1().call().await.context("Error reading pair token1")?;

    let symbol0 = IERC20::new(token0, provider)
        .symbol()
        .call()
        .await
        .with_context(|| format!("Error reading symbol of {}", token0))?;
    let symbol1 = IERC20::new(token1, provider)
        .symbol()
        .call()
        .await
        .with_context(|| format!("Error reading symbol of {}", token1))?;

    Ok(FarmPool {
        asset,
        factory,
        tokens: PoolTokens::new(token0, token1),
        symbol0,
        symbol1,
    })
}

/// Reads pairs from a UniswapV2 factory over RPC, remembering every pool it reads.
#[derive(Clone)]
pub struct OnchainReserveProvider {
    provider: DynProvider,
    factory: Address,
    recorded: Arc<Mutex<PoolMap>>,
}

impl OnchainReserveProvider {
    pub fn new(provider: DynProvider, factory: Address) -> Self {
        Self {
            provider,
            factory,
            recorded: Arc::new(Mutex::new(PoolMap::new())),
        }
    }

    /// Every pool read so far, usable as a reserve snapshot.
    pub async fn recorded_pools(&self) -> PoolMap {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl PairReserveProvider for OnchainReserveProvider {
    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RouteError> {
        let factory = IUniswapV2Factory::new(self.factory, &self.provider);
        let pair = factory
            .getPair(token_a, token_b)
            .call()
            .await
            .with_context(|| format!("Error calling getPair({}, {})", token_a, token_b))?;
        Ok(pair)
    }

    async fn get_oriented_reserves(
        &self,
        pair: Address,
        token_in: Address,
    ) -> Result<PairReserves, RouteError> {
        if pair == Address::ZERO {
            return Err(RouteError::PairNotFound { pair, token_in });
        }
        let contract = IUniswapV2Pair::new(pair, &self.provider);
        let (token0, token1, reserves) = tokio::try_join!(
            async { contract.token0().call().await },
            async { contract.token1().call().await },
            async { contract.getReserves().call().await },
        )
        .with_context(|| format!("Error reading reserves of pair {}", pair))?;

        let pool = Pool {
            address: pair,
            token0,
            token1,
            reserve0: BigUint::from_bytes_be(&reserves.reserve0.to_be_bytes_vec()),
            reserve1: BigUint::from_bytes_be(&reserves.reserve1.to_be_bytes_vec()),
        };
        debug!(%pair, reserve0 = %pool.reserve0, reserve1 = %pool.reserve1, "read pair reserves");

        let oriented = pool.oriented(token_in).ok_or_else(|| {
            RouteError::from(anyhow::anyhow!("token {} is not part of pair {}", token_in, pair))
        })?;
        self.recorded.lock().await.insert(pair, pool);
        Ok(oriented)
    }
}
