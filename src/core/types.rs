use alloy::primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token path from the reward token to a pool token, e.g. [reward, weth, token0].
pub type TokenPath = Vec<Address>;
/// Pools keyed by pair address.
pub type PoolMap = HashMap<Address, Pool>;

/// A UniswapV2 style pair as stored on chain, token0 < token1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

/// Reserves of a pair seen from a caller chosen input token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairReserves {
    pub pair: Address,
    pub reserve_in: BigUint,
    pub reserve_out: BigUint,
}

/// The two constituent tokens of the LP being zapped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolTokens {
    pub token0: Address,
    pub token1: Address,
}

impl PoolTokens {
    pub fn new(token0: Address, token1: Address) -> Self {
        Self { token0, token1 }
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// The pool token that is not `token`.
    pub fn other(&self, token: &Address) -> Address {
        if self.token0 == *token {
            self.token1
        } else {
            self.token0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradePath {
    pub tokens: TokenPath,  // [reward, .., pool token]
    pub pairs: Vec<Address>, // one pair per hop
}

impl TradePath {
    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    pub fn terminal(&self) -> Option<&Address> {
        self.tokens.last()
    }
}

/// How a reward token reaches the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// The reward token already is one of the pool tokens.
    ZeroHop,
    Swap(TradePath),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRoute {
    pub path: TradePath,
    pub normalized_depth: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRoute {
    pub fee_factors: Vec<u32>,
    pub pairs_path: Vec<Address>,
    pub tokens_path: Vec<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapLiquidityConfig {
    pub fee_factor: u32,
    pub lp_subtoken_in: Address,
    pub lp_subtoken_out: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnConfig {
    pub reward_token: Address,
    pub swap_route: SwapRoute,
    pub zap_liquidity_config: ZapLiquidityConfig,
}
