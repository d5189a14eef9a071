use super::constants::FEE_FACTOR;
use super::types::{EarnConfig, PoolTokens, Route, SwapRoute, ZapLiquidityConfig};
use alloy::primitives::Address;

pub fn build_earn_config(reward: Address, route: &Route, pool: &PoolTokens) -> EarnConfig {
    let (swap_route, lp_subtoken_in) = match route {
        Route::ZeroHop => (
            SwapRoute {
                fee_factors: vec![],
                pairs_path: vec![],
                tokens_path: vec![],
            },
            reward,
        ),
        Route::Swap(path) => (
            SwapRoute {
                fee_factors: vec![FEE_FACTOR; path.hops()],
                pairs_path: path.pairs.clone(),
                tokens_path: path.tokens.clone(),
            },
            *path.terminal().unwrap_or(&reward),
        ),
    };

    EarnConfig {
        reward_token: reward,
        swap_route,
        zap_liquidity_config: ZapLiquidityConfig {
            fee_factor: FEE_FACTOR,
            lp_subtoken_in,
            lp_subtoken_out: pool.other(&lp_subtoken_in),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TradePath;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    #[test]
    fn zero_hop_zaps_from_reward() {
        let pool = PoolTokens::new(addr(1), addr(2));
        let config = build_earn_config(addr(2), &Route::ZeroHop, &pool);

        assert!(config.swap_route.fee_factors.is_empty());
        assert!(config.swap_route.pairs_path.is_empty());
        assert!(config.swap_route.tokens_path.is_empty());
        assert_eq!(config.zap_liquidity_config.lp_subtoken_in, addr(2));
        assert_eq!(config.zap_liquidity_config.lp_subtoken_out, addr(1));
        assert_eq!(config.zap_liquidity_config.fee_factor, FEE_FACTOR);
    }

    #[test]
    fn swap_route_lands_on_terminal_token() {
        let pool = PoolTokens::new(addr(1), addr(2));
        let route = Route::Swap(TradePath {
            tokens: vec![addr(5), addr(9), addr(2)],
            pairs: vec![addr(59), addr(92)],
        });
        let config = build_earn_config(addr(5), &route, &pool);

        assert_eq!(config.reward_token, addr(5));
        assert_eq!(config.swap_route.fee_factors, vec![FEE_FACTOR, FEE_FACTOR]);
        assert_eq!(config.swap_route.pairs_path, vec![addr(59), addr(92)]);
        assert_eq!(config.swap_route.tokens_path, vec![addr(5), addr(9), addr(2)]);
        assert_eq!(config.zap_liquidity_config.lp_subtoken_in, addr(2));
        assert_eq!(config.zap_liquidity_config.lp_subtoken_out, addr(1));
    }

    #[test]
    fn serializes_to_camel_case() {
        let pool = PoolTokens::new(addr(1), addr(2));
        let json = serde_json::to_value(build_earn_config(addr(1), &Route::ZeroHop, &pool)).unwrap();

        assert!(json.get("rewardToken").is_some());
        assert!(json["swapRoute"]["feeFactors"].as_array().unwrap().is_empty());
        assert_eq!(json["zapLiquidityConfig"]["feeFactor"], 9970);
        assert!(json["zapLiquidityConfig"].get("lpSubtokenIn").is_some());
        assert!(json["zapLiquidityConfig"].get("lpSubtokenOut").is_some());
    }
}
