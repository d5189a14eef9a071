use super::paths::CandidateRoute;
use super::types::{NormalizedRoute, PairReserves};
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

/// Liquidity depth of a route in reward token units, comparable across hop counts.
///
/// A direct route scores the reward reserve of its pair. A route through an
/// intermediary scores `rI * r'I / (r'I + rO)` where `(rI, rO)` are the
/// reward/intermediary reserves and `r'I` is the intermediary reserve of the
/// second pair. Returns `None` when the divisor is zero or the hop count is
/// not one or two.
pub fn normalized_depth(hops: &[PairReserves]) -> Option<BigUint> {
    match hops {
        [direct] => Some(direct.reserve_in.clone()),
        [first, second] => {
            let divisor = &second.reserve_in + &first.reserve_out;
            if divisor.is_zero() {
                return None;
            }
            Some(&first.reserve_in * &second.reserve_in / divisor)
        }
        _ => None,
    }
}

pub fn normalize_routes(candidates: Vec<CandidateRoute>) -> Vec<NormalizedRoute> {
    candidates
        .into_iter()
        .filter_map(|candidate| match normalized_depth(&candidate.hops) {
            Some(normalized_depth) => Some(NormalizedRoute {
                path: candidate.path,
                normalized_depth,
            }),
            None => {
                debug!(path = ?candidate.path.tokens, "excluding route with zero divisor");
                None
            }
        })
        .collect()
}

/// Deepest route; on equal depth the earlier route wins.
pub fn select_best_route(routes: Vec<NormalizedRoute>) -> Option<NormalizedRoute> {
    routes.into_iter().fold(None, |best, route| match best {
        Some(best) if route.normalized_depth <= best.normalized_depth => Some(best),
        _ => Some(route),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TradePath;
    use alloy::primitives::Address;

    fn hop(reserve_in: u64, reserve_out: u64) -> PairReserves {
        PairReserves {
            pair: Address::with_last_byte(1),
            reserve_in: BigUint::from(reserve_in),
            reserve_out: BigUint::from(reserve_out),
        }
    }

    fn route(tag: u8, depth: u64) -> NormalizedRoute {
        NormalizedRoute {
            path: TradePath {
                tokens: vec![Address::with_last_byte(100), Address::with_last_byte(tag)],
                pairs: vec![Address::with_last_byte(tag)],
            },
            normalized_depth: BigUint::from(depth),
        }
    }

    #[test]
    fn direct_depth_is_reward_reserve() {
        assert_eq!(normalized_depth(&[hop(1000, 7)]), Some(BigUint::from(1000u32)));
    }

    #[test]
    fn one_hop_depth_truncates() {
        // 1000 * 300 / (300 + 400) = 428.57..
        assert_eq!(
            normalized_depth(&[hop(1000, 400), hop(300, 5)]),
            Some(BigUint::from(428u32))
        );
    }

    #[test]
    fn one_hop_depth_with_zero_divisor_is_excluded() {
        assert_eq!(normalized_depth(&[hop(1000, 0), hop(0, 5)]), None);
    }

    #[test]
    fn depth_does_not_overflow_on_large_reserves() {
        let big = BigUint::from(u128::MAX);
        let first = PairReserves {
            pair: Address::ZERO,
            reserve_in: big.clone(),
            reserve_out: big.clone(),
        };
        let second = PairReserves {
            pair: Address::ZERO,
            reserve_in: big.clone(),
            reserve_out: BigUint::zero(),
        };
        // big * big / (2 * big) = big / 2
        assert_eq!(normalized_depth(&[first, second]), Some(big / 2u32));
    }

    #[test]
    fn longer_paths_are_not_scored() {
        assert_eq!(normalized_depth(&[hop(1, 1), hop(1, 1), hop(1, 1)]), None);
        assert_eq!(normalized_depth(&[]), None);
    }

    #[test]
    fn strictly_deeper_route_wins() {
        let best = select_best_route(vec![route(1, 10), route(2, 30), route(3, 20)]);
        assert_eq!(best, Some(route(2, 30)));
    }

    #[test]
    fn ties_keep_the_earliest_route() {
        let best = select_best_route(vec![route(1, 5), route(2, 50), route(3, 50)]);
        assert_eq!(best, Some(route(2, 50)));
    }

    #[test]
    fn empty_set_has_no_route() {
        assert_eq!(select_best_route(vec![]), None);
    }
}
