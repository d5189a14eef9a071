use super::pair::{Hop, HopReserves};
use super::types::{PairReserves, PoolTokens, TokenPath, TradePath};
use alloy::primitives::Address;
use tracing::debug;

/// Candidate token paths for a reward token, in ranking order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidates {
    /// The reward token is a pool token, nothing to swap.
    ZeroHop,
    Paths(Vec<TokenPath>),
}

/// A candidate whose pairs all exist, with the reserves of every hop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateRoute {
    pub path: TradePath,
    pub hops: Vec<PairReserves>,
}

// Direct routes come before one-hop routes, token0 before token1 within each
// tier. Selection breaks ties on this order.
pub fn enumerate_candidates(
    reward: Address,
    pool: &PoolTokens,
    intermediary: Address,
) -> Candidates {
    if pool.contains(&reward) {
        return Candidates::ZeroHop;
    }
    let bases = [pool.token0, pool.token1];

    let mut paths: Vec<TokenPath> = bases.iter().map(|base| vec![reward, *base]).collect();
    // TODO: take a list of intermediaries from the chain config instead of the single wrapped native token
    if reward != intermediary {
        paths.extend(
            bases
                .iter()
                .filter(|base| **base != intermediary)
                .map(|base| vec![reward, intermediary, *base]),
        );
    }
    Candidates::Paths(paths)
}

/// Every distinct hop the paths need, in first-seen order.
pub fn required_hops(paths: &[TokenPath]) -> Vec<Hop> {
    let mut hops: Vec<Hop> = vec![];
    for path in paths {
        for window in path.windows(2) {
            let hop = (window[0], window[1]);
            if !hops.contains(&hop) {
                hops.push(hop);
            }
        }
    }
    hops
}

/// Attaches reserves to each path, dropping paths that need a missing pair.
pub fn materialize_paths(paths: &[TokenPath], reserves: &HopReserves) -> Vec<CandidateRoute> {
    paths
        .iter()
        .filter_map(|tokens| {
            let hops: Option<Vec<PairReserves>> = tokens
                .windows(2)
                .map(|window| reserves.get(&(window[0], window[1])).cloned().flatten())
                .collect();

            match hops {
                Some(hops) => Some(CandidateRoute {
                    path: TradePath {
                        tokens: tokens.clone(),
                        pairs: hops.iter().map(|hop| hop.pair).collect(),
                    },
                    hops,
                }),
                None => {
                    debug!(path = ?tokens, "dropping candidate with missing pair");
                    None
                }
            }
        })
        .collect()
}
