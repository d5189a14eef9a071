use super::error::RouteError;
use super::types::PairReserves;
use alloy::primitives::Address;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::debug;

/// Directed hop (token_in, token_out) whose reserves are oriented with token_in as input.
pub type Hop = (Address, Address);
/// Reserves per hop, `None` when the pair for that hop does not exist.
pub type HopReserves = HashMap<Hop, Option<PairReserves>>;

/// Read access to AMM pair reserves. Implementations must be safe to call
/// concurrently since all lookups for a reward token are issued at once.
#[async_trait]
pub trait PairReserveProvider: Send + Sync {
    /// Pair address for two tokens in any order, the zero address if none exists.
    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RouteError>;

    /// Reserves of `pair` with `reserve_in` belonging to `token_in`, whatever
    /// the pair's storage order. Fails with `PairNotFound` for unknown or zero pairs.
    async fn get_oriented_reserves(
        &self,
        pair: Address,
        token_in: Address,
    ) -> Result<PairReserves, RouteError>;
}

/// Resolves the pair for a hop and reads its reserves. A missing pair is not an error here.
pub async fn lookup_hop(
    provider: &dyn PairReserveProvider,
    token_in: Address,
    token_out: Address,
) -> Result<Option<PairReserves>, RouteError> {
    let pair = provider.get_pair(token_in, token_out).await?;
    match provider.get_oriented_reserves(pair, token_in).await {
        Ok(reserves) => Ok(Some(reserves)),
        Err(e) if e.is_pair_not_found() => {
            debug!(%token_in, %token_out, "no pair for hop");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Looks up every hop concurrently and waits for all of them. The first
/// provider failure aborts the whole fan-out.
pub async fn fetch_hop_reserves(
    provider: &dyn PairReserveProvider,
    hops: &[Hop],
) -> Result<HopReserves, RouteError> {
    let lookups = hops
        .iter()
        .map(|&(token_in, token_out)| lookup_hop(provider, token_in, token_out));
    let results = try_join_all(lookups).await?;

    Ok(hops.iter().copied().zip(results).collect())
}
