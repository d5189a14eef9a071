use alloy::primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// The pair does not exist, either because the factory returned the zero
    /// address or because the pair is unknown to the provider.
    #[error("pair {pair} not found for token {token_in}")]
    PairNotFound { pair: Address, token_in: Address },

    #[error("no direct or one-hop route found for reward token {reward}")]
    NoRouteFound { reward: Address },

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl RouteError {
    pub fn is_pair_not_found(&self) -> bool {
        matches!(self, RouteError::PairNotFound { .. })
    }
}
