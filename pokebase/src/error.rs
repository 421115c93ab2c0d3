use crate::pokemon;

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("pokemon not found: {0}")]
    PokemonNotFound(pokemon::Id),
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(getrandom::Error),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<getrandom::Error> for Error {
    fn from(error: getrandom::Error) -> Self {
        Self::EntropyUnavailable(error)
    }
}
