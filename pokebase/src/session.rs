pub mod pokeapi;

use pokeapi::PokeApi;

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Session {
    pub pokeapi: PokeApi,
}

impl Session {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            pokeapi: PokeApi::new(api_url),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(pokeapi::DEFAULT_URL)
    }
}

pub(crate) static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .timeout(Duration::from_secs(3))
        .build()
        .expect("Build reqwest client")
});

pub(crate) async fn retry<T, E, F>(mut retries: usize, f: impl Fn() -> F) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    loop {
        let result = f().await;

        match result {
            Ok(response) => {
                break Ok(response);
            }
            Err(error) => {
                if retries > 0 {
                    log::warn!(
                        "{error} ({retries} {} left)",
                        if retries == 1 { "retry" } else { "retries" }
                    );
                    retries -= 1;
                } else {
                    break Err(error);
                }
            }
        }
    }
}
