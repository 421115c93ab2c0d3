use crate::pokemon;
use crate::session;
use crate::{Error, Pokemon};

use bytes::Bytes;
use reqwest::StatusCode;

pub const DEFAULT_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        log::info!("PokeAPI session started ({base_url})");

        Self {
            client: session::CLIENT.clone(),
            base_url,
        }
    }

    pub async fn fetch_pokemon(&self, id: pokemon::Id) -> Result<Pokemon, Error> {
        let url = self.pokemon_url(id);

        log::info!("Fetching pokemon: {url}");
        let response = session::retry(2, || self.client.get(&url).send()).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::PokemonNotFound(id));
        }

        Ok(response.error_for_status()?.json().await?)
    }

    pub async fn download_sprite(&self, url: &str) -> Result<Bytes, Error> {
        log::info!("Downloading sprite: {url}");
        let response = session::retry(2, || self.client.get(url).send()).await?;

        Ok(response.error_for_status()?.bytes().await?)
    }

    fn pokemon_url(&self, id: pokemon::Id) -> String {
        format!("{base}/pokemon/{id}", base = self.base_url)
    }
}
