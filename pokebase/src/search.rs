use crate::pokemon;
use crate::{Error, Pokemon, Session};

/// The result of looking up a [`Pokemon`] by identifier.
#[derive(Debug, Clone)]
pub enum Outcome {
    Found(Pokemon),
    NotFound(pokemon::Id),
    Failed(Error),
}

impl From<Result<Pokemon, Error>> for Outcome {
    fn from(result: Result<Pokemon, Error>) -> Self {
        match result {
            Ok(pokemon) => Outcome::Found(pokemon),
            Err(Error::PokemonNotFound(id)) => Outcome::NotFound(id),
            Err(error) => Outcome::Failed(error),
        }
    }
}

pub async fn search(id: pokemon::Id, session: &Session) -> Outcome {
    let outcome = Outcome::from(session.pokeapi.fetch_pokemon(id).await);

    match &outcome {
        Outcome::Found(pokemon) => log::info!("Found {} (#{id})", pokemon.name),
        Outcome::NotFound(_) => log::info!("No pokemon with number {id}"),
        Outcome::Failed(error) => log::warn!("Search for #{id} failed: {error}"),
    }

    outcome
}
