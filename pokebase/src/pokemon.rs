use crate::Error;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A creature record as served by the PokeAPI `pokemon` endpoint.
///
/// Only the fields the Pokedex needs are decoded; the rest of the
/// (rather large) payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: Id,
    pub name: String,
    pub species: Resource,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub order: i32,
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<Type>,
}

impl Pokemon {
    /// The names of the types of the [`Pokemon`], in slot order.
    pub fn type_names(&self) -> Vec<String> {
        let mut types: Vec<_> = self.types.iter().collect();
        types.sort_by_key(|type_| type_.slot);

        types
            .into_iter()
            .map(|type_| type_.type_.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub(crate) u32);

impl Id {
    /// The highest national dex number the random search picks from.
    pub const MAX: u32 = 898;

    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Picks an identifier uniformly in `1..=Id::MAX` using OS entropy.
    pub fn random() -> Result<Self, Error> {
        loop {
            if let Some(id) = Self::from_entropy(getrandom::u32()?) {
                return Ok(id);
            }
        }
    }

    /// Maps raw entropy onto `1..=Id::MAX`, rejecting the tail of the `u32`
    /// range that would otherwise favor the low identifiers.
    fn from_entropy(entropy: u32) -> Option<Self> {
        let limit = u32::MAX - u32::MAX % Self::MAX;

        (entropy < limit).then(|| Self(entropy % Self::MAX + 1))
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named link to another PokeAPI resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub front_female: Option<String>,
    #[serde(default)]
    pub front_shiny_female: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub back_female: Option<String>,
    #[serde(default)]
    pub back_shiny_female: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub slot: u32,
    #[serde(rename = "type")]
    pub type_: Resource,
}
