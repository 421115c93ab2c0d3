use crate::pokebase::Pokemon;
use crate::storage::{self, Directory, Storage};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

/// A caught pokemon, as persisted in the backpack file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub weight: u32,
    pub height: u32,
    pub order: i32,
    pub sprite_url_string: String,
    pub date: DateTime<Utc>,
    pub species: String,
    pub base_experience: u32,
    pub types: Vec<String>,
}

impl Entry {
    pub fn caught(pokemon: &Pokemon, date: DateTime<Utc>) -> Self {
        Self {
            name: pokemon.name.clone(),
            weight: pokemon.weight,
            height: pokemon.height,
            order: pokemon.order,
            sprite_url_string: pokemon.sprites.front_default.clone().unwrap_or_default(),
            date,
            species: pokemon.species.name.clone(),
            base_experience: pokemon.base_experience.unwrap_or_default(),
            types: pokemon.type_names(),
        }
    }
}

pub struct Backpack {
    pub candidate: Option<Pokemon>,
    pub pokemons: Vec<Entry>,
    storage: Storage,
    directory: Directory,
}

impl Backpack {
    pub const FILE: &str = "pokemons.json";

    pub fn new(storage: Storage, ui_testing: bool) -> Self {
        Self {
            candidate: None,
            pokemons: Vec::new(),
            storage,
            directory: if ui_testing {
                Directory::Caches
            } else {
                Directory::Documents
            },
        }
    }

    pub fn directory(&self) -> Directory {
        self.directory
    }

    pub fn is_new_species(&self) -> bool {
        let Some(candidate) = &self.candidate else {
            return false;
        };

        !self
            .pokemons
            .iter()
            .any(|pokemon| pokemon.species == candidate.species.name)
    }

    pub async fn load(&mut self) -> Result<(), storage::Error> {
        let bytes = match self.storage.load(Self::FILE, self.directory).await {
            Ok(bytes) => bytes,
            Err(storage::Error::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
                log::info!("No backpack found, starting empty");
                self.pokemons = Vec::new();

                return Ok(());
            }
            Err(error) => return Err(error),
        };

        self.pokemons =
            serde_json::from_slice(&bytes).map_err(|error| storage::Error::Decode(Arc::new(error)))?;

        log::info!(
            "Loaded backpack with {} pokemons ({:?})",
            self.pokemons.len(),
            self.directory()
        );

        Ok(())
    }

    pub async fn save(&self) -> Result<(), storage::Error> {
        self.write(&self.pokemons).await
    }

    /// Adds an entry, keeping the backpack sorted.
    ///
    /// The pokemons in memory only change once the new list is persisted.
    pub async fn add(&mut self, entry: Entry) -> Result<(), storage::Error> {
        let mut pokemons = Vec::with_capacity(self.pokemons.len() + 1);
        pokemons.extend_from_slice(&self.pokemons);
        pokemons.push(entry);
        sort(&mut pokemons);

        self.write(&pokemons).await?;
        self.pokemons = pokemons;

        Ok(())
    }

    /// Removes the backpack file. The pokemons in memory are left alone.
    pub async fn clean(&self) {
        self.storage.remove(Self::FILE, self.directory).await;

        log::info!("Backpack file removed");
    }

    pub fn sort_by_order(&mut self) {
        sort(&mut self.pokemons);
    }

    async fn write(&self, pokemons: &[Entry]) -> Result<(), storage::Error> {
        let bytes = serde_json::to_vec(pokemons)
            .map_err(|error| storage::Error::Encode(Arc::new(error)))?;

        self.storage
            .save(&bytes, Self::FILE, self.directory)
            .await?;

        log::info!("Saved backpack with {} pokemons", pokemons.len());

        Ok(())
    }
}

fn sort(pokemons: &mut [Entry]) {
    pokemons.sort_by_key(|pokemon| pokemon.order);
}


#[cfg(test)]
mod tests {
    use super::fixture;
    use super::*;

    fn backpack(root: &tempfile::TempDir) -> Backpack {
        Backpack::new(Storage::at(root.path()), false)
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.pokemons.push(fixture::cascoon());

        backpack.load().await.unwrap();

        assert!(backpack.pokemons.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.pokemons = vec![fixture::cascoon(), fixture::entry("cranidos", 519)];

        backpack.save().await.unwrap();

        let mut reloaded = self::backpack(&root);
        reloaded.load().await.unwrap();

        assert_eq!(reloaded.pokemons, backpack.pokemons);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_decode_error() {
        let root = tempfile::tempdir().unwrap();
        let storage = Storage::at(root.path());
        storage
            .save(b"{ not json", Backpack::FILE, Directory::Documents)
            .await
            .unwrap();

        let mut backpack = Backpack::new(storage, false);

        assert!(matches!(
            backpack.load().await,
            Err(storage::Error::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_storage_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut backpack = Backpack::new(Storage::at(file.path()), false);
        backpack.pokemons.push(fixture::cascoon());

        assert!(matches!(
            backpack.load().await,
            Err(storage::Error::Io(_))
        ));
        assert_eq!(backpack.pokemons.len(), 1);
    }

    #[tokio::test]
    async fn failed_add_keeps_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut backpack = Backpack::new(Storage::at(file.path()), false);
        backpack.pokemons.push(fixture::cascoon());

        assert!(backpack.add(fixture::entry("cranidos", 519)).await.is_err());
        assert_eq!(backpack.pokemons, [fixture::cascoon()]);
    }

    #[tokio::test]
    async fn add_keeps_order() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.pokemons = vec![fixture::cascoon(), fixture::entry("cranidos", 519)];

        backpack.add(fixture::entry("pikachu", 35)).await.unwrap();

        let mut reloaded = self::backpack(&root);
        reloaded.load().await.unwrap();

        assert_eq!(backpack.pokemons[0].name, "pikachu");
        assert_eq!(reloaded.pokemons, backpack.pokemons);
    }

    #[tokio::test]
    async fn ui_testing_uses_caches() {
        let root = tempfile::tempdir().unwrap();
        let storage = Storage::at(root.path());
        let mut backpack = Backpack::new(storage.clone(), true);
        backpack.pokemons.push(fixture::cascoon());

        backpack.save().await.unwrap();

        assert_eq!(backpack.directory(), Directory::Caches);
        assert!(storage.exists(Backpack::FILE, Directory::Caches).await.unwrap());
        assert!(!storage.exists(Backpack::FILE, Directory::Documents).await.unwrap());
    }

    #[tokio::test]
    async fn clean_keeps_memory() {
        let root = tempfile::tempdir().unwrap();
        let storage = Storage::at(root.path());
        let mut backpack = Backpack::new(storage.clone(), false);
        backpack.pokemons.push(fixture::cascoon());
        backpack.save().await.unwrap();

        backpack.clean().await;

        assert_eq!(backpack.pokemons.len(), 1);
        assert!(!storage.exists(Backpack::FILE, Directory::Documents).await.unwrap());

        backpack.load().await.unwrap();
        assert!(backpack.pokemons.is_empty());
    }

    #[test]
    fn sorting_is_ascending_and_stable() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.pokemons = vec![
            fixture::entry("cranidos", 519),
            fixture::entry("cascoon", 350),
            fixture::entry("pikachu", 35),
            fixture::entry("pichu", 350),
        ];

        backpack.sort_by_order();

        let names: Vec<_> = backpack
            .pokemons
            .iter()
            .map(|pokemon| pokemon.name.as_str())
            .collect();

        assert_eq!(names, ["pikachu", "cascoon", "pichu", "cranidos"]);
    }

    #[test]
    fn no_candidate_is_never_new() {
        let root = tempfile::tempdir().unwrap();
        let backpack = backpack(&root);

        assert!(!backpack.is_new_species());
    }

    #[test]
    fn candidate_in_empty_backpack_is_new() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.candidate = Some(fixture::cranidos());

        assert!(backpack.is_new_species());
    }

    #[test]
    fn owned_species_is_not_new() {
        let root = tempfile::tempdir().unwrap();
        let mut backpack = backpack(&root);
        backpack.candidate = Some(fixture::pokemon("cascoon", "cascoon", 350));
        backpack.pokemons.push(fixture::cascoon());

        assert!(!backpack.is_new_species());

        backpack.candidate = Some(fixture::cranidos());

        assert!(backpack.is_new_species());
    }

    #[test]
    fn entry_maps_candidate_fields() {
        let entry = Entry::caught(&fixture::cranidos(), fixture::date());

        assert_eq!(entry.name, "cranidos");
        assert_eq!(entry.species, "cranidos");
        assert_eq!(entry.order, 519);
        assert_eq!(entry.weight, 315);
        assert_eq!(entry.height, 9);
        assert_eq!(entry.base_experience, 70);
        assert_eq!(entry.types, ["rock"]);
        assert!(entry.sprite_url_string.ends_with("/519.png"));
    }

    #[test]
    fn entry_uses_camel_case_keys() {
        let json = serde_json::to_value(fixture::cascoon()).unwrap();

        assert_eq!(json["spriteUrlString"], fixture::cascoon().sprite_url_string);
        assert_eq!(json["baseExperience"], 72);
        assert_eq!(json["date"], "2024-05-25T12:00:00Z");
    }
}
