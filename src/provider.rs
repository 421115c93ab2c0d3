use crate::backpack::{Backpack, Entry};
use crate::pokebase::{Outcome, Pokemon};
use crate::storage;

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// An immutable view of the provider state, published after every change.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub candidate: Option<Pokemon>,
    pub pokemons: Arc<[Entry]>,
}

pub struct Provider {
    backpack: Backpack,
    sender: watch::Sender<Snapshot>,
}

impl Provider {
    pub fn new(backpack: Backpack) -> Self {
        let (sender, _receiver) = watch::channel(Snapshot::default());

        Self { backpack, sender }
    }

    pub async fn start(&mut self) -> Result<(), storage::Error> {
        self.backpack.load().await?;
        self.backpack.sort_by_order();
        self.publish();

        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// Takes in a search result, offering the pokemon as the catch candidate
    /// if one was found.
    pub fn receive(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Found(pokemon) => self.offer(pokemon.clone()),
            Outcome::NotFound(_) | Outcome::Failed(_) => self.publish(),
        }
    }

    pub fn offer(&mut self, candidate: Pokemon) {
        self.backpack.candidate = Some(candidate);
        self.publish();
    }

    /// Commits the current candidate into the backpack.
    ///
    /// Returns `Ok(None)` without touching the backpack if there is no
    /// candidate.
    pub async fn catch(&mut self) -> Result<Option<Entry>, storage::Error> {
        let Some(candidate) = &self.backpack.candidate else {
            return Ok(None);
        };

        let entry = Entry::caught(candidate, Utc::now());
        log::info!("Caught {} (order {})", entry.name, entry.order);

        self.backpack.add(entry.clone()).await?;
        self.publish();

        Ok(Some(entry))
    }

    pub fn is_new_species(&self) -> bool {
        self.backpack.is_new_species()
    }

    pub fn candidate(&self) -> Option<&Pokemon> {
        self.backpack.candidate.as_ref()
    }

    pub fn pokemon(&self, index: usize) -> Option<&Entry> {
        self.backpack.pokemons.get(index)
    }

    pub fn pokemons(&self) -> &[Entry] {
        &self.backpack.pokemons
    }

    pub async fn clean(&self) {
        self.backpack.clean().await;
    }

    fn publish(&self) {
        let _ = self.sender.send_replace(Snapshot {
            candidate: self.backpack.candidate.clone(),
            pokemons: Arc::from(self.backpack.pokemons.as_slice()),
        });
    }
}
