use crate::Provider;
use crate::pokebase::pokemon;
use crate::pokebase::{Outcome, Pokemon};

use std::fmt::Write;

pub struct Catch {
    state: State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    Searching(pokemon::Id),
    Confirming {
        pokemon: Pokemon,
        is_new_species: bool,
    },
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    Network(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Search(Option<pokemon::Id>),
    Fetched(Outcome),
    CatchIt,
    LeaveIt,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Search(pokemon::Id),
    Catch,
    Dismissed,
}

impl Catch {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn update(&mut self, message: Message, provider: &mut Provider) -> Action {
        match message {
            Message::Search(id) => {
                if matches!(self.state, State::Searching(_)) {
                    return Action::None;
                }

                let id = match id.map(Ok).unwrap_or_else(pokemon::Id::random) {
                    Ok(id) => id,
                    Err(error) => {
                        log::error!("{error}");
                        self.state = State::Failed(Failure::Network(error.to_string()));

                        return Action::None;
                    }
                };

                self.state = State::Searching(id);

                Action::Search(id)
            }
            Message::Fetched(outcome) => {
                let State::Searching(_) = self.state else {
                    return Action::None;
                };

                provider.receive(&outcome);

                self.state = match outcome {
                    Outcome::Found(pokemon) => State::Confirming {
                        pokemon,
                        is_new_species: provider.is_new_species(),
                    },
                    Outcome::NotFound(_) => State::Failed(Failure::NotFound),
                    Outcome::Failed(error) => State::Failed(Failure::Network(error.to_string())),
                };

                Action::None
            }
            Message::CatchIt => {
                let State::Confirming { .. } = self.state else {
                    return Action::None;
                };

                self.state = State::Idle;

                Action::Catch
            }
            Message::LeaveIt => {
                let State::Confirming { .. } = self.state else {
                    return Action::None;
                };

                self.state = State::Idle;

                Action::Dismissed
            }
            Message::Dismiss => {
                let State::Failed(_) = self.state else {
                    return Action::None;
                };

                self.state = State::Idle;

                Action::Dismissed
            }
        }
    }

    pub fn view(&self) -> String {
        match &self.state {
            State::Idle => String::new(),
            State::Searching(id) => format!("Searching for #{id}..."),
            State::Confirming {
                pokemon,
                is_new_species,
            } => {
                let mut view = format!("A wild {} appeared!\n", pokemon.name);

                let _ = writeln!(view, "Height: {}", pokemon.height);
                let _ = writeln!(view, "Weight: {}", pokemon.weight);

                if *is_new_species {
                    view.push_str("New species!\n");
                }

                view.push_str("Catch it or leave it?");
                view
            }
            State::Failed(Failure::NotFound) => "No Pokémon found".to_owned(),
            State::Failed(Failure::Network(message)) => format!("Network Error: {message}"),
        }
    }
}

impl Default for Catch {
    fn default() -> Self {
        Self::new()
    }
}
