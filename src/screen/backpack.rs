use crate::backpack::Entry;

use std::fmt::Write;

pub struct Backpack {
    selected: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Select(usize),
    Back,
}

impl Backpack {
    pub fn new() -> Self {
        Self { selected: None }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn update(&mut self, message: Message, pokemons: &[Entry]) {
        match message {
            Message::Select(index) => {
                if index < pokemons.len() {
                    self.selected = Some(index);
                } else {
                    log::warn!("No pokemon at index {index}");
                }
            }
            Message::Back => {
                self.selected = None;
            }
        }
    }

    pub fn view(&self, pokemons: &[Entry]) -> String {
        match self.selected.and_then(|index| pokemons.get(index)) {
            Some(pokemon) => detail(pokemon),
            None => grid(pokemons),
        }
    }
}

impl Default for Backpack {
    fn default() -> Self {
        Self::new()
    }
}

fn grid(pokemons: &[Entry]) -> String {
    if pokemons.is_empty() {
        return "Your backpack is empty. Go catch some pokemon!".to_owned();
    }

    let mut view = String::new();

    for (index, pokemon) in pokemons.iter().enumerate() {
        let _ = writeln!(
            view,
            "{index:>3}  #{order:<5} {name:<16} {types}",
            order = pokemon.order,
            name = pokemon.name,
            types = pokemon.types.join("/"),
        );
    }

    let _ = write!(view, "{} caught", pokemons.len());

    view
}

fn detail(pokemon: &Entry) -> String {
    let mut view = String::new();

    let _ = writeln!(view, "{}", pokemon.name);
    let _ = writeln!(view, "Species: {}", pokemon.species);
    let _ = writeln!(view, "Height: {}", pokemon.height);
    let _ = writeln!(view, "Weight: {}", pokemon.weight);
    let _ = writeln!(view, "Base experience: {}", pokemon.base_experience);
    let _ = writeln!(view, "Types: {}", pokemon.types.join(", "));
    let _ = writeln!(view, "Sprite: {}", pokemon.sprite_url_string);
    let _ = write!(
        view,
        "Caught: {}",
        pokemon.date.format("%Y-%m-%d %H:%M UTC")
    );

    view
}
