use pokebase;

mod backpack;
mod config;
mod provider;
mod screen;
mod sprite;
mod storage;

use crate::backpack::Backpack;
use crate::config::Config;
use crate::pokebase::{Session, pokemon, search};
use crate::provider::Provider;
use crate::screen::catch;
use crate::storage::Storage;

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Catch random pokemon and keep them in your backpack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Keep all files under this directory instead of the platform ones
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a pokemon and try to catch it
    Catch {
        /// National dex number (random if omitted)
        id: Option<u32>,

        /// Catch it without asking
        #[arg(long, conflicts_with = "leave")]
        yes: bool,

        /// Leave it without asking
        #[arg(long)]
        leave: bool,
    },

    /// List the pokemon in your backpack
    #[command(alias = "ls")]
    Backpack,

    /// Show one pokemon of your backpack
    Show {
        /// Position in the backpack, as listed
        index: usize,

        /// Download and cache its sprite
        #[arg(long)]
        sprite: bool,
    },

    /// Remove the backpack file
    Clean,
}

#[tokio::main]
async fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load().await?;

    let storage = match &cli.root {
        Some(root) => Storage::at(root),
        None => Storage::new(),
    };

    let sprites = match &cli.root {
        Some(root) => root.join("caches").join("sprites"),
        None => sprite::cache_dir(),
    };

    let session = Session::new(config.api_url.clone());
    let mut provider = Provider::new(Backpack::new(storage, config.ui_testing));

    if let Command::Clean = cli.command {
        provider.clean().await;

        return Ok(());
    }

    if let Err(error) = provider.start().await {
        log::error!("{error}");
        process::exit(1);
    }

    let mut snapshots = provider.subscribe();

    let subscriber = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update();

            log::debug!(
                "Backpack changed: {} pokemons, candidate: {}",
                snapshot.pokemons.len(),
                snapshot
                    .candidate
                    .as_ref()
                    .map(|pokemon| pokemon.name.as_str())
                    .unwrap_or("none")
            );
        }
    });

    match cli.command {
        Command::Catch { id, yes, leave } => {
            let answer = if yes {
                Some(true)
            } else if leave {
                Some(false)
            } else {
                None
            };

            run_catch(&mut provider, &session, id.map(pokemon::Id::new), answer).await?;
        }
        Command::Backpack => {
            println!("{}", screen::Backpack::new().view(provider.pokemons()));
        }
        Command::Show { index, sprite } => {
            let mut backpack = screen::Backpack::new();
            backpack.update(screen::backpack::Message::Select(index), provider.pokemons());

            let Some(pokemon) = backpack.selected().and_then(|index| provider.pokemon(index))
            else {
                eprintln!("There is no pokemon at position {index}");
                process::exit(1);
            };

            println!("{}", backpack.view(provider.pokemons()));

            if sprite {
                let path = sprite::fetch(pokemon, &session, &sprites).await?;

                println!("Sprite cached at {}", path.display());
            }
        }
        Command::Clean => {}
    }

    // Closing the channel lets the subscriber drain its last snapshot.
    drop(provider);

    if let Err(error) = subscriber.await {
        log::warn!("Snapshot subscriber failed: {error}");
    }

    Ok(())
}

async fn run_catch(
    provider: &mut Provider,
    session: &Session,
    id: Option<pokemon::Id>,
    answer: Option<bool>,
) -> Result<(), anywho::Error> {
    let mut screen = screen::Catch::new();
    let mut next = Some(catch::Message::Search(id));

    while let Some(message) = next.take() {
        let action = screen.update(message, provider);

        let view = screen.view();
        if !view.is_empty() {
            println!("{view}");
        }

        next = match action {
            catch::Action::None => match screen.state() {
                catch::State::Confirming { .. } => {
                    if confirm(answer)? {
                        Some(catch::Message::CatchIt)
                    } else {
                        Some(catch::Message::LeaveIt)
                    }
                }
                catch::State::Failed(_) => Some(catch::Message::Dismiss),
                catch::State::Idle | catch::State::Searching(_) => None,
            },
            catch::Action::Search(id) => {
                Some(catch::Message::Fetched(search::search(id, session).await))
            }
            catch::Action::Catch => {
                if let Some(pokemon) = provider.catch().await? {
                    println!("Gotcha! {} was caught.", pokemon.name);
                }

                None
            }
            catch::Action::Dismissed => None,
        };
    }

    Ok(())
}

fn confirm(answer: Option<bool>) -> Result<bool, anywho::Error> {
    if let Some(answer) = answer {
        return Ok(answer);
    }

    print!("Catch it? [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
