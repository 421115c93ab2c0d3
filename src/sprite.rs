use crate::backpack::Entry;
use crate::pokebase::{self, Session};
use crate::storage;

use bytes::Bytes;
use futures_util::TryFutureExt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Returns the path of the cached sprite of `entry`, downloading it first
/// if it is not in the cache yet.
pub async fn fetch(
    entry: &Entry,
    session: &Session,
    cache: impl AsRef<Path>,
) -> Result<PathBuf, anywho::Error> {
    let path = cache_path(cache.as_ref(), &entry.sprite_url_string)?;

    let fetch_from_cache = async {
        let bytes = fs::read(&path).await?;

        Ok(Bytes::from(bytes))
    };

    let download_sprite = async {
        let sprite = pokebase::Sprite::download(&entry.sprite_url_string, session).await?;

        Ok::<_, anywho::Error>(sprite.bytes)
    };

    let bytes = fetch_from_cache
        .or_else(|_: anywho::Error| download_sprite)
        .await?;

    if !fs::try_exists(&path).await.unwrap_or_default() {
        fs::create_dir_all(path.parent().unwrap_or(&path)).await?;
        fs::write(&path, &bytes).await?;
    }

    Ok(path)
}

pub fn cache_dir() -> PathBuf {
    storage::cache_dir().join("sprites")
}

fn cache_path(cache: &Path, url: &str) -> Result<PathBuf, anywho::Error> {
    // Sprite file names are only unique together with their variant folders
    let name = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid sprite url: {url:?}"),
        )
        .into());
    }

    Ok(cache.join(name))
}
