use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    /// Durable, user-owned data.
    Documents,
    /// Volatile data the platform may evict. Used while UI testing.
    Caches,
}

/// Whole-file byte storage inside the platform directories.
///
/// There is no locking and no atomic rename: a crash halfway through
/// [`Storage::save`] can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct Storage {
    documents: PathBuf,
    caches: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            documents: data_dir(),
            caches: cache_dir(),
        }
    }

    /// A [`Storage`] with both directories nested under `root`.
    pub fn at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();

        Self {
            documents: root.join("documents"),
            caches: root.join("caches"),
        }
    }

    pub fn path(&self, name: &str, directory: Directory) -> PathBuf {
        self.dir(directory).join(name)
    }

    pub async fn exists(&self, name: &str, directory: Directory) -> Result<bool, Error> {
        Ok(fs::try_exists(self.path(name, directory)).await?)
    }

    pub async fn load(&self, name: &str, directory: Directory) -> Result<Vec<u8>, Error> {
        Ok(fs::read(self.path(name, directory)).await?)
    }

    pub async fn save(&self, bytes: &[u8], name: &str, directory: Directory) -> Result<(), Error> {
        fs::create_dir_all(self.dir(directory)).await?;
        fs::write(self.path(name, directory), bytes).await?;

        Ok(())
    }

    pub async fn remove(&self, name: &str, directory: Directory) {
        match fs::remove_file(self.path(name, directory)).await {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => log::warn!("Could not remove {name}: {error}"),
        }
    }

    fn dir(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Documents => &self.documents,
            Directory::Caches => &self.caches,
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("storage I/O failed: {0}")]
    Io(Arc<io::Error>),
    #[error("failed to decode stored pokemons: {0}")]
    Decode(Arc<serde_json::Error>),
    #[error("failed to encode pokemons: {0}")]
    Encode(Arc<serde_json::Error>),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
}

pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
}
