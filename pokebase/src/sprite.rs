use crate::{Error, Session};

use bytes::Bytes;
use std::fmt;

#[derive(Clone)]
pub struct Sprite {
    pub bytes: Bytes,
}

impl Sprite {
    pub async fn download(url: &str, session: &Session) -> Result<Self, Error> {
        let bytes = session.pokeapi.download_sprite(url).await?;

        Ok(Self { bytes })
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
