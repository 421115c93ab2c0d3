pub mod error;
pub mod pokemon;
pub mod search;
pub mod session;
pub mod sprite;

pub use error::Error;
pub use pokemon::Pokemon;
pub use search::Outcome;
pub use session::Session;
pub use sprite::Sprite;
