pub mod backpack;
pub mod catch;

pub use backpack::Backpack;
pub use catch::Catch;
