pub mod card;
pub mod documents;
pub mod errors;
pub mod game;

// Re-export all types
pub use card::*;
pub use documents::*;
pub use errors::*;
pub use game::*;
