pub mod cli;
pub mod config;
pub mod library;
pub mod session;

pub use library::{BingoLibrary, ImportedCard};
pub use session::{GameSession, ToggleOutcome};
