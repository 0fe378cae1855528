pub mod connection;
pub mod entities;
pub mod keys;
pub mod repositories;
pub mod sqlite_store;
pub mod store;

pub use repositories::BingoRepository;
pub use sqlite_store::SqliteStore;
pub use store::{KeyValueStore, MemoryStore};
