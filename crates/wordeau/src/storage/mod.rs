//! Persistence layer for the game session.

mod error;
mod models;
mod record;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::StorageError;
pub use models::{KvEntry, NewKvEntry};
pub use record::{STORAGE_VERSION, SessionStore, Slot};
pub use store::{KeyValueStore, MemoryStore, SlotWrite, SqliteStore};
