//! Key-value stores backing the persisted session.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, instrument};

use crate::storage::{KvEntry, NewKvEntry, StorageError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// String slots keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Reads a slot. Returns `None` if it was never written.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Writes a slot, replacing any previous value.
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a slot. Removing a missing slot is not an error.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;

    /// Applies every change in `writes`, or none of them.
    fn write_all(&self, writes: &[SlotWrite]) -> Result<(), StorageError>;
}

/// One change in a [`KeyValueStore::write_all`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWrite {
    /// Store `value` under `slot`.
    Set {
        /// Slot name.
        slot: String,
        /// New value.
        value: String,
    },
    /// Drop `slot` if present.
    Remove {
        /// Slot name.
        slot: String,
    },
}

impl SlotWrite {
    /// Returns the slot this change touches.
    pub fn slot(&self) -> &str {
        match self {
            Self::Set { slot, .. } | Self::Remove { slot } => slot,
        }
    }
}

/// Process-local store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(slot);
        Ok(())
    }

    fn write_all(&self, writes: &[SlotWrite]) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for write in writes {
            match write {
                SlotWrite::Set { slot, value } => {
                    slots.insert(slot.clone(), value.clone());
                }
                SlotWrite::Remove { slot } => {
                    slots.remove(slot);
                }
            }
        }
        Ok(())
    }
}

/// SQLite-backed store, one row per slot.
///
/// Each call opens its own connection, so `":memory:"` does not keep data
/// between calls; use [`MemoryStore`] for that.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StorageError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(format!("Migration failed: {}", e)))?;
        debug!(count = applied.len(), "Applied migrations");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }

    /// Returns when a slot was last written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn last_updated(&self, slot: &str) -> Result<Option<NaiveDateTime>, StorageError> {
        Ok(self.entry(slot)?.map(|entry| *entry.updated_at()))
    }

    fn entry(&self, slot: &str) -> Result<Option<KvEntry>, StorageError> {
        let mut conn = self.connection()?;
        let entry = schema::kv_entries::table
            .find(slot)
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(entry)
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let entry = self.entry(slot)?;
        debug!(found = entry.is_some(), "Read slot");
        Ok(entry.map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let row = NewKvEntry::new(slot.to_string(), value.to_string(), Utc::now().naive_utc());
        diesel::replace_into(schema::kv_entries::table)
            .values(&row)
            .execute(&mut conn)?;
        debug!("Wrote slot");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_entries::table.find(slot)).execute(&mut conn)?;
        debug!(removed, "Removed slot");
        Ok(())
    }

    #[instrument(skip(self, writes), fields(count = writes.len()))]
    fn write_all(&self, writes: &[SlotWrite]) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();
        conn.transaction::<_, StorageError, _>(|conn| {
            for write in writes {
                match write {
                    SlotWrite::Set { slot, value } => {
                        let row = NewKvEntry::new(slot.clone(), value.clone(), now);
                        diesel::replace_into(schema::kv_entries::table)
                            .values(&row)
                            .execute(conn)?;
                    }
                    SlotWrite::Remove { slot } => {
                        diesel::delete(schema::kv_entries::table.find(slot.as_str()))
                            .execute(conn)?;
                    }
                }
            }
            Ok(())
        })?;
        debug!("Committed slot batch");
        Ok(())
    }
}
