//! Versioned session record layered over a [`KeyValueStore`].
//!
//! The session is split over four slots (credentials, guesses, answer,
//! difficulty). Every slot name carries the storage version, so records
//! written by an incompatible build are never read; they simply look like
//! "no session". The session slots are always written together in one
//! batch, and a session with any unreadable slot is discarded whole.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use wordeau_core::Guess;

use crate::api::GameInfo;
use crate::session::{Answer, Difficulty, Session};
use crate::storage::{KeyValueStore, SlotWrite, StorageError};

/// Current storage schema version.
pub const STORAGE_VERSION: u32 = 2;

/// Named slots of the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    /// Server credentials (`GameInfo`).
    Session,
    /// Accepted guesses.
    Guesses,
    /// Revealed answer, if the game is over.
    Answer,
    /// Difficulty preference.
    Difficulty,
}

impl Slot {
    /// Returns the versioned storage key.
    pub fn key(self) -> String {
        let name: &'static str = self.into();
        format!("wordeau.v{}.{}", STORAGE_VERSION, name)
    }
}

/// Contents of one slot as seen by [`SessionStore`].
enum SlotValue<T> {
    Missing,
    Unreadable,
    Value(T),
}

/// Typed access to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Wraps a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the persisted session, if a complete and readable one exists.
    ///
    /// The guesses slot must be present and every present slot must
    /// decode; otherwise the whole session is treated as absent. Only the
    /// answer slot may be missing, meaning the game is still in progress.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the underlying store fails.
    #[instrument(skip(self))]
    pub fn load_session(&self) -> Result<Option<Session>, StorageError> {
        let SlotValue::Value(info) = self.read::<GameInfo>(Slot::Session)? else {
            debug!("No persisted session");
            return Ok(None);
        };
        let SlotValue::Value(history) = self.read::<Vec<Guess>>(Slot::Guesses)? else {
            warn!(session_id = info.id, "Guess history missing or unreadable, discarding session");
            return Ok(None);
        };
        let answer = match self.read::<Answer>(Slot::Answer)? {
            SlotValue::Value(answer) => Some(answer),
            SlotValue::Missing => None,
            SlotValue::Unreadable => {
                warn!(session_id = info.id, "Answer unreadable, discarding session");
                return Ok(None);
            }
        };
        debug!(session_id = info.id, guesses = history.len(), "Loaded session");
        Ok(Some(Session::restore(info, history, answer)))
    }

    /// Writes every session slot in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the batch cannot be written. Nothing is
    /// changed in that case.
    #[instrument(skip(self, session), fields(session_id = session.info().id))]
    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let answer = match session.answer() {
            Some(answer) => encode(Slot::Answer, answer)?,
            None => SlotWrite::Remove {
                slot: Slot::Answer.key(),
            },
        };
        let writes = [
            encode(Slot::Session, session.info())?,
            encode(Slot::Guesses, session.history())?,
            answer,
        ];
        self.store.write_all(&writes)
    }

    /// Forgets the session. The difficulty preference is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slots cannot be removed.
    #[instrument(skip(self))]
    pub fn clear_session(&self) -> Result<(), StorageError> {
        let writes = [Slot::Session, Slot::Guesses, Slot::Answer]
            .map(|slot| SlotWrite::Remove { slot: slot.key() });
        self.store.write_all(&writes)
    }

    /// Loads the difficulty preference, defaulting to hard mode.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the underlying store fails.
    #[instrument(skip(self))]
    pub fn load_difficulty(&self) -> Result<Difficulty, StorageError> {
        match self.read(Slot::Difficulty)? {
            SlotValue::Value(difficulty) => Ok(difficulty),
            SlotValue::Missing | SlotValue::Unreadable => Ok(Difficulty::default()),
        }
    }

    /// Saves the difficulty preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot cannot be written.
    #[instrument(skip(self))]
    pub fn save_difficulty(&self, difficulty: Difficulty) -> Result<(), StorageError> {
        self.store.write_all(&[encode(Slot::Difficulty, &difficulty)?])
    }

    fn read<T: DeserializeOwned>(&self, slot: Slot) -> Result<SlotValue<T>, StorageError> {
        let Some(raw) = self.store.get(&slot.key())? else {
            return Ok(SlotValue::Missing);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(SlotValue::Value(value)),
            Err(e) => {
                warn!(slot = %slot.key(), error = %e, "Unreadable slot");
                Ok(SlotValue::Unreadable)
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(slot: Slot, value: &T) -> Result<SlotWrite, StorageError> {
    Ok(SlotWrite::Set {
        slot: slot.key(),
        value: serde_json::to_string(value)?,
    })
}
