//! Database models for the key-value table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::storage::schema;

/// Stored slot.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct KvEntry {
    slot: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable slot, replacing any previous value.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry {
    slot: String,
    value: String,
    updated_at: NaiveDateTime,
}
