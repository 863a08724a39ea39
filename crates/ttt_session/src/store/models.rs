//! Database models for the key-value table.

use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// Insertable row for writing a key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry<'a> {
    key: &'a str,
    value: &'a str,
}
