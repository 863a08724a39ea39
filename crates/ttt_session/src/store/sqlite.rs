//! SQLite-backed store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::models::NewKvEntry;
use super::{KeyValueStore, StorageError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Store persisted in a SQLite database file.
///
/// Each operation opens its own connection, so the path must name a file
/// rather than `":memory:"`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and its table if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StorageError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(format!("Failed to run migrations: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore opened");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StorageError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection()?;
        let value = schema::kv_entries::table
            .find(key)
            .select(schema::kv_entries::value)
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = value.is_some(), "Key looked up");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        diesel::replace_into(schema::kv_entries::table)
            .values(&NewKvEntry::new(key, value))
            .execute(&mut conn)?;
        debug!("Key written");
        Ok(())
    }
}
