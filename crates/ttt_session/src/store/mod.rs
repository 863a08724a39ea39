//! Key-value persistence for scores and preferences.

mod error;
mod memory;
mod models;
mod schema; // Diesel schema - internal use only
mod sqlite;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key holding the JSON score record.
pub const SCORES_KEY: &str = "ttt_scores";

/// Key holding the theme token.
pub const THEME_KEY: &str = "ttt_theme";

/// String-valued key-value storage that survives restarts.
///
/// Backends take `&self` for writes; they handle their own synchronization.
pub trait KeyValueStore: Send + std::fmt::Debug {
    /// Reads the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
