//! Key-value stores for persisting the ledger.
//!
//! The ledger is written as one JSON document under a single key, the same
//! way a browser widget would use local storage. [SQLiteStore] keeps the
//! values in a SQLite table so they survive restarts, [MemoryStore] keeps
//! them for the lifetime of the process only.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// A string-to-string store that holds the persisted ledger.
pub trait KeyValueStore: Send {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// A [KeyValueStore] backed by a SQLite database.
#[derive(Debug)]
pub struct SQLiteStore {
    connection: Connection,
}

impl SQLiteStore {
    /// Create a new store, adding the key-value table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection)?;

        Ok(Self { connection })
    }
}

impl KeyValueStore for SQLiteStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .prepare("SELECT value FROM key_value WHERE key = :key")?
            .query_row(&[(":key", key)], |row| row.get(0))
            .optional()
            .map_err(|error| error.into())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// A [KeyValueStore] that only lives in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}


#[cfg(test)]
mod sqlite_store_tests {
    use rusqlite::Connection;

    use super::{KeyValueStore, SQLiteStore};

    fn get_test_store() -> SQLiteStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteStore::new(connection).expect("Could not create store")
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("missing"), Ok(None));
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut store = get_test_store();

        store.set("ledger", "[]").unwrap();

        assert_eq!(store.get("ledger"), Ok(Some("[]".to_owned())));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = get_test_store();
        store.set("ledger", "[]").unwrap();

        store.set("ledger", "[1]").unwrap();

        assert_eq!(store.get("ledger"), Ok(Some("[1]".to_owned())));
    }

    #[test]
    fn new_is_idempotent_on_existing_table() {
        let connection = Connection::open_in_memory().unwrap();
        super::create_key_value_table(&connection).unwrap();

        let store = SQLiteStore::new(connection);

        assert!(store.is_ok());
    }
}

#[cfg(test)]
mod memory_store_tests {
    use super::{KeyValueStore, MemoryStore};

    #[test]
    fn keys_are_independent() {
        let mut store = MemoryStore::new();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(store.get("a"), Ok(Some("1".to_owned())));
        assert_eq!(store.get("b"), Ok(Some("2".to_owned())));
        assert_eq!(store.get("c"), Ok(None));
    }
}
