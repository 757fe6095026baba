//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    ledger::{Ledger, LedgerController},
    storage::KeyValueStore,
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The controller that owns the ledger and the state of the ledger page.
    pub ledger: Arc<Mutex<LedgerController>>,
}

impl AppState {
    /// Create a new [AppState], loading the ledger stored under `storage_key` in `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// Missing or unreadable ledger data is treated as an empty ledger.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        storage_key: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let ledger = Ledger::load(store, storage_key);

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(LedgerController::new(ledger))),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        ledger::DEFAULT_STORAGE_KEY,
        storage::{KeyValueStore, MemoryStore},
    };

    use super::AppState;

    #[test]
    fn loads_ledger_from_store() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":4,"description":"Salary","amount":1000,"date":"2025-01-31","category":"income"}]"#,
            )
            .unwrap();

        let state = AppState::new(Box::new(store), DEFAULT_STORAGE_KEY, "Etc/UTC").unwrap();

        let controller = state.ledger.lock().unwrap();
        assert_eq!(controller.ledger().transactions().len(), 1);
        assert_eq!(controller.ledger().transactions()[0].id, 4);
    }

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(
            Box::new(MemoryStore::new()),
            DEFAULT_STORAGE_KEY,
            "Not/A_Timezone",
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }
}
