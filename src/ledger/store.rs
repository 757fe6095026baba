//! The ledger: the in-memory list of transactions and its mirror in storage.

use std::fmt;

use crate::{
    Error,
    ledger::core::{NewTransaction, Transaction, TransactionId},
    storage::KeyValueStore,
};

/// The storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "pocketbook.transactions";

/// The transactions of one user, in the order they were added.
///
/// Mutations only change the in-memory list. Use [Ledger::commit] to make a
/// change and write the whole list back to storage in one step.
pub struct Ledger {
    store: Box<dyn KeyValueStore>,
    key: String,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl Ledger {
    /// Load the ledger stored under `key`.
    ///
    /// A missing or unreadable document gives an empty ledger. Nothing is
    /// reported to the user in that case, only logged.
    pub fn load(store: Box<dyn KeyValueStore>, key: &str) -> Self {
        let transactions = match store.get(key) {
            Ok(Some(json)) => serde_json::from_str::<Vec<Transaction>>(&json)
                .inspect_err(|error| {
                    tracing::warn!("Stored ledger \"{key}\" is invalid, starting empty: {error}")
                })
                .unwrap_or_default(),
            Ok(None) => {
                tracing::info!("No ledger stored under \"{key}\", starting empty");
                Vec::new()
            }
            Err(error) => {
                tracing::error!("Could not read ledger \"{key}\", starting empty: {error}");
                Vec::new()
            }
        };

        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .map_or(1, |max_id| max_id + 1);

        tracing::debug!(
            "Loaded {} transactions from \"{key}\", next ID is {next_id}",
            transactions.len()
        );

        Self {
            store,
            key: key.to_owned(),
            transactions,
            next_id,
        }
    }

    /// Write the whole list to storage.
    ///
    /// # Errors
    /// Returns an error if the list cannot be serialized or written.
    pub fn save(&mut self) -> Result<(), Error> {
        let json = self.to_json()?;

        self.store
            .set(&self.key, &json)
            .inspect_err(|error| tracing::error!("Could not save ledger \"{}\": {error}", self.key))
    }

    /// Apply `change` to the ledger, then save it.
    ///
    /// If the ledger cannot be saved the change is undone, so the list in
    /// memory always matches the one in storage.
    ///
    /// # Errors
    /// Returns the error from [Ledger::save].
    pub fn commit<T>(&mut self, change: impl FnOnce(&mut Self) -> T) -> Result<T, Error> {
        let transactions = self.transactions.clone();
        let next_id = self.next_id;

        let result = change(self);

        match self.save() {
            Ok(()) => Ok(result),
            Err(error) => {
                self.transactions = transactions;
                self.next_id = next_id;
                Err(error)
            }
        }
    }

    /// The list as the JSON document that is written to storage.
    ///
    /// # Errors
    /// Returns an error if the list cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(&self.transactions).map_err(Error::from)
    }

    /// Append a transaction and return it with its new ID.
    pub fn add(&mut self, transaction: NewTransaction) -> &Transaction {
        let id = self.next_id;
        self.next_id += 1;

        let index = self.transactions.len();
        self.transactions.push(transaction.with_id(id));

        &self.transactions[index]
    }

    /// Replace the details of the transaction with `id`.
    ///
    /// Returns `false`, and changes nothing, if there is no such transaction.
    pub fn update(&mut self, id: TransactionId, patch: NewTransaction) -> bool {
        match self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        {
            Some(transaction) => {
                *transaction = patch.with_id(id);
                true
            }
            None => false,
        }
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `false`, and changes nothing, if there is no such transaction.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        self.transactions.len() != count_before
    }

    /// Remove all transactions.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Get the transaction with `id`.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// All transactions in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("key", &self.key)
            .field("transactions", &self.transactions)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
