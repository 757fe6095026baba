//! The personal ledger.
//!
//! This module contains everything related to the ledger:
//! - The `Transaction` model and the tagged `Amount` it carries
//! - The `Ledger` store that mirrors the transactions to a key-value store
//! - The summary calculator and the view projection
//! - The `LedgerController` that applies user actions
//! - The page templates and route handlers for the ledger widget

mod clear_endpoint;
mod controller;
mod core;
mod delete_endpoint;
mod edit_endpoint;
mod ledger_page;
mod page;
mod quick_add_endpoint;
mod state;
mod store;
mod submit_endpoint;
mod summary;
mod view;

pub use clear_endpoint::clear_transactions_endpoint;
pub use controller::{EditState, LedgerController, QuickAdd, SubmitOutcome, TransactionForm};
pub use core::{Amount, NewTransaction, Transaction, TransactionId, TransactionType, parse_date};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::{begin_edit_endpoint, cancel_edit_endpoint};
pub use ledger_page::{export_transactions_endpoint, get_ledger_fragment, get_ledger_page};
pub use quick_add_endpoint::quick_add_endpoint;
pub use state::LedgerState;
pub use store::{DEFAULT_STORAGE_KEY, Ledger};
pub use submit_endpoint::submit_transaction_endpoint;
pub use summary::{Summary, summarize};
pub use view::{
    Filter, LedgerView, SummaryView, TransactionFormValues, TransactionRow, ViewState,
    visible_transactions,
};
