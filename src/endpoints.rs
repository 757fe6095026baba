//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

use std::fmt::Display;

/// The root route which serves the ledger page.
pub const ROOT: &str = "/";
/// The ledger widget as an HTML fragment, used by the filter buttons and search box.
pub const LEDGER_FRAGMENT: &str = "/ledger";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to submit the transaction form, or export the ledger as JSON.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to load a transaction into the form for editing.
pub const EDIT_TRANSACTION: &str = "/api/transactions/{transaction_id}/edit";
/// The route to stop editing a transaction.
pub const CANCEL_EDIT: &str = "/api/edit/cancel";
/// The route to delete every transaction.
pub const CLEAR_TRANSACTIONS: &str = "/api/transactions/clear";
/// The route to add one of the preset transactions.
pub const QUICK_ADD: &str = "/api/transactions/quick/{preset}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
