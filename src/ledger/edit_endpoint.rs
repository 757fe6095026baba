//! Defines the endpoints for starting and cancelling an edit.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::ledger::{core::TransactionId, page::ledger_fragment, state::LedgerState};

/// A route handler that loads a transaction into the form for editing.
///
/// An unknown ID leaves the form unchanged.
pub async fn begin_edit_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<LedgerState>,
) -> Response {
    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    if controller.begin_edit(transaction_id).is_none() {
        tracing::debug!("Tried to edit transaction {transaction_id} which does not exist");
    }

    ledger_fragment(&controller.render()).into_response()
}

/// A route handler that returns the form to adding new transactions.
pub async fn cancel_edit_endpoint(State(state): State<LedgerState>) -> Response {
    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    controller.cancel_edit();

    ledger_fragment(&controller.render()).into_response()
}
