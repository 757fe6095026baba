//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::ledger::{core::TransactionId, page::ledger_fragment, state::LedgerState};

/// A route handler for deleting a transaction, responds with the updated ledger widget.
///
/// Deleting a transaction that does not exist does nothing.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<LedgerState>,
) -> Response {
    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    match controller.delete(transaction_id) {
        Ok(true) => tracing::info!("Deleted transaction {transaction_id}"),
        Ok(false) => {
            tracing::debug!("Tried to delete transaction {transaction_id} which does not exist")
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting transaction {transaction_id}: {error}"
            );
            return error.into_alert_response();
        }
    }

    ledger_fragment(&controller.render()).into_response()
}
