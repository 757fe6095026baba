//! Defines the endpoint for the transaction form.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;

use crate::ledger::{
    controller::{SubmitOutcome, TransactionForm},
    page::ledger_fragment,
    state::LedgerState,
};

/// A route handler that adds a transaction, or saves the one being edited.
///
/// Responds with the updated ledger widget, or an error alert if the form is invalid.
pub async fn submit_transaction_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    match controller.submit(&form, today) {
        Ok(SubmitOutcome::Added(id)) => tracing::info!("Added transaction {id}"),
        Ok(SubmitOutcome::Updated(id)) => tracing::info!("Updated transaction {id}"),
        Ok(SubmitOutcome::Ignored(id)) => {
            tracing::warn!("Ignored edit of transaction {id} since it no longer exists")
        }
        Err(error) => {
            tracing::debug!("Rejected transaction form: {error}");
            return error.into_alert_response();
        }
    }

    ledger_fragment(&controller.render()).into_response()
}
