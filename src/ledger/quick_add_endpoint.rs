//! Defines the endpoint for the quick add buttons.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::ledger::{controller::QuickAdd, page::ledger_fragment, state::LedgerState};

/// A route handler that adds a preset transaction dated today.
pub async fn quick_add_endpoint(
    Path(preset): Path<QuickAdd>,
    State(state): State<LedgerState>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    match controller.quick_add(preset, today) {
        Ok(id) => tracing::info!("Added {} as transaction {id}", preset.label()),
        Err(error) => {
            tracing::error!("Could not add quick transaction: {error}");
            return error.into_alert_response();
        }
    }

    ledger_fragment(&controller.render()).into_response()
}
