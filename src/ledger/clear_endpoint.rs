//! Defines the endpoint for deleting every transaction.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::ledger::{page::ledger_fragment, state::LedgerState};

/// The form data for clearing the ledger.
#[derive(Debug, Default, Deserialize)]
pub struct ClearForm {
    /// Whether the user confirmed that every transaction should be deleted.
    #[serde(default)]
    pub confirmed: bool,
}

/// A route handler that deletes every transaction once the user has confirmed it.
pub async fn clear_transactions_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<ClearForm>,
) -> Response {
    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = controller.clear_all(form.confirmed) {
        tracing::warn!("Could not clear transactions: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Cleared all transactions");

    ledger_fragment(&controller.render()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        ledger::{QuickAdd, state::test_state::get_test_state},
        test_utils::{assert_status_ok, assert_valid_html, parse_html_fragment},
    };

    use super::{ClearForm, clear_transactions_endpoint};

    #[tokio::test]
    async fn clears_when_confirmed() {
        let state = get_test_state();
        state
            .lock()
            .unwrap()
            .quick_add(QuickAdd::Income, date!(2025 - 06 - 15))
            .unwrap();

        let response =
            clear_transactions_endpoint(State(state.clone()), Form(ClearForm { confirmed: true }))
                .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let empty_state = html.select(&Selector::parse("#empty-state").unwrap()).count();
        assert_eq!(empty_state, 1);
        assert!(state.lock().unwrap().ledger().transactions().is_empty());
    }

    #[tokio::test]
    async fn refuses_without_confirmation() {
        let state = get_test_state();
        state
            .lock()
            .unwrap()
            .quick_add(QuickAdd::Income, date!(2025 - 06 - 15))
            .unwrap();

        let response =
            clear_transactions_endpoint(State(state.clone()), Form(ClearForm::default())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.lock().unwrap().ledger().transactions().len(), 1);
    }
}
