//! Defines the route handlers that show the ledger.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::{
    Error,
    ledger::{
        page::{ledger_fragment, ledger_page},
        state::LedgerState,
        view::Filter,
    },
};

/// The query parameters for the ledger fragment.
///
/// Parameters that are not given keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    /// Which transactions to show.
    pub filter: Option<Filter>,
    /// The text to search transaction descriptions for.
    pub q: Option<String>,
}

/// Render the page containing the ledger widget.
pub async fn get_ledger_page(State(state): State<LedgerState>) -> Result<Response, Error> {
    let controller = state.lock()?;

    Ok(ledger_page(&controller.render()).into_response())
}

/// Update the filter and search text, then render the ledger widget.
///
/// Requests that do not come from htmx, e.g. a bookmarked link, get the full page.
pub async fn get_ledger_fragment(
    State(state): State<LedgerState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<LedgerQuery>,
) -> Response {
    let mut controller = match state.lock() {
        Ok(controller) => controller,
        Err(error) => return error.into_alert_response(),
    };

    if let Some(filter) = query.filter {
        controller.set_filter(filter);
    }

    if let Some(search) = query.q {
        controller.set_query(&search);
    }

    let view = controller.render();

    if is_htmx_request {
        ledger_fragment(&view).into_response()
    } else {
        ledger_page(&view).into_response()
    }
}

/// Export every transaction as the JSON document that is stored in the key-value store.
pub async fn export_transactions_endpoint(
    State(state): State<LedgerState>,
) -> Result<Response, Error> {
    let controller = state.lock()?;

    Ok(Json(controller.ledger().transactions()).into_response())
}
