//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    ledger::{
        begin_edit_endpoint, cancel_edit_endpoint, clear_transactions_endpoint,
        delete_transaction_endpoint, export_transactions_endpoint, get_ledger_fragment,
        get_ledger_page, quick_add_endpoint, submit_transaction_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_ledger_page))
        .route(endpoints::LEDGER_FRAGMENT, get(get_ledger_fragment))
        .route(endpoints::COFFEE, get(get_coffee))
        .route(
            endpoints::TRANSACTIONS_API,
            get(export_transactions_endpoint).post(submit_transaction_endpoint),
        )
        .route(
            endpoints::CLEAR_TRANSACTIONS,
            post(clear_transactions_endpoint),
        )
        .route(endpoints::QUICK_ADD, post(quick_add_endpoint))
        .route(endpoints::EDIT_TRANSACTION, post(begin_edit_endpoint))
        .route(endpoints::CANCEL_EDIT, post(cancel_edit_endpoint))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}
