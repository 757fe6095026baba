//! Pocketbook is a small web app for keeping a personal ledger of income and
//! expenses.
//!
//! This library provides a REST API that directly serves HTML pages. The
//! ledger itself lives in a key-value store as a single JSON document, see
//! [storage] for the available stores.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod html;
mod internal_server_error;
pub mod ledger;
mod logging;
mod not_found;
mod routing;
pub mod storage;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{alert::ErrorAlert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The description was empty or only contained whitespace.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// The amount could not be parsed as a finite number.
    ///
    /// Callers should pass in the text that could not be parsed.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An amount of zero was given.
    ///
    /// A zero amount is neither income nor expense, so it is rejected.
    #[error("the amount cannot be zero")]
    ZeroAmount,

    /// The date could not be parsed as a `YYYY-MM-DD` calendar date.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The client asked to clear the ledger without confirming.
    #[error("clearing all transactions must be confirmed")]
    ClearNotConfirmed,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing or deserializing the ledger as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on the ledger.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    ///
    /// Input errors are reported with status 400 so the client can correct
    /// them, everything else is a 500.
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match self {
            Error::EmptyDescription
            | Error::InvalidAmount(_)
            | Error::ZeroAmount
            | Error::InvalidDate(_) => (
                StatusCode::BAD_REQUEST,
                "Enter valid description and amount".to_owned(),
                self.to_string(),
            ),
            Error::ClearNotConfirmed => (
                StatusCode::BAD_REQUEST,
                "Transactions were not cleared".to_owned(),
                "Clearing all transactions needs to be confirmed.".to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings".to_owned(),
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_owned(),
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status_code, ErrorAlert { message, details }.into_html()).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn input_errors_are_bad_requests() {
        let errors = [
            Error::EmptyDescription,
            Error::InvalidAmount("abc".to_owned()),
            Error::ZeroAmount,
            Error::InvalidDate("yesterday".to_owned()),
            Error::ClearNotConfirmed,
        ];

        for error in errors {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let html = parse_html_fragment(response).await;
            assert_valid_html(&html);
        }
    }

    #[tokio::test]
    async fn storage_errors_are_internal_errors() {
        let response = Error::LedgerLockError.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
