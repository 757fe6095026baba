//! Alerts for displaying error messages to users.
//!
//! Failed htmx requests swap an alert into the alert container at the bottom
//! of the page. Successful requests empty the container out of band.

use axum::response::Html;
use maud::{Markup, html};

/// The element ID of the container that alerts are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A message telling the user that an action failed and what to do about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorAlert {
    pub message: String,
    pub details: String,
}

impl ErrorAlert {
    fn into_markup(self) -> Markup {
        html! {
            div role="alert" class=(ERROR_STYLE)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="text-sm mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-lg leading-none"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}

/// An empty alert container that replaces any alert currently shown.
pub fn clear_alerts_oob() -> Markup {
    html! {
        div id=(ALERT_CONTAINER_ID) hx-swap-oob="true" class=(ALERT_CONTAINER_STYLE) {}
    }
}

pub const ALERT_CONTAINER_STYLE: &str = "w-full max-w-md px-4 fixed bottom-4 \
    left-1/2 -translate-x-1/2 z-50";

const ERROR_STYLE: &str = "p-4 mb-4 rounded-lg border text-red-800 \
    border-red-300 bg-red-50 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";
