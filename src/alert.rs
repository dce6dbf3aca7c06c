//! Error alerts shown to users.
//!
//! Alerts are rendered into the page's alert container by htmx routes, either
//! via `hx-target-error` or an explicit `HX-Retarget`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const ERROR_ALERT_STYLE: &str = "p-4 mb-4 rounded border border-red-300 bg-red-50 \
    text-red-800 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// An error message shown to the user, with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create an error alert from string slices.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class=(ERROR_ALERT_STYLE)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="mt-1 text-sm" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Fechar"
                        class="text-sm font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as a response with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
