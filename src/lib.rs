//! Restaurant Finance is a web app for managing the bills, transactions,
//! chart of accounts and payment methods of a restaurant business.
//!
//! This library provides a REST API that directly serves HTML pages enhanced
//! with htmx, backed by a SQLite database.

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
mod bill;
mod chart_of_accounts;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod filter;
mod html;
mod internal_server_error;
mod labels;
mod logging;
mod navigation;
mod not_found;
mod overview;
mod payment_method;
mod record_form;
mod record_table;
mod routing;
mod timezone;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A record referred to a payment method, account or parent account that
    /// does not exist.
    #[error("the record refers to a row that does not exist")]
    InvalidReference,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to update a bill that does not exist
    #[error("tried to update a bill that is not in the database")]
    UpdateMissingBill,

    /// Tried to update a chart of accounts entry that does not exist
    #[error("tried to update an account that is not in the database")]
    UpdateMissingAccount,

    /// Tried to update a payment method that does not exist
    #[error("tried to update a payment method that is not in the database")]
    UpdateMissingPaymentMethod,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidReference,
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                    configurações do servidor e use um nome de fuso horário canônico."
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::UpdateMissingBill
            | Error::UpdateMissingAccount
            | Error::UpdateMissingPaymentMethod => StatusCode::NOT_FOUND,
            Error::InvalidReference => StatusCode::UNPROCESSABLE_ENTITY,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn alert_details(&self) -> String {
        match self {
            Error::NotFound => "O registro não foi encontrado.".to_owned(),
            Error::InvalidReference => {
                "O registro selecionado não existe mais. Atualize a página e tente novamente."
                    .to_owned()
            }
            Error::UpdateMissingTransaction => "A transação não foi encontrada.".to_owned(),
            Error::UpdateMissingBill => "A conta a pagar não foi encontrada.".to_owned(),
            Error::UpdateMissingAccount => "A conta não foi encontrada.".to_owned(),
            Error::UpdateMissingPaymentMethod => {
                "A forma de pagamento não foi encontrada.".to_owned()
            }
            Error::InvalidTimezoneError(timezone) => format!(
                "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                configurações do servidor."
            ),
            Error::SqlError(_) | Error::DatabaseLockError => {
                "Ocorreu um erro inesperado, verifique os logs do servidor.".to_owned()
            }
        }
    }

    /// Render the error as an alert fragment for htmx routes.
    fn into_alert_response(self) -> Response {
        let message = match self {
            Error::NotFound => "Registro não encontrado",
            Error::InvalidTimezoneError(_) => "Fuso horário inválido",
            _ => "Algo deu errado",
        };

        self.into_alert_response_with_message(message)
    }

    /// Render the error as an alert fragment with a caller-chosen headline,
    /// e.g. "Erro ao criar conta".
    fn into_alert_response_with_message(self, message: &str) -> Response {
        let status_code = self.status_code();

        Alert::error(message, &self.alert_details()).into_response_with_status(status_code)
    }
}
