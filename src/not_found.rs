//! The 404 page, shown for unknown routes and records.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Não encontrado",
            "404",
            "Página não encontrada.",
            "Verifique o endereço ou volte ao painel.",
        ),
    )
        .into_response()
}
