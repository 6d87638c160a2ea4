use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token not found")]
    TokenNotFound,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("outside business days")]
    OutsideBusinessDays,

    #[error("missing required fields")]
    MissingFields,

    #[error("ticket not found")]
    TicketNotFound,

    #[error("no tickets in collection")]
    NoTickets,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Wire messages mirror the original API contract, including the
        // `erro` key used only by creation validation.
        let (status, body) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Credenciais inválidas" }),
            ),
            AppError::TokenNotFound => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Token não encontrado" }),
            ),
            AppError::InvalidToken => (
                StatusCode::FORBIDDEN,
                json!({ "message": "Token expirado" }),
            ),
            AppError::OutsideBusinessDays => (
                StatusCode::FORBIDDEN,
                json!({ "message": "Acesso permitido apenas de segunda a sexta-feira." }),
            ),
            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "erro": "Título, descrição e cliente são obrigatórios." }),
            ),
            AppError::TicketNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Chamado não encontrado" }),
            ),
            AppError::NoTickets => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Nenhum chamado encontrado" }),
            ),
            // A syntactically invalid id can never match a stored ticket.
            AppError::Store(StoreError::InvalidId(id)) => {
                tracing::warn!(id = %id, "rejected malformed ticket id");
                (
                    StatusCode::NOT_FOUND,
                    json!({ "message": "Chamado não encontrado" }),
                )
            }
            AppError::Store(StoreError::Backend(e)) => {
                tracing::error!("store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": e.to_string() }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
