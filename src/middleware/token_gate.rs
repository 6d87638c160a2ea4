use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::AppState;

/// Gate: require a valid bearer token. On success the verified claims are
/// attached to the request extensions for downstream handlers.
pub async fn token_gate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return Err(AppError::TokenNotFound);
    };

    let claims = state.tokens.verify(token)?;
    tracing::debug!(email = %claims.email, "authenticated request");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
