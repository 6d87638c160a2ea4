use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{business_day_gate, token_gate};
use crate::AppState;

pub mod handlers;

/// Build the application router.
///
/// `/logar` and the static `/assets` tree are open; everything under
/// `/chamados` and `/relatorio` sits behind the business-day gate and then
/// the token gate. Layers run outermost-last-added, so the business-day
/// gate is applied after the token gate here to make it run first.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/chamados",
            get(handlers::list_chamados).post(handlers::create_chamado),
        )
        .route(
            "/chamados/:id",
            get(handlers::get_chamado)
                .put(handlers::update_chamado)
                .delete(handlers::delete_chamado),
        )
        .route("/relatorio", get(handlers::relatorio))
        .layer(middleware::from_fn_with_state(state.clone(), token_gate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            business_day_gate,
        ));

    Router::new()
        .route("/logar", post(handlers::logar))
        .merge(protected)
        .nest_service("/assets", ServeDir::new(&state.config.asset_dir))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}
