use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::errors::AppError;
use crate::AppState;

/// Monday through Friday passes; Saturday and Sunday do not.
pub fn is_business_day(now: DateTime<Utc>) -> bool {
    !matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Gate: allow the request only on business days. The clock comes from
/// `AppState` and is read per request, never cached.
pub async fn business_day_gate(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let now = (state.clock)();
    if is_business_day(now) {
        Ok(next.run(req).await)
    } else {
        tracing::debug!(weekday = %now.weekday(), "request outside business days");
        Err(AppError::OutsideBusinessDays)
    }
}
