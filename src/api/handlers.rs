use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::{NewTicket, TicketUpdate, TicketWithImage};
use crate::report;
use crate::AppState;

// ── Request DTOs ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /logar — verify the credential pair and issue a bearer token.
pub async fn logar(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let identity = state
        .credentials
        .verify(&payload.email, &payload.senha)
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.tokens.issue(&identity)?;
    tracing::info!(email = %identity.email, "login ok, token issued");
    Ok(Json(json!({ "token": token })))
}

/// GET /chamados — all tickets, each augmented with its resolved image
/// path. An empty collection is reported as 404, matching the original
/// API contract.
pub async fn list_chamados(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TicketWithImage>>, AppError> {
    let tickets = state.store.find_all().await?;
    if tickets.is_empty() {
        return Err(AppError::NoTickets);
    }

    let mut out = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        let image_path = state.images.resolve(&ticket.id).await;
        out.push(TicketWithImage { ticket, image_path });
    }
    Ok(Json(out))
}

/// GET /chamados/:id
pub async fn get_chamado(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TicketWithImage>, AppError> {
    let ticket = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::TicketNotFound)?;
    let image_path = state.images.resolve(&ticket.id).await;
    Ok(Json(TicketWithImage { ticket, image_path }))
}

/// POST /chamados — multipart form: `titulo`, `descricao`, `cliente` and
/// an optional `imagem` file, which is stored keyed by the new ticket id.
/// The file write is not transactional with the insert; a failure in
/// between leaves an orphaned record, which is accepted.
pub async fn create_chamado(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut titulo = None;
    let mut descricao = None;
    let mut cliente = None;
    let mut imagem: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid multipart payload: {}", e)))?
    {
        match field.name() {
            Some("titulo") => titulo = Some(read_text(field).await?),
            Some("descricao") => descricao = Some(read_text(field).await?),
            Some("cliente") => cliente = Some(read_text(field).await?),
            Some("imagem") => {
                let original = field.file_name().unwrap_or("imagem").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("invalid imagem field: {}", e))
                })?;
                imagem = Some((original, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (titulo, descricao, cliente) = match (titulo, descricao, cliente) {
        (Some(t), Some(d), Some(c)) if !t.is_empty() && !d.is_empty() && !c.is_empty() => {
            (t, d, c)
        }
        _ => return Err(AppError::MissingFields),
    };

    let id = state
        .store
        .insert(NewTicket {
            title: titulo,
            description: descricao,
            client: cliente,
            status: "Aberto".into(),
            opened_at: Utc::now().to_rfc3339(),
        })
        .await?;

    if let Some((original, bytes)) = imagem {
        let stored = state
            .images
            .save(&id, &original, &bytes)
            .await
            .map_err(AppError::Internal)?;
        tracing::info!(id = %id, file = %stored, "ticket image stored");
    }

    tracing::info!(id = %id, "ticket created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Chamado criado com sucesso." })),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map(|s| s.trim().to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid multipart field: {}", e)))
}

/// PUT /chamados/:id — overwrite the provided fields, refresh `updatedAt`.
pub async fn update_chamado(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(changes): Json<TicketUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let matched = state.store.update(&id, changes).await?;
    if !matched {
        return Err(AppError::TicketNotFound);
    }
    tracing::info!(id = %id, "ticket updated");
    Ok(Json(json!({ "message": "Chamado atualizado com sucesso" })))
}

/// DELETE /chamados/:id — remove the associated image (best-effort), then
/// the record.
pub async fn delete_chamado(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ticket = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::TicketNotFound)?;

    state.images.remove(&ticket.id).await;
    state.store.delete(&id).await?;
    tracing::info!(id = %id, "ticket deleted");
    Ok(Json(json!({ "message": "Chamado excluído com sucesso." })))
}

/// GET /relatorio — the full collection as a downloadable PDF.
pub async fn relatorio(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let tickets = state.store.find_all().await?;
    if tickets.is_empty() {
        return Err(AppError::NoTickets);
    }

    let bytes = report::render(&tickets).map_err(AppError::Internal)?;
    tracing::info!(tickets = tickets.len(), "report generated");

    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    let disposition = format!("attachment; filename=\"{}\"", report::REPORT_FILENAME);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        resp.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(resp)
}
