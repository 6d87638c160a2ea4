//! Ticket ("chamado") domain types.
//!
//! Wire field names keep the original Portuguese keys so existing clients
//! keep working; Rust-side names are English.

use serde::{Deserialize, Serialize};

/// A persisted support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier (ObjectId hex), immutable after creation.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "cliente")]
    pub client: String,
    /// Free-text state label, "Aberto" at creation.
    pub status: String,
    /// RFC 3339 creation timestamp, immutable.
    #[serde(rename = "dataAbertura")]
    pub opened_at: String,
    /// RFC 3339 timestamp of the last update, absent until first update.
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Fields of a ticket about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub client: String,
    pub status: String,
    pub opened_at: String,
}

/// Partial update; only the provided fields are overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketUpdate {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "cliente")]
    pub client: Option<String>,
}

/// Read-side projection: the ticket plus its resolved image path, which is
/// derived at read time rather than stored on the entity.
#[derive(Debug, Serialize)]
pub struct TicketWithImage {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(rename = "imagePath")]
    pub image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_serializes_with_wire_names() {
        let ticket = Ticket {
            id: "65f000000000000000000001".into(),
            title: "Sem internet".into(),
            description: "Cliente sem conexão".into(),
            client: "Maria".into(),
            status: "Aberto".into(),
            opened_at: "2025-08-25T10:00:00+00:00".into(),
            updated_at: None,
        };
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["_id"], "65f000000000000000000001");
        assert_eq!(json["titulo"], "Sem internet");
        assert_eq!(json["descricao"], "Cliente sem conexão");
        assert_eq!(json["cliente"], "Maria");
        assert_eq!(json["dataAbertura"], "2025-08-25T10:00:00+00:00");
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn update_deserializes_partial_body() {
        let update: TicketUpdate =
            serde_json::from_str(r#"{"status":"Fechado"}"#).unwrap();
        assert_eq!(update.status.as_deref(), Some("Fechado"));
        assert!(update.title.is_none());
        assert!(update.client.is_none());
    }

    #[test]
    fn with_image_flattens_and_renames() {
        let wrapped = TicketWithImage {
            ticket: Ticket {
                id: "65f000000000000000000002".into(),
                title: "Roteador".into(),
                description: "Troca de roteador".into(),
                client: "João".into(),
                status: "Aberto".into(),
                opened_at: "2025-08-25T10:00:00+00:00".into(),
                updated_at: None,
            },
            image_path: Some("/assets/images/65f000000000000000000002.png".into()),
        };
        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json["titulo"], "Roteador");
        assert_eq!(
            json["imagePath"],
            "/assets/images/65f000000000000000000002.png"
        );
    }
}
