//! MongoDB-backed ticket store over the `chamados` collection.

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::models::{NewTicket, Ticket, TicketUpdate};
use crate::store::{StoreError, TicketStore};

/// BSON shape of a ticket as stored in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct TicketDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    titulo: String,
    descricao: String,
    cliente: String,
    status: String,
    #[serde(rename = "dataAbertura")]
    data_abertura: String,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

impl From<TicketDocument> for Ticket {
    fn from(doc: TicketDocument) -> Self {
        Ticket {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: doc.titulo,
            description: doc.descricao,
            client: doc.cliente,
            status: doc.status,
            opened_at: doc.data_abertura,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct MongoStore {
    tickets: Collection<TicketDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        let tickets = client.database(db_name).collection("chamados");
        Ok(Self { tickets })
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl TicketStore for MongoStore {
    async fn insert(&self, ticket: NewTicket) -> Result<String, StoreError> {
        let document = TicketDocument {
            id: None,
            titulo: ticket.title,
            descricao: ticket.description,
            cliente: ticket.client,
            status: ticket.status,
            data_abertura: ticket.opened_at,
            updated_at: None,
        };
        let result = self
            .tickets
            .insert_one(&document, None)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("insert returned no ObjectId")))?;
        Ok(id.to_hex())
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let cursor = self
            .tickets
            .find(None, None)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        let documents: Vec<TicketDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(documents.into_iter().map(Ticket::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Ticket>, StoreError> {
        let oid = parse_id(id)?;
        let found = self
            .tickets
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(found.map(Ticket::from))
    }

    async fn update(&self, id: &str, changes: TicketUpdate) -> Result<bool, StoreError> {
        let oid = parse_id(id)?;

        let mut set = Document::new();
        if let Some(title) = changes.title {
            set.insert("titulo", title);
        }
        if let Some(description) = changes.description {
            set.insert("descricao", description);
        }
        if let Some(status) = changes.status {
            set.insert("status", status);
        }
        if let Some(client) = changes.client {
            set.insert("cliente", client);
        }
        set.insert("updatedAt", Utc::now().to_rfc3339());

        let result = self
            .tickets
            .update_one(doc! { "_id": oid }, doc! { "$set": set }, None)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let oid = parse_id(id)?;
        let result = self
            .tickets
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_objectid_hex() {
        let oid = ObjectId::new();
        assert!(parse_id(&oid.to_hex()).is_ok());
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(
            parse_id("not-an-id"),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn document_roundtrips_to_ticket() {
        let oid = ObjectId::new();
        let document = TicketDocument {
            id: Some(oid),
            titulo: "Sem sinal".into(),
            descricao: "Queda total".into(),
            cliente: "Ana".into(),
            status: "Aberto".into(),
            data_abertura: "2025-08-25T10:00:00+00:00".into(),
            updated_at: None,
        };
        let ticket = Ticket::from(document);
        assert_eq!(ticket.id, oid.to_hex());
        assert_eq!(ticket.title, "Sem sinal");
        assert!(ticket.updated_at.is_none());
    }
}
