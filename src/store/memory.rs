//! In-memory ticket store. Backs the integration test suite; mirrors the
//! observable semantics of the MongoDB adapter, including id validation
//! and insertion-order iteration.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::models::{NewTicket, Ticket, TicketUpdate};
use crate::store::{StoreError, TicketStore};

#[derive(Default)]
pub struct MemoryStore {
    tickets: RwLock<Vec<Ticket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_id(id: &str) -> Result<(), StoreError> {
    ObjectId::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn insert(&self, ticket: NewTicket) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        self.tickets.write().await.push(Ticket {
            id: id.clone(),
            title: ticket.title,
            description: ticket.description,
            client: ticket.client,
            status: ticket.status,
            opened_at: ticket.opened_at,
            updated_at: None,
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.tickets.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Ticket>, StoreError> {
        check_id(id)?;
        Ok(self
            .tickets
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn update(&self, id: &str, changes: TicketUpdate) -> Result<bool, StoreError> {
        check_id(id)?;
        let mut tickets = self.tickets.write().await;
        let Some(ticket) = tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(title) = changes.title {
            ticket.title = title;
        }
        if let Some(description) = changes.description {
            ticket.description = description;
        }
        if let Some(status) = changes.status {
            ticket.status = status;
        }
        if let Some(client) = changes.client {
            ticket.client = client;
        }
        ticket.updated_at = Some(Utc::now().to_rfc3339());
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        check_id(id)?;
        let mut tickets = self.tickets.write().await;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        Ok(tickets.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ticket(title: &str) -> NewTicket {
        NewTicket {
            title: title.into(),
            description: "desc".into(),
            client: "cliente".into(),
            status: "Aberto".into(),
            opened_at: Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let store = MemoryStore::new();
        let id = store.insert(new_ticket("Sem internet")).await.unwrap();
        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title, "Sem internet");
        assert_eq!(found.status, "Aberto");
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.insert(new_ticket("primeiro")).await.unwrap();
        store.insert(new_ticket("segundo")).await.unwrap();
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "primeiro");
        assert_eq!(all[1].title, "segundo");
    }

    #[tokio::test]
    async fn update_sets_updated_at_and_keeps_rest() {
        let store = MemoryStore::new();
        let id = store.insert(new_ticket("Roteador")).await.unwrap();
        let matched = store
            .update(
                &id,
                TicketUpdate {
                    status: Some("Fechado".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matched);
        let ticket = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(ticket.status, "Fechado");
        assert_eq!(ticket.title, "Roteador");
        assert!(ticket.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_unknown_id_matches_nothing() {
        let store = MemoryStore::new();
        let matched = store
            .update(&ObjectId::new().to_hex(), TicketUpdate::default())
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn delete_removes_ticket() {
        let store = MemoryStore::new();
        let id = store.insert(new_ticket("apagar")).await.unwrap();
        assert!(store.delete(&id).await.unwrap());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_id_is_invalid() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.find_by_id("123").await,
            Err(StoreError::InvalidId(_))
        ));
    }
}
