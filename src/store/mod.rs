//! Ticket store adapter: a document collection accessed by
//! insert/find/update/delete. Handlers depend only on the trait; the
//! MongoDB implementation is wired in at startup and an in-memory one
//! backs the integration tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTicket, Ticket, TicketUpdate};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier is not syntactically valid for the store.
    #[error("invalid ticket id: {0}")]
    InvalidId(String),

    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persist a new ticket and return its assigned identifier.
    async fn insert(&self, ticket: NewTicket) -> Result<String, StoreError>;

    /// All tickets, in store iteration order.
    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Ticket>, StoreError>;

    /// Overwrite the provided fields and refresh `updatedAt`.
    /// Returns `false` when no ticket matched.
    async fn update(&self, id: &str, changes: TicketUpdate) -> Result<bool, StoreError>;

    /// Returns `false` when no ticket matched.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
