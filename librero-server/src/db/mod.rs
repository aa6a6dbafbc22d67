//! Storage gateway - one fixed collection of books
//!
//! # Design Principles
//!
//! - One trait, injected into the router as `Arc<dyn BookStore>`
//! - Malformed ids never reach the gateway; they are parsed at the HTTP edge
//! - Update matches by id and re-reads; a record that disappears in between
//!   is reported as [`StoreError::Vanished`], never silently dropped
//! - No caching, no multi-operation transactions

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::models::{Book, BookId, BookPatch, NewBook};

pub use memory::MemoryBookStore;
pub use mongo::{MongoBookStore, DEFAULT_COLLECTION, DEFAULT_DATABASE};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("book '{id}' matched an update but was gone on re-read")]
    Vanished { id: BookId },
}

/// Book storage gateway (testable)
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Every stored book, unpaginated, in no guaranteed order.
    async fn list_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Store a new book under a freshly generated id.
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Apply `patch` and return the post-update record, or `None` when no
    /// book has this id.
    async fn update_by_id(&self, id: BookId, patch: BookPatch)
        -> Result<Option<Book>, StoreError>;

    /// Returns `false` when no book has this id.
    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError>;
}
