//! In-memory book store
//!
//! Backs the test suite and `librero serve --in-memory`. Each operation takes
//! the lock once, so every call is atomic with respect to the others.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::models::{Book, BookId, BookPatch, NewBook};

/// Thread-safe in-memory store keyed by generated ObjectIds
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<BookId, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = Book {
            id: BookId::generate(),
            title: book.title,
            author: book.author,
            year: book.year,
        };
        self.books.write().await.insert(book.id, book.clone());
        tracing::debug!(id = %book.id, "book inserted");
        Ok(book)
    }

    async fn update_by_id(
        &self,
        id: BookId,
        patch: BookPatch,
    ) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;
        Ok(books.get_mut(&id).map(|book| {
            book.apply(&patch);
            book.clone()
        }))
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError> {
        Ok(self.books.write().await.remove(&id).is_some())
    }
}
