//! MongoDB book store
//!
//! Documents are stored as `{ _id: ObjectId, title, author, year }`.
//! Documents of any other shape (a string `year` left by older writers, say)
//! are skipped and logged by `list_all`; a point lookup on one is a storage
//! error.
//! The client is pooled internally by the driver, so one store is shared by
//! all request handlers for the process lifetime.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{BookStore, StoreError};
use crate::models::{Book, BookId, BookPatch, NewBook};

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "coleccion";

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "books";

/// Stored document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
    year: i64,
}

impl From<BookDocument> for Book {
    fn from(d: BookDocument) -> Self {
        Self {
            id: BookId::from(d.id),
            title: d.title,
            author: d.author,
            year: d.year,
        }
    }
}

/// Book store backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoBookStore {
    books: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connect and ping the server so an unreachable store fails at startup.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = MongoBookStore::connect("mongodb://localhost:27017", "coleccion", "books").await?;
    /// ```
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database, collection, "Connected to MongoDB");
        Ok(Self::from_database(&db, collection))
    }

    /// Wrap a collection of an already connected database.
    pub fn from_database(db: &Database, collection: &str) -> Self {
        Self {
            books: db.collection(collection),
        }
    }
}

/// `$set` payload holding only the supplied fields.
fn set_document(patch: &BookPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(author) = &patch.author {
        set.insert("author", author.as_str());
    }
    if let Some(year) = patch.year {
        set.insert("year", year);
    }
    set
}

/// Decode raw documents, dropping the ones that do not match the book shape.
fn decode_books(raw: Vec<Document>) -> Vec<Book> {
    raw.into_iter()
        .filter_map(|document| {
            let id = document.get("_id").cloned();
            match mongodb::bson::from_document::<BookDocument>(document) {
                Ok(decoded) => Some(Book::from(decoded)),
                Err(e) => {
                    tracing::warn!(?id, "skipping undecodable book document: {}", e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let raw: Vec<Document> = self
            .books
            .clone_with_type::<Document>()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        let books = decode_books(raw);
        tracing::debug!(count = books.len(), "listed books");
        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let found = self
            .books
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(found.map(Book::from))
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let document = BookDocument {
            id: ObjectId::new(),
            title: book.title,
            author: book.author,
            year: book.year,
        };
        self.books.insert_one(&document).await?;
        tracing::debug!(id = %document.id, "book inserted");
        Ok(Book::from(document))
    }

    async fn update_by_id(
        &self,
        id: BookId,
        patch: BookPatch,
    ) -> Result<Option<Book>, StoreError> {
        let result = self
            .books
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": set_document(&patch) },
            )
            .await?;

        // matched, not modified: re-sending identical values is still a hit
        if result.matched_count == 0 {
            return Ok(None);
        }

        match self.find_by_id(id).await? {
            Some(book) => Ok(Some(book)),
            None => {
                tracing::warn!(%id, "book deleted between update and re-read");
                Err(StoreError::Vanished { id })
            }
        }
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError> {
        let result = self
            .books
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
