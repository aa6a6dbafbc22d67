//! librero-server: HTTP CRUD service over a collection of books
//!
//! The storage gateway (`db`) is constructed once at startup and injected
//! into the axum router (`http`). Request bodies are validated into the
//! domain types in `models` before any storage call is made.

pub mod db;
pub mod http;
pub mod models;

pub use db::{BookStore, MemoryBookStore, MongoBookStore, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use models::{Book, BookId, BookInput, BookPatch, NewBook, ValidationError};
