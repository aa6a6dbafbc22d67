//! Domain models with validation at construction
//!
//! Request bodies are accepted loosely as [`BookInput`] and narrowed into
//! [`NewBook`] or [`BookPatch`]. Invalid input returns ValidationError, not panic.

pub mod book;
pub mod validation;

pub use book::{Book, BookId, BookInput, BookPatch, NewBook};
pub use validation::ValidationError;
