//! Book record and the request shapes that produce it
//!
//! Supplied-field rule for request bodies:
//! - `title` / `author` count only as non-empty JSON strings
//! - `year` counts as any JSON integer, `0` included
//! - anything else (null, bool, float, number-as-string) is treated as absent

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::ValidationError;

/// Store-generated book identifier, rendered externally as 24 hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(ObjectId);

impl BookId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier from its hex form.
    ///
    /// Returns `None` for anything that is not a well-formed ObjectId; callers
    /// treat that as "no such book".
    ///
    /// # Example
    /// ```
    /// use librero_server::models::BookId;
    ///
    /// assert!(BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_some());
    /// assert!(BookId::parse("not-an-id").is_none());
    /// assert!(BookId::parse("").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        ObjectId::parse_str(s).ok().map(Self)
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

/// Persisted book, as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(author) = &patch.author {
            self.author.clone_from(author);
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

/// Validated create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// Validated partial update; at least one field is set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}

/// Raw request body for POST and PUT.
///
/// Fields are kept as untyped JSON so a wrong type reads as "not supplied"
/// instead of failing the whole body. Only a JSON object deserializes; an
/// array is never read by position.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct BookInput {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub year: Option<Value>,
}

impl From<Map<String, Value>> for BookInput {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            title: body.remove("title"),
            author: body.remove("author"),
            year: body.remove("year"),
        }
    }
}

impl BookInput {
    /// Require all three fields.
    pub fn into_new_book(self) -> Result<NewBook, ValidationError> {
        match (
            text_field(self.title),
            text_field(self.author),
            year_field(self.year),
        ) {
            (Some(title), Some(author), Some(year)) => Ok(NewBook {
                title,
                author,
                year,
            }),
            _ => Err(ValidationError::MissingRequired),
        }
    }

    /// Keep only supplied fields; reject when none are.
    pub fn into_patch(self) -> Result<BookPatch, ValidationError> {
        let patch = BookPatch {
            title: text_field(self.title),
            author: text_field(self.author),
            year: year_field(self.year),
        };

        if patch.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(patch)
    }
}

fn text_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn year_field(value: Option<Value>) -> Option<i64> {
    value.as_ref().and_then(Value::as_i64)
}
