// File: ./src/model/book.rs
use serde::{Deserialize, Serialize};

/// A book record as the backend serves it. Copies are transient and owned
/// by a single screen; nothing is cached across screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub available: bool,
    #[serde(default, rename = "addedBy", skip_serializing_if = "Option::is_none")]
    pub added_by: Option<AddedBy>,
}

/// Display-only reference to the user who added a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedBy {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AddedBy {
    pub fn display(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("-")
    }
}

/// Response shape of `GET /api/books`. A body without a `books` field
/// deserializes to an empty collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPage {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Single-record responses arrive either as `{ "book": {…} }` or as the
/// record directly, depending on the backend deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookEnvelope {
    Wrapped { book: Book },
    Bare(Book),
}

impl BookEnvelope {
    pub fn into_book(self) -> Book {
        match self {
            BookEnvelope::Wrapped { book } => book,
            BookEnvelope::Bare(book) => book,
        }
    }
}

/// Outgoing body for create/update. Built from a validated form, never
/// directly from user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub year: u32,
    pub price: f64,
    pub available: bool,
}
