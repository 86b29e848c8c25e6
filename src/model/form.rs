// File: ./src/model/form.rs
//! Editable form state for the create and detail screens.
//!
//! Fields are held as strings the way text inputs hold them, and are only
//! coerced to their numeric/boolean types when a submission is validated.
//! The form is always a detached copy: editing it never touches the loaded
//! record until a save succeeds.
use crate::model::{Book, BookPayload};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Author is required")]
    MissingAuthor,
    #[error("Genre is required")]
    MissingGenre,
    #[error("Year must be a non-negative whole number")]
    InvalidYear,
    #[error("Price must be a non-negative number")]
    InvalidPrice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub year: String,
    pub price: String,
    pub available: bool,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            genre: String::new(),
            year: String::new(),
            price: String::new(),
            available: true,
        }
    }
}

impl BookForm {
    /// Mirror a loaded record into editable string fields.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone().unwrap_or_default(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
            price: book.price.map(|p| p.to_string()).unwrap_or_default(),
            available: book.available,
        }
    }

    /// Validate and coerce into an outgoing payload.
    ///
    /// Title, author and genre must be non-empty after trimming; year must
    /// parse as a non-negative integer and price as a non-negative number.
    /// Validation failures never reach the network.
    pub fn validate(&self) -> Result<BookPayload, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(FormError::MissingAuthor);
        }
        if self.genre.trim().is_empty() {
            return Err(FormError::MissingGenre);
        }

        let year = self
            .year
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|y| (0..=u32::MAX as i64).contains(y))
            .ok_or(FormError::InvalidYear)? as u32;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or(FormError::InvalidPrice)?;

        Ok(BookPayload {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: self.description.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year,
            price,
            available: self.available,
        })
    }
}
