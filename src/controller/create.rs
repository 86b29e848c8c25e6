// File: ./src/controller/create.rs
//! Create-book screen: local validation gate, then a single POST.
use crate::client::{ApiError, BookClient};
use crate::model::{Book, BookForm};

/// Where the host should navigate after a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The backend returned the created record's id.
    ShowDetail(String),
    /// No id came back; return to the list.
    Back,
}

#[derive(Debug, Clone)]
pub struct CreateController {
    form: BookForm,
    submitting: bool,
}

impl Default for CreateController {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateController {
    pub fn new() -> Self {
        // Seed values a fresh create screen shows.
        let form = BookForm {
            year: "2024".to_string(),
            price: "0".to_string(),
            ..BookForm::default()
        };
        Self {
            form,
            submitting: false,
        }
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // --- TRANSITIONS ---

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// On failure the form is left as typed so the user can correct it.
    pub fn apply_submit(
        &mut self,
        result: Result<Option<Book>, ApiError>,
    ) -> Result<CreateOutcome, String> {
        self.submitting = false;
        match result {
            Ok(Some(book)) => Ok(CreateOutcome::ShowDetail(book.id)),
            Ok(None) => Ok(CreateOutcome::Back),
            Err(e) => Err(e.to_string()),
        }
    }

    // --- ASYNC WRAPPER ---

    /// Validate locally, then create. Validation failures never reach the
    /// network.
    pub async fn submit(&mut self, client: &BookClient) -> Result<CreateOutcome, String> {
        let payload = self.form.validate().map_err(|e| e.to_string())?;
        self.begin_submit();
        self.apply_submit(client.create_book(&payload).await)
    }
}
