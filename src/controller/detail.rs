// File: ./src/controller/detail.rs
//! Book detail screen: load by id, local edit form, save, confirmed delete.
use crate::client::{ApiError, BookClient};
use crate::model::{Book, BookForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Ready,
    /// The server answered 404 for this id.
    Missing,
    Error(String),
}

/// Mutation sub-state, only entered from `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Saving,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct DetailController {
    id: String,
    state: DetailState,
    activity: Activity,
    book: Option<Book>,
    form: BookForm,
    editing: bool,
}

impl DetailController {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: DetailState::Loading,
            activity: Activity::Idle,
            book: None,
            form: BookForm::default(),
            editing: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// The last successfully loaded record; only changes on a confirmed
    /// load, never while editing.
    pub fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    // --- TRANSITIONS ---

    pub fn begin_load(&mut self) {
        self.state = DetailState::Loading;
    }

    pub fn apply_load(&mut self, result: Result<Option<Book>, ApiError>) {
        match result {
            Ok(Some(book)) => {
                self.form = BookForm::from_book(&book);
                self.book = Some(book);
                self.state = DetailState::Ready;
                self.editing = false;
            }
            Ok(None) => {
                self.book = None;
                self.state = DetailState::Missing;
            }
            Err(e) => {
                self.state = DetailState::Error(e.to_string());
            }
        }
    }

    /// Purely local; the record is never locked server-side.
    pub fn begin_edit(&mut self) {
        if self.state == DetailState::Ready {
            self.editing = true;
        }
    }

    /// Reassign the form from the last-loaded record, discarding any
    /// in-progress edits.
    pub fn cancel_edit(&mut self) {
        if let Some(book) = &self.book {
            self.form = BookForm::from_book(book);
        }
        self.editing = false;
    }

    pub fn begin_save(&mut self) {
        self.activity = Activity::Saving;
    }

    /// On failure the screen keeps its pre-failure state: the loaded record
    /// and the edited form are both untouched.
    pub fn apply_save(&mut self, result: Result<(), ApiError>) -> Result<(), String> {
        self.activity = Activity::Idle;
        match result {
            Ok(()) => {
                self.editing = false;
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn begin_delete(&mut self) {
        self.activity = Activity::Deleting;
    }

    pub fn apply_delete(&mut self, result: Result<(), ApiError>) -> Result<(), String> {
        self.activity = Activity::Idle;
        result.map_err(|e| e.to_string())
    }

    // --- ASYNC WRAPPERS ---

    pub async fn load(&mut self, client: &BookClient) {
        self.begin_load();
        let result = client.fetch_book(&self.id).await;
        self.apply_load(result);
    }

    /// Validate the form, issue the full-record update, then refetch so the
    /// displayed record reflects what the server stored.
    pub async fn save(&mut self, client: &BookClient) -> Result<(), String> {
        let payload = self.form.validate().map_err(|e| e.to_string())?;
        self.begin_save();
        let outcome = self.apply_save(client.update_book(&self.id, &payload).await);
        if outcome.is_ok() {
            self.load(client).await;
        }
        outcome
    }

    /// Issue the delete. Callers must have obtained explicit user
    /// confirmation first; on `Ok` the host navigates back.
    pub async fn delete(&mut self, client: &BookClient) -> Result<(), String> {
        self.begin_delete();
        self.apply_delete(client.delete_book(&self.id).await)
    }
}
