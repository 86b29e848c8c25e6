// File: ./src/controller/list.rs
//! Book list screen: fixed-page fetch, query filter, manual refresh.
use crate::client::{ApiError, BookClient};
use crate::model::Book;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ListController {
    state: ListState,
    books: Vec<Book>,
    query: String,
    refreshing: bool,
    page: u32,
    limit: u32,
}

impl ListController {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filter is recomputed by `filtered()` on every read; there is no
    /// debouncing.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Case-insensitive substring match of the query against title, author
    /// and description. An empty query yields the unfiltered collection.
    pub fn filtered(&self) -> Vec<&Book> {
        let q = self.query.trim().to_lowercase();
        if q.is_empty() {
            return self.books.iter().collect();
        }
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&q)
                    || b.author.to_lowercase().contains(&q)
                    || b.description
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&q)
            })
            .collect()
    }

    // --- TRANSITIONS ---

    pub fn begin_load(&mut self) {
        self.state = ListState::Loading;
    }

    /// A refresh keeps the currently displayed data until new data arrives.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    /// Reconcile a fetch result. Concurrent refreshes are not deduplicated:
    /// results are applied in completion order and the last one wins.
    pub fn apply_fetch(&mut self, result: Result<Vec<Book>, ApiError>) {
        self.refreshing = false;
        match result {
            Ok(books) => {
                self.books = books;
                self.state = ListState::Ready;
            }
            Err(e) => {
                self.state = ListState::Error(e.to_string());
            }
        }
    }

    // --- ASYNC WRAPPERS ---

    pub async fn load(&mut self, client: &BookClient) {
        self.begin_load();
        let result = client.fetch_books(self.page, self.limit).await;
        self.apply_fetch(result);
    }

    pub async fn refresh(&mut self, client: &BookClient) {
        self.begin_refresh();
        let result = client.fetch_books(self.page, self.limit).await;
        self.apply_fetch(result);
    }
}
