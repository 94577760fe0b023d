//! Quiz browser state.

use tracing::{debug, warn};

use crate::models::{QuizPage, QuizSummary, SortOption};
use crate::protocol::ListingQuery;

use super::pagination::{PageControl, Pagination};

/// A listing fetch tagged with the token that must still be current when
/// its response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: u64,
    pub query: ListingQuery,
}

#[derive(Debug, Clone)]
pub enum BrowserEvent {
    SearchInput(char),
    SearchErase,
    NextSort,
    PreviousSort,
    Page(PageControl),
    SelectNext,
    SelectPrevious,
    /// Open the delete dialog for the selected quiz.
    RequestDelete,
    Confirm,
    Cancel,
    PageLoaded {
        token: u64,
        result: Result<QuizPage, String>,
    },
    DeleteFinished(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEffect {
    Fetch(PageRequest),
    Delete(String),
}

pub struct QuizBrowser {
    current_page: u32,
    search: String,
    sort: SortOption,
    quizzes: Vec<QuizSummary>,
    pagination: Pagination,
    selected: usize,
    pending_delete: Option<String>,
    deleting: bool,
    latest_token: u64,
    loading: bool,
    notice: Option<String>,
}

impl QuizBrowser {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            search: String::new(),
            sort: SortOption::default(),
            quizzes: Vec::new(),
            pagination: Pagination::default(),
            selected: 0,
            pending_delete: None,
            deleting: false,
            latest_token: 0,
            loading: false,
            notice: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn quizzes(&self) -> &[QuizSummary] {
        &self.quizzes
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn selected(&self) -> Option<&QuizSummary> {
        self.quizzes.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Quiz awaiting delete confirmation; the dialog is open while set.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Start loading `page` with the current search and sort.
    pub fn load_page(&mut self, page: u32) -> PageRequest {
        self.current_page = page;
        self.latest_token += 1;
        self.loading = true;

        let request = PageRequest {
            token: self.latest_token,
            query: ListingQuery {
                page,
                sort: self.sort,
                search: self.search.clone(),
            },
        };
        debug!(token = request.token, page, "page requested");
        request
    }

    /// Replace the list with a response. Returns false for stale tokens.
    pub fn apply_page(&mut self, token: u64, result: Result<QuizPage, String>) -> bool {
        if token != self.latest_token {
            warn!(token, latest = self.latest_token, "dropping stale quiz list");
            return false;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.quizzes = page.quizzes;
                self.pagination = Pagination::new(self.current_page, page.total_pages);
                self.selected = 0;
            }
            Err(reason) => {
                self.notice = Some(format!("Loading quizzes failed: {}", reason));
            }
        }
        true
    }

    pub fn request_delete(&mut self, quiz_id: &str) -> bool {
        let editable = self
            .quizzes
            .iter()
            .any(|q| q.id == quiz_id && q.is_editable);
        if editable {
            self.pending_delete = Some(quiz_id.to_string());
        }
        editable
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.pending_delete = None;
        }
    }

    /// The quiz to send the delete request for.
    pub fn confirm_delete(&mut self) -> Option<String> {
        if self.deleting {
            return None;
        }
        let target = self.pending_delete.clone()?;
        self.deleting = true;
        Some(target)
    }

    /// Close the dialog; reload the current page if the delete went through.
    pub fn delete_finished(&mut self, result: Result<(), String>) -> Option<PageRequest> {
        self.deleting = false;
        self.pending_delete = None;
        match result {
            Ok(()) => Some(self.load_page(self.current_page)),
            Err(reason) => {
                self.notice = Some(format!("Deleting the quiz failed: {}", reason));
                None
            }
        }
    }

    pub fn dispatch(&mut self, event: BrowserEvent) -> Option<BrowserEffect> {
        match event {
            BrowserEvent::PageLoaded { token, result } => {
                self.apply_page(token, result);
                return None;
            }
            BrowserEvent::DeleteFinished(result) => {
                return self.delete_finished(result).map(BrowserEffect::Fetch);
            }
            _ => {}
        }

        if self.notice.is_some() {
            if matches!(event, BrowserEvent::Confirm | BrowserEvent::Cancel) {
                self.notice = None;
            }
            return None;
        }

        if self.pending_delete.is_some() {
            return match event {
                BrowserEvent::Confirm => self.confirm_delete().map(BrowserEffect::Delete),
                BrowserEvent::Cancel => {
                    self.cancel_delete();
                    None
                }
                _ => None,
            };
        }

        match event {
            BrowserEvent::SearchInput(c) => {
                self.search.push(c);
                Some(BrowserEffect::Fetch(self.load_page(1)))
            }
            BrowserEvent::SearchErase => {
                self.search.pop()?;
                Some(BrowserEffect::Fetch(self.load_page(1)))
            }
            BrowserEvent::NextSort => {
                self.sort = self.sort.next();
                Some(BrowserEffect::Fetch(self.load_page(1)))
            }
            BrowserEvent::PreviousSort => {
                self.sort = self.sort.previous();
                Some(BrowserEffect::Fetch(self.load_page(1)))
            }
            BrowserEvent::Page(control) => {
                let page = self.pagination.target(control)?;
                Some(BrowserEffect::Fetch(self.load_page(page)))
            }
            BrowserEvent::SelectNext => {
                if self.selected + 1 < self.quizzes.len() {
                    self.selected += 1;
                }
                None
            }
            BrowserEvent::SelectPrevious => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            BrowserEvent::RequestDelete => {
                if let Some(id) = self.selected().map(|q| q.id.clone()) {
                    self.request_delete(&id);
                }
                None
            }
            BrowserEvent::Confirm
            | BrowserEvent::Cancel
            | BrowserEvent::PageLoaded { .. }
            | BrowserEvent::DeleteFinished(_) => None,
        }
    }
}

impl Default for QuizBrowser {
    fn default() -> Self {
        Self::new()
    }
}
