//! Quiz browser.
//!
//! Paginated, searchable, sortable list of quizzes with delete confirmation.

mod browser;
mod pagination;
mod state;
mod ui;

pub use browser::{delete_quiz, fetch_page, run, SharedBrowser};
pub use pagination::{PageControl, Pagination};
pub use state::{BrowserEffect, BrowserEvent, PageRequest, QuizBrowser};
