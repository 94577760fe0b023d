//! # quiz-studio
//!
//! Terminal client for authoring and browsing quizzes on a quiz web service.
//!
//! Two independent screens share the same HTTP client:
//!
//! - the **editor** builds a quiz out of question cards (2–4 answers each,
//!   one correct, optional image, 5–30 s time limit), validates it and posts
//!   it as one multipart request;
//! - the **browser** pages through the server's quiz list with search, sort
//!   and delete.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_studio::{Config, StudioError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StudioError> {
//!     let config = Config::load(None)?;
//!
//!     // Start a new quiz in the terminal editor
//!     quiz_studio::run_editor(&config, None).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
mod config;
pub mod data;
pub mod editor;
pub mod models;
pub mod protocol;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;

use thiserror::Error;

pub use api::{ApiError, HttpQuizApi, QuizApi};
pub use crate::config::Config;
pub use data::{load_quiz_draft, LoadError, QuizDraft};
pub use editor::EditorForm;

/// Error type for quiz-studio operations.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("failed to load quiz: {0}")]
    Load(#[from] LoadError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Open the quiz editor, on `draft` if given or on a blank quiz otherwise.
pub async fn run_editor(config: &Config, draft: Option<QuizDraft>) -> Result<(), StudioError> {
    let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(config)?);
    let form = match draft {
        Some(draft) => EditorForm::from_draft(draft),
        None => EditorForm::new(),
    };
    editor::run(api, form).await?;
    Ok(())
}

/// Open the quiz browser.
pub async fn run_browser(config: &Config) -> Result<(), StudioError> {
    let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(config)?);
    browser::run(api).await?;
    Ok(())
}
