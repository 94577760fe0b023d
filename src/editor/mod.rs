//! Quiz editor.
//!
//! Builds a quiz out of question cards and sends it to the server in one
//! multipart request.

mod editor;
mod state;
mod ui;
mod validation;

pub use editor::{load_preview, read_preview, run, submit, SharedForm};
pub use state::{Control, EditorEffect, EditorEvent, EditorForm, Notice, NoticeKind, PathPrompt};
pub use validation::{prepare_submission, ValidationFailed};
