mod loader;

pub use loader::{load_quiz_draft, DraftQuestion, LoadError, QuizDraft};
