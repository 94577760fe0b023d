mod image;
mod question;
mod quiz;

pub use image::{upload_placeholder, ImageAttachment, ImagePreview, ImageState};
pub use question::{
    AnswerRow, CardId, QuestionCard, RowId, TextField, TimeLimit, ANSWER_MAX_CHARS, MAX_ANSWERS,
    MIN_ANSWERS, QUESTION_MAX_CHARS, TIME_LIMIT_DEFAULT, TIME_LIMIT_MAX, TIME_LIMIT_MIN,
};
pub use quiz::{QuizPage, QuizSummary, SortOption};
