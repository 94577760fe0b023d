//! Quiz service wire format.

mod messages;

pub use messages::{
    delete_quiz_path, AnswerPayload, ListingQuery, PendingUpload, QuestionPayload,
    QuizSubmission, LIST_QUIZZES_PATH, SAVE_QUIZ_PATH,
};
