#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use quiz_studio::models::{QuizPage, QuizSummary};
use quiz_studio::protocol::{ListingQuery, QuizSubmission};
use quiz_studio::{ApiError, QuizApi};
use reqwest::StatusCode;

/// One call received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Save(QuizSubmission),
    List(String),
    Delete(String),
}

/// In-memory [`QuizApi`] recording every call.
pub struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    pub page: QuizPage,
    pub fail_with: Option<StatusCode>,
}

impl FakeApi {
    pub fn new(page: QuizPage) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            page,
            fail_with: None,
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::new(page_of(Vec::new(), 0))
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(status) => Err(ApiError::Status(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn save_quiz(&self, submission: &QuizSubmission) -> Result<(), ApiError> {
        self.record(Call::Save(submission.clone()))
    }

    async fn list_quizzes(&self, query: &ListingQuery) -> Result<QuizPage, ApiError> {
        self.record(Call::List(query.path()))?;
        Ok(self.page.clone())
    }

    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(quiz_id.to_string()))
    }
}

pub fn quiz(id: &str, title: &str, is_editable: bool) -> QuizSummary {
    QuizSummary {
        id: id.to_string(),
        title: title.to_string(),
        author: "alice".to_string(),
        questions: 3,
        is_editable,
    }
}

pub fn page_of(quizzes: Vec<QuizSummary>, total_pages: u32) -> QuizPage {
    QuizPage {
        quizzes,
        total_pages,
    }
}

/// Write `bytes` to a fresh file under the system temp dir.
pub fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quiz-studio-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
