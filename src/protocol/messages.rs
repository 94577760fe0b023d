//! Wire types and endpoint paths of the quiz service.
//!
//! Saves go out as multipart form data, listings come back as JSON.

use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::models::SortOption;

/// Endpoint receiving the multipart quiz form.
pub const SAVE_QUIZ_PATH: &str = "/quiz/add";

/// Endpoint serving paginated quiz summaries.
pub const LIST_QUIZZES_PATH: &str = "/quiz/data";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Path deleting the quiz `quiz_id`.
pub fn delete_quiz_path(quiz_id: &str) -> String {
    format!(
        "/quiz/delete/{}",
        utf8_percent_encode(quiz_id, URI_COMPONENT)
    )
}

/// An answer as sent to (and rendered by) the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A question inside the `questions` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPayload {
    pub content: String,
    /// Existing image id, `file_<n>` placeholder, or null.
    pub image_url: Option<String>,
    pub answers: Vec<AnswerPayload>,
    /// Duration in seconds, sent as an integer-like string.
    pub time: String,
}

/// A local file sent as one `files` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub path: PathBuf,
    pub file_name: String,
}

/// Everything one save sends to [`SAVE_QUIZ_PATH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub title: String,
    pub questions: Vec<QuestionPayload>,
    pub uploads: Vec<PendingUpload>,
    /// Set when updating a quiz that already exists.
    pub quiz_id: Option<String>,
}

impl QuizSubmission {
    /// The JSON text of the `questions` field.
    pub fn questions_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.questions)
    }
}

/// Query of one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: u32,
    pub sort: SortOption,
    pub search: String,
}

impl ListingQuery {
    /// Request path with the query string, search text percent-encoded.
    pub fn path(&self) -> String {
        format!(
            "{}?page={}&sort={}&search={}",
            LIST_QUIZZES_PATH,
            self.page,
            self.sort.as_str(),
            utf8_percent_encode(&self.search, URI_COMPONENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_path_encodes_search() {
        let query = ListingQuery {
            page: 3,
            sort: SortOption::TitleAsc,
            search: "abc".to_string(),
        };
        assert_eq!(query.path(), "/quiz/data?page=3&sort=title_asc&search=abc");

        let query = ListingQuery {
            page: 1,
            sort: SortOption::UpdatedDesc,
            search: "rock & roll?".to_string(),
        };
        assert_eq!(
            query.path(),
            "/quiz/data?page=1&sort=updated_date_desc&search=rock%20%26%20roll%3F"
        );
    }

    #[test]
    fn test_search_keeps_uri_component_marks() {
        let query = ListingQuery {
            page: 1,
            sort: SortOption::TitleAsc,
            search: "it's (ok)! ~*-_.ł".to_string(),
        };
        assert!(query.path().ends_with("search=it's%20(ok)!%20~*-_.%C5%82"));
    }

    #[test]
    fn test_delete_path() {
        assert_eq!(delete_quiz_path("65f0aa"), "/quiz/delete/65f0aa");
    }

    #[test]
    fn test_questions_json_shape() {
        let submission = QuizSubmission {
            title: "T".to_string(),
            questions: vec![QuestionPayload {
                content: "Q1".to_string(),
                image_url: None,
                answers: vec![AnswerPayload {
                    content: "A".to_string(),
                    is_correct: true,
                }],
                time: "10".to_string(),
            }],
            uploads: Vec::new(),
            quiz_id: None,
        };
        let json = submission.questions_json().unwrap();
        assert_eq!(
            json,
            r#"[{"content":"Q1","image_url":null,"answers":[{"content":"A","is_correct":true}],"time":"10"}]"#
        );
    }
}
