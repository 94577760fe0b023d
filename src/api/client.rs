//! HTTP access to the quiz service.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::QuizPage;
use crate::protocol::{delete_quiz_path, ListingQuery, QuizSubmission, SAVE_QUIZ_PATH};

/// Errors talking to the quiz service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("failed to encode questions: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The three endpoints the editor and the browser call.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `POST /quiz/add` with the multipart quiz form.
    async fn save_quiz(&self, submission: &QuizSubmission) -> Result<(), ApiError>;

    /// `GET /quiz/data` for one page.
    async fn list_quizzes(&self, query: &ListingQuery) -> Result<QuizPage, ApiError>;

    /// `DELETE /quiz/delete/{id}`.
    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ApiError>;
}

/// [`QuizApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    client: Client,
    base_url: String,
    session_id: Option<String>,
}

impl HttpQuizApi {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_id: config.session_id.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the session cookie the server authenticates with.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_id {
            Some(id) => request.header(reqwest::header::COOKIE, format!("session_id={}", id)),
            None => request,
        }
    }

    async fn build_form(submission: &QuizSubmission) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("title", submission.title.clone())
            .text("questions", submission.questions_json()?);

        for upload in &submission.uploads {
            let bytes = tokio::fs::read(&upload.path)
                .await
                .map_err(|source| ApiError::Upload {
                    path: upload.path.clone(),
                    source,
                })?;
            debug!(file = %upload.file_name, size = bytes.len(), "attaching image");
            let part = Part::bytes(bytes)
                .file_name(upload.file_name.clone())
                .mime_str(mime_for(&upload.file_name))?;
            form = form.part("files", part);
        }

        if let Some(quiz_id) = &submission.quiz_id {
            form = form.text("quiz_id", quiz_id.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn save_quiz(&self, submission: &QuizSubmission) -> Result<(), ApiError> {
        let form = Self::build_form(submission).await?;
        info!(
            questions = submission.questions.len(),
            uploads = submission.uploads.len(),
            "saving quiz"
        );

        let response = self
            .authorize(self.client.post(self.url(SAVE_QUIZ_PATH)))
            .multipart(form)
            .send()
            .await?;

        ensure_success(response.status())
    }

    async fn list_quizzes(&self, query: &ListingQuery) -> Result<QuizPage, ApiError> {
        let path = query.path();
        debug!(%path, "fetching quiz list");

        let response = self
            .authorize(self.client.get(self.url(&path)))
            .send()
            .await?;
        ensure_success(response.status())?;

        Ok(response.json::<QuizPage>().await?)
    }

    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ApiError> {
        info!(%quiz_id, "deleting quiz");

        let response = self
            .authorize(self.client.delete(self.url(&delete_quiz_path(quiz_id))))
            .send()
            .await?;

        ensure_success(response.status())
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_by_extension() {
        assert_eq!(mime_for("cat.PNG"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_only_2xx_is_success() {
        assert!(ensure_success(StatusCode::OK).is_ok());
        assert!(ensure_success(StatusCode::NO_CONTENT).is_ok());
        assert!(matches!(
            ensure_success(StatusCode::BAD_REQUEST),
            Err(ApiError::Status(StatusCode::BAD_REQUEST))
        ));
        assert!(ensure_success(StatusCode::FOUND).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let config = Config {
            base_url: "http://localhost:8000/".to_string(),
            ..Config::default()
        };
        let api = HttpQuizApi::new(&config).unwrap();
        assert_eq!(api.url("/quiz/add"), "http://localhost:8000/quiz/add");
    }

    #[tokio::test]
    async fn test_missing_upload_file_is_reported() {
        let submission = QuizSubmission {
            title: "T".to_string(),
            questions: Vec::new(),
            uploads: vec![crate::protocol::PendingUpload {
                path: PathBuf::from("/definitely/not/here.png"),
                file_name: "here.png".to_string(),
            }],
            quiz_id: None,
        };
        let result = HttpQuizApi::build_form(&submission).await;
        assert!(matches!(result, Err(ApiError::Upload { .. })));
    }
}
