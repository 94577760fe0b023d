mod common;

use std::sync::Arc;

use common::{page_of, temp_file, Call, FakeApi};
use quiz_studio::editor::{load_preview, read_preview, submit, EditorEffect, NoticeKind, SharedForm};
use quiz_studio::models::ImageState;
use quiz_studio::{load_quiz_draft, EditorForm};
use reqwest::StatusCode;
use tokio::sync::Mutex;

const DRAFT: &str = r#"{
    "_id": "quiz-42",
    "title": "Capitals",
    "questions": [
        {
            "content": "Capital of France?",
            "image_url": "/quiz/image/abc123",
            "answers": [
                {"content": "Paris", "is_correct": true},
                {"content": "Lyon", "is_correct": false}
            ],
            "time": "10"
        }
    ]
}"#;

fn submission_of(form: &mut EditorForm) -> quiz_studio::protocol::QuizSubmission {
    match form.save() {
        Some(EditorEffect::Submit(submission)) => submission,
        other => panic!("expected a submission, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loaded_draft_saves_as_update() {
    let path = temp_file("quiz.json", DRAFT.as_bytes());
    let mut form = EditorForm::from_draft(load_quiz_draft(&path).unwrap());

    let submission = submission_of(&mut form);
    assert_eq!(submission.quiz_id.as_deref(), Some("quiz-42"));
    assert_eq!(submission.questions[0].image_url.as_deref(), Some("abc123"));
    assert_eq!(submission.questions[0].time, "10");
    assert!(submission.uploads.is_empty());

    let api = Arc::new(FakeApi::new(page_of(Vec::new(), 0)));
    let form: SharedForm = Arc::new(Mutex::new(form));
    submit(Arc::clone(&form), api.clone(), submission.clone()).await;

    assert_eq!(api.calls(), vec![Call::Save(submission)]);
    let form = form.lock().await;
    assert!(!form.is_saving());
    assert_eq!(form.notice().map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn test_rejected_save_shows_failure() {
    let path = temp_file("quiz.json", DRAFT.as_bytes());
    let mut form = EditorForm::from_draft(load_quiz_draft(&path).unwrap());
    let submission = submission_of(&mut form);
    assert!(form.is_saving());

    let api = Arc::new(FakeApi::failing(StatusCode::BAD_REQUEST));
    let form: SharedForm = Arc::new(Mutex::new(form));
    submit(Arc::clone(&form), api, submission).await;

    let form = form.lock().await;
    assert!(!form.is_saving());
    let notice = form.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert!(notice.message.contains("400"));
}

#[tokio::test]
async fn test_chosen_image_gets_preview_and_placeholder() {
    let path = temp_file("cat.png", &[0x89, b'P', b'N', b'G', 0x0D, 0x0A]);

    let mut form = EditorForm::from_draft(serde_json::from_str(DRAFT).unwrap());
    let card = form.cards()[0].id;
    let generation = match form.choose_image(card, path.clone()) {
        Some(EditorEffect::ReadImage { generation, .. }) => generation,
        other => panic!("expected an image read, got {:?}", other),
    };

    let form: SharedForm = Arc::new(Mutex::new(form));
    load_preview(Arc::clone(&form), card, generation, path.clone()).await;

    let mut form = form.lock().await;
    let image = &form.card(card).unwrap().image;
    assert!(matches!(image.state(), ImageState::Pending { file_name, .. } if file_name == "cat.png"));
    assert_eq!(image.preview().unwrap().caption, "cat.png · 6 B · PNG");
    assert!(form.notice().is_none());

    let submission = submission_of(&mut form);
    assert_eq!(submission.questions[0].image_url.as_deref(), Some("file_0"));
    assert_eq!(submission.uploads.len(), 1);
    assert_eq!(submission.uploads[0].path, path);
}

#[tokio::test]
async fn test_unreadable_image_falls_back_to_no_image() {
    let missing = std::env::temp_dir().join(format!("missing-{}.png", uuid::Uuid::new_v4()));
    assert!(read_preview(&missing).await.is_err());

    let mut form = EditorForm::new();
    let card = form.cards()[0].id;
    let generation = match form.choose_image(card, missing.clone()) {
        Some(EditorEffect::ReadImage { generation, .. }) => generation,
        other => panic!("expected an image read, got {:?}", other),
    };

    let form: SharedForm = Arc::new(Mutex::new(form));
    load_preview(Arc::clone(&form), card, generation, missing).await;

    let form = form.lock().await;
    assert_eq!(form.card(card).unwrap().image.state(), &ImageState::NoImage);
    assert_eq!(form.notice().map(|n| n.kind), Some(NoticeKind::Failure));
}
