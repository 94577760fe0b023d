//! Save-time validation and packaging of the editor form.

use thiserror::Error;

use crate::models::{ImageState, QuestionCard, TextField};
use crate::protocol::{AnswerPayload, PendingUpload, QuestionPayload, QuizSubmission};

/// The form has marked fields; nothing may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{errors} field(s) need attention")]
pub struct ValidationFailed {
    pub errors: usize,
}

/// Validate every field and, if all pass, build the submission.
///
/// All cards are visited even after the first failure so every error is
/// marked in one pass. Payloads stop being collected once anything failed.
pub fn prepare_submission(
    title: &mut TextField,
    cards: &mut [QuestionCard],
    quiz_id: Option<&str>,
) -> Result<QuizSubmission, ValidationFailed> {
    let mut errors = 0;
    if !title.validate() {
        errors += 1;
    }

    let mut questions = Vec::with_capacity(cards.len());
    let mut uploads = Vec::new();

    for (index, card) in cards.iter_mut().enumerate() {
        if !card.content.validate() {
            errors += 1;
        }

        let mut answers = Vec::with_capacity(card.answers.len());
        for row in &mut card.answers {
            if !row.content.validate() {
                errors += 1;
            }
            answers.push(AnswerPayload {
                content: row.content.trimmed().to_string(),
                is_correct: row.is_correct,
            });
        }

        let has_correct = card.has_correct_answer();
        for row in &mut card.answers {
            row.correctness_error = !has_correct;
        }
        if !has_correct {
            errors += 1;
        }

        let image_url = card.image.reference(index);
        if let ImageState::Pending { path, file_name } = card.image.state() {
            uploads.push(PendingUpload {
                path: path.clone(),
                file_name: file_name.clone(),
            });
        }

        if errors == 0 {
            questions.push(QuestionPayload {
                content: card.content.trimmed().to_string(),
                image_url,
                answers,
                time: card.time_limit.readout(),
            });
        }
    }

    if errors > 0 {
        return Err(ValidationFailed { errors });
    }

    Ok(QuizSubmission {
        title: title.value().to_string(),
        questions,
        uploads,
        quiz_id: quiz_id.map(str::to_string),
    })
}
