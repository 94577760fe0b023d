//! Quiz editor state.
//!
//! [`EditorForm`] owns the whole form. Input reaches it through
//! [`EditorForm::dispatch`], which resolves the focused control and applies
//! the matching rule. Side effects (file reads, the save request) are
//! returned as [`EditorEffect`]s for the runner to perform.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::data::QuizDraft;
use crate::models::{
    AnswerRow, CardId, ImageAttachment, ImagePreview, QuestionCard, RowId, TextField, TimeLimit,
    MAX_ANSWERS, MIN_ANSWERS, QUESTION_MAX_CHARS,
};
use crate::protocol::QuizSubmission;

use super::validation::prepare_submission;

/// A focusable element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Title,
    ChooseImage(CardId),
    RemoveImage(CardId),
    QuestionContent(CardId),
    RemoveQuestion(CardId),
    AnswerContent(CardId, RowId),
    Correct(CardId, RowId),
    RemoveAnswer(CardId, RowId),
    AddAnswer(CardId),
    TimeLimit(CardId),
    AddQuestion,
    Save,
}

impl Control {
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Control::Title | Control::QuestionContent(_) | Control::AnswerContent(..)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Blocking message; input is ignored until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Path entry opened by the "choose image" control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub card: CardId,
    pub input: String,
}

#[derive(Debug, Clone)]
pub enum EditorEvent {
    FocusNext,
    FocusPrevious,
    /// Enter/Space on the focused control.
    Activate,
    Input(char),
    Erase,
    /// Move the focused slider.
    Adjust(i64),
    /// Delete the focused answer row, or the card from its delete control.
    Remove,
    Save,
    Cancel,
    PreviewLoaded {
        card: CardId,
        generation: u64,
        result: Result<ImagePreview, String>,
    },
    SaveFinished(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    ReadImage {
        card: CardId,
        generation: u64,
        path: PathBuf,
    },
    Submit(QuizSubmission),
}

pub struct EditorForm {
    title: TextField,
    quiz_id: Option<String>,
    cards: Vec<QuestionCard>,
    focus: Control,
    /// Position of `focus` when it was last resolved, used to pick a
    /// neighbour once the focused control disappears.
    focus_index: usize,
    prompt: Option<PathPrompt>,
    notice: Option<Notice>,
    status: Option<String>,
    saving: bool,
}

impl EditorForm {
    /// An empty quiz with one blank question.
    pub fn new() -> Self {
        Self {
            title: TextField::new(None),
            quiz_id: None,
            cards: vec![QuestionCard::blank()],
            focus: Control::Title,
            focus_index: 0,
            prompt: None,
            notice: None,
            status: None,
            saving: false,
        }
    }

    /// Populate the form from an existing quiz, repairing what breaks the
    /// card invariants.
    pub fn from_draft(draft: QuizDraft) -> Self {
        let mut cards: Vec<QuestionCard> = draft
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let mut card = QuestionCard::blank();
                card.content = TextField::with_value(&question.content, Some(QUESTION_MAX_CHARS));
                card.image = ImageAttachment::from_server_url(question.image_url.as_deref());
                card.time_limit = TimeLimit::new(question.time);

                let mut seen_correct = false;
                card.answers = question
                    .answers
                    .iter()
                    .map(|answer| {
                        let correct = answer.is_correct && !seen_correct;
                        seen_correct |= answer.is_correct;
                        AnswerRow::with_content(&answer.content, correct)
                    })
                    .collect();

                if card.answers.len() > MAX_ANSWERS {
                    warn!(question = index, count = card.answers.len(), "dropping extra answers");
                    card.answers.truncate(MAX_ANSWERS);
                }
                while card.answers.len() < MIN_ANSWERS {
                    warn!(question = index, "padding question with a blank answer");
                    card.answers.push(AnswerRow::blank());
                }
                card
            })
            .collect();

        if cards.is_empty() {
            cards.push(QuestionCard::blank());
        }

        Self {
            title: TextField::with_value(&draft.title, None),
            quiz_id: draft.quiz_id.filter(|id| !id.trim().is_empty()),
            cards,
            ..Self::new()
        }
    }

    pub fn title(&self) -> &TextField {
        &self.title
    }

    pub fn title_mut(&mut self) -> &mut TextField {
        &mut self.title
    }

    pub fn quiz_id(&self) -> Option<&str> {
        self.quiz_id.as_deref()
    }

    pub fn cards(&self) -> &[QuestionCard] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&QuestionCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut QuestionCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn card_index(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn prompt(&self) -> Option<&PathPrompt> {
        self.prompt.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    // Question list

    /// Question delete controls are shown only while several cards exist.
    pub fn can_delete_question(&self) -> bool {
        self.cards.len() > 1
    }

    pub fn add_question_card(&mut self) -> CardId {
        let card = QuestionCard::blank();
        let id = card.id;
        self.cards.push(card);
        debug!(%id, total = self.cards.len(), "question added");
        self.sync_focus();
        id
    }

    pub fn remove_question_card(&mut self, id: CardId) -> bool {
        if !self.can_delete_question() {
            return false;
        }
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        let removed = self.cards.len() != before;
        if removed {
            debug!(%id, total = self.cards.len(), "question removed");
            self.sync_focus();
        }
        removed
    }

    // Answer rows

    pub fn add_answer_row(&mut self, card: CardId) -> Option<RowId> {
        let row = self.card_mut(card)?.add_answer_row();
        self.sync_focus();
        row
    }

    pub fn remove_answer_row(&mut self, card: CardId, row: RowId) -> bool {
        let removed = self
            .card_mut(card)
            .is_some_and(|c| c.remove_answer_row(row));
        if removed {
            self.sync_focus();
        }
        removed
    }

    pub fn set_correct(&mut self, card: CardId, row: RowId, checked: bool) -> bool {
        self.card_mut(card)
            .is_some_and(|c| c.set_correct(row, checked))
    }

    pub fn toggle_correct(&mut self, card: CardId, row: RowId) -> bool {
        self.card_mut(card).is_some_and(|c| c.toggle_correct(row))
    }

    pub fn step_time_limit(&mut self, card: CardId, delta: i64) {
        if let Some(card) = self.card_mut(card) {
            card.time_limit.step(delta);
        }
    }

    // Images

    /// Start attaching `path`; the returned effect reads it for the preview.
    pub fn choose_image(&mut self, card: CardId, path: PathBuf) -> Option<EditorEffect> {
        let image = &mut self.card_mut(card)?.image;
        let generation = image.choose_file(path.clone());
        debug!(%card, generation, path = %path.display(), "image chosen");
        self.sync_focus();
        Some(EditorEffect::ReadImage {
            card,
            generation,
            path,
        })
    }

    pub fn remove_image(&mut self, card: CardId) {
        if let Some(card) = self.card_mut(card) {
            card.image.remove();
        }
        self.sync_focus();
    }

    fn preview_loaded(&mut self, card: CardId, generation: u64, result: Result<ImagePreview, String>) {
        let Some(target) = self.card_mut(card) else {
            return;
        };
        let applied = match result {
            Ok(preview) => target.image.preview_loaded(generation, preview),
            Err(reason) => {
                let dropped = target.image.preview_failed(generation);
                if dropped {
                    self.notice = Some(Notice {
                        kind: NoticeKind::Failure,
                        message: format!("Could not read the image: {}", reason),
                    });
                }
                dropped
            }
        };
        if !applied {
            debug!(%card, generation, "stale image read ignored");
        }
        self.sync_focus();
    }

    // Saving

    /// Validate and, when clean, hand the submission to the runner.
    pub fn save(&mut self) -> Option<EditorEffect> {
        if self.saving {
            return None;
        }
        match prepare_submission(&mut self.title, &mut self.cards, self.quiz_id.as_deref()) {
            Ok(submission) => {
                self.saving = true;
                self.status = None;
                Some(EditorEffect::Submit(submission))
            }
            Err(failed) => {
                debug!(errors = failed.errors, "save blocked by validation");
                self.status = Some(format!(
                    "{}: fix the highlighted fields before saving",
                    failed
                ));
                None
            }
        }
    }

    fn save_finished(&mut self, result: Result<(), String>) {
        self.saving = false;
        self.notice = Some(match result {
            Ok(()) => Notice {
                kind: NoticeKind::Success,
                message: "Quiz saved!".to_string(),
            },
            Err(reason) => Notice {
                kind: NoticeKind::Failure,
                message: format!("Saving the quiz failed: {}", reason),
            },
        });
    }

    // Focus

    /// Visible controls in document order. Hidden controls are left out.
    pub fn controls(&self) -> Vec<Control> {
        let mut controls = vec![Control::Title];
        let can_delete_question = self.can_delete_question();

        for card in &self.cards {
            controls.push(Control::ChooseImage(card.id));
            if card.image.has_image() {
                controls.push(Control::RemoveImage(card.id));
            }
            controls.push(Control::QuestionContent(card.id));
            if can_delete_question {
                controls.push(Control::RemoveQuestion(card.id));
            }
            let can_delete_answer = card.can_delete_answer();
            for row in &card.answers {
                controls.push(Control::AnswerContent(card.id, row.id));
                controls.push(Control::Correct(card.id, row.id));
                if can_delete_answer {
                    controls.push(Control::RemoveAnswer(card.id, row.id));
                }
            }
            if card.can_add_answer() {
                controls.push(Control::AddAnswer(card.id));
            }
            controls.push(Control::TimeLimit(card.id));
        }

        controls.push(Control::AddQuestion);
        controls.push(Control::Save);
        controls
    }

    /// The focused control, or its nearest surviving neighbour when it was
    /// removed behind the form's back.
    pub fn focused(&self) -> Control {
        let controls = self.controls();
        if controls.contains(&self.focus) {
            return self.focus;
        }
        controls
            .get(self.focus_index.min(controls.len().saturating_sub(1)))
            .copied()
            .unwrap_or(Control::Title)
    }

    pub fn focus_control(&mut self, control: Control) -> bool {
        match self.controls().iter().position(|c| *c == control) {
            Some(index) => {
                self.focus = control;
                self.focus_index = index;
                true
            }
            None => false,
        }
    }

    /// Re-resolve the focus after controls appeared or disappeared.
    fn sync_focus(&mut self) {
        let controls = self.controls();
        match controls.iter().position(|c| *c == self.focus) {
            Some(index) => self.focus_index = index,
            None => {
                let index = self.focus_index.min(controls.len().saturating_sub(1));
                self.focus = controls.get(index).copied().unwrap_or(Control::Title);
                self.focus_index = index;
            }
        }
    }

    fn move_focus(&mut self, forward: bool) {
        self.sync_focus();
        let controls = self.controls();
        let len = controls.len();
        let index = if forward {
            (self.focus_index + 1) % len
        } else {
            (self.focus_index + len - 1) % len
        };
        self.focus = controls[index];
        self.focus_index = index;
    }

    // Dispatch

    pub fn dispatch(&mut self, event: EditorEvent) -> Option<EditorEffect> {
        match event {
            EditorEvent::PreviewLoaded {
                card,
                generation,
                result,
            } => {
                self.preview_loaded(card, generation, result);
                return None;
            }
            EditorEvent::SaveFinished(result) => {
                self.save_finished(result);
                return None;
            }
            _ => {}
        }

        if self.notice.is_some() {
            if matches!(event, EditorEvent::Activate | EditorEvent::Cancel) {
                self.notice = None;
            }
            return None;
        }

        if self.prompt.is_some() {
            return self.dispatch_prompt(event);
        }

        self.status = None;
        let focused = self.focused();

        match event {
            EditorEvent::FocusNext => self.move_focus(true),
            EditorEvent::FocusPrevious => self.move_focus(false),
            EditorEvent::Input(c) => {
                if let Some(field) = self.text_field_mut(focused) {
                    field.push(c);
                }
            }
            EditorEvent::Erase => {
                if let Some(field) = self.text_field_mut(focused) {
                    field.pop();
                }
            }
            EditorEvent::Adjust(delta) => {
                if let Control::TimeLimit(card) = focused {
                    self.step_time_limit(card, delta);
                }
            }
            EditorEvent::Remove => match focused {
                Control::AnswerContent(card, row)
                | Control::Correct(card, row)
                | Control::RemoveAnswer(card, row) => {
                    self.remove_answer_row(card, row);
                }
                Control::RemoveQuestion(card) => {
                    self.remove_question_card(card);
                }
                _ => {}
            },
            EditorEvent::Activate => return self.activate(focused),
            EditorEvent::Save => return self.save(),
            EditorEvent::Cancel
            | EditorEvent::PreviewLoaded { .. }
            | EditorEvent::SaveFinished(_) => {}
        }
        None
    }

    fn activate(&mut self, control: Control) -> Option<EditorEffect> {
        match control {
            Control::Title | Control::QuestionContent(_) | Control::AnswerContent(..) => {
                self.move_focus(true);
            }
            Control::ChooseImage(card) => {
                self.prompt = Some(PathPrompt {
                    card,
                    input: String::new(),
                });
            }
            Control::RemoveImage(card) => self.remove_image(card),
            Control::RemoveQuestion(card) => {
                self.remove_question_card(card);
            }
            Control::Correct(card, row) => {
                self.toggle_correct(card, row);
            }
            Control::RemoveAnswer(card, row) => {
                self.remove_answer_row(card, row);
            }
            Control::AddAnswer(card) => {
                if let Some(row) = self.add_answer_row(card) {
                    self.focus_control(Control::AnswerContent(card, row));
                }
            }
            Control::TimeLimit(_) => {}
            Control::AddQuestion => {
                let card = self.add_question_card();
                self.focus_control(Control::QuestionContent(card));
            }
            Control::Save => return self.save(),
        }
        None
    }

    fn dispatch_prompt(&mut self, event: EditorEvent) -> Option<EditorEffect> {
        let prompt = self.prompt.as_mut()?;
        match event {
            EditorEvent::Input(c) => prompt.input.push(c),
            EditorEvent::Erase => {
                prompt.input.pop();
            }
            EditorEvent::Cancel => self.prompt = None,
            EditorEvent::Activate => {
                let path = prompt.input.trim().to_string();
                let card = prompt.card;
                if path.is_empty() {
                    return None;
                }
                self.prompt = None;
                return self.choose_image(card, PathBuf::from(path));
            }
            _ => {}
        }
        None
    }

    fn text_field_mut(&mut self, control: Control) -> Option<&mut TextField> {
        match control {
            Control::Title => Some(&mut self.title),
            Control::QuestionContent(card) => Some(&mut self.card_mut(card)?.content),
            Control::AnswerContent(card, row) => {
                Some(&mut self.card_mut(card)?.answer_mut(row)?.content)
            }
            _ => None,
        }
    }
}

impl Default for EditorForm {
    fn default() -> Self {
        Self::new()
    }
}
