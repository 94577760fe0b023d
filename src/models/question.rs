//! Question cards and answer rows as edited in the quiz editor.

use std::fmt;

use uuid::Uuid;

use super::image::ImageAttachment;

/// Answer row limits per question card.
pub const MIN_ANSWERS: usize = 2;
pub const MAX_ANSWERS: usize = 4;

/// Field length limits, counted in characters.
pub const QUESTION_MAX_CHARS: usize = 256;
pub const ANSWER_MAX_CHARS: usize = 60;

/// Duration slider bounds, in seconds.
pub const TIME_LIMIT_MIN: u8 = 5;
pub const TIME_LIMIT_MAX: u8 = 30;
pub const TIME_LIMIT_DEFAULT: u8 = TIME_LIMIT_MIN;

/// Stable identity of a question card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0.simple())
    }
}

/// Stable identity of an answer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0.simple())
    }
}

/// A single-line text input with an optional `maxlength` and an error mark.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    max_chars: Option<usize>,
    invalid: bool,
}

impl TextField {
    pub fn new(max_chars: Option<usize>) -> Self {
        Self {
            value: String::new(),
            max_chars,
            invalid: false,
        }
    }

    /// Create a field holding `value`, truncated to the limit.
    pub fn with_value(value: &str, max_chars: Option<usize>) -> Self {
        let mut field = Self::new(max_chars);
        field.set(value);
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set(&mut self, value: &str) {
        self.value = match self.max_chars {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
    }

    /// Append a character unless the field is full. Returns whether it was added.
    pub fn push(&mut self, c: char) -> bool {
        if self.max_chars.is_some_and(|max| self.value.chars().count() >= max) {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    /// Clear the mark, then mark again if the value is blank.
    pub fn validate(&mut self) -> bool {
        self.invalid = self.trimmed().is_empty();
        !self.invalid
    }
}

/// Integer duration bounded to [`TIME_LIMIT_MIN`, `TIME_LIMIT_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeLimit(u8);

impl TimeLimit {
    pub fn new(seconds: i64) -> Self {
        let clamped = seconds.clamp(i64::from(TIME_LIMIT_MIN), i64::from(TIME_LIMIT_MAX));
        Self(clamped as u8)
    }

    pub fn seconds(self) -> u8 {
        self.0
    }

    pub fn set(&mut self, seconds: i64) {
        *self = Self::new(seconds);
    }

    pub fn step(&mut self, delta: i64) {
        self.set(i64::from(self.0) + delta);
    }

    /// Live readout shown next to the slider.
    pub fn readout(self) -> String {
        self.0.to_string()
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        Self(TIME_LIMIT_DEFAULT)
    }
}

/// One candidate answer inside a question card.
#[derive(Debug, Clone)]
pub struct AnswerRow {
    pub id: RowId,
    pub content: TextField,
    pub is_correct: bool,
    /// Set on every row of a card that has no correct answer at save time.
    pub correctness_error: bool,
}

impl AnswerRow {
    pub fn blank() -> Self {
        Self {
            id: RowId::new(),
            content: TextField::new(Some(ANSWER_MAX_CHARS)),
            is_correct: false,
            correctness_error: false,
        }
    }

    pub fn with_content(content: &str, is_correct: bool) -> Self {
        Self {
            content: TextField::with_value(content, Some(ANSWER_MAX_CHARS)),
            is_correct,
            ..Self::blank()
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.is_correct
    }
}

/// One quiz question with its answers, image and duration.
#[derive(Debug, Clone)]
pub struct QuestionCard {
    pub id: CardId,
    pub content: TextField,
    pub image: ImageAttachment,
    pub answers: Vec<AnswerRow>,
    pub time_limit: TimeLimit,
}

impl QuestionCard {
    /// A new card with [`MIN_ANSWERS`] blank answer rows.
    pub fn blank() -> Self {
        Self {
            id: CardId::new(),
            content: TextField::new(Some(QUESTION_MAX_CHARS)),
            image: ImageAttachment::default(),
            answers: (0..MIN_ANSWERS).map(|_| AnswerRow::blank()).collect(),
            time_limit: TimeLimit::default(),
        }
    }

    pub fn answer(&self, row: RowId) -> Option<&AnswerRow> {
        self.answers.iter().find(|a| a.id == row)
    }

    pub fn answer_mut(&mut self, row: RowId) -> Option<&mut AnswerRow> {
        self.answers.iter_mut().find(|a| a.id == row)
    }

    /// The "add answer" control is shown while fewer than four rows exist.
    pub fn can_add_answer(&self) -> bool {
        self.answers.len() < MAX_ANSWERS
    }

    /// Row delete controls are shown only above the two-row minimum.
    pub fn can_delete_answer(&self) -> bool {
        self.answers.len() > MIN_ANSWERS
    }

    /// Append a blank row after the last one. `None` when the card is full.
    pub fn add_answer_row(&mut self) -> Option<RowId> {
        if !self.can_add_answer() {
            return None;
        }
        let row = AnswerRow::blank();
        let id = row.id;
        if self.answers.is_empty() {
            self.answers.insert(0, row);
        } else {
            self.answers.push(row);
        }
        Some(id)
    }

    pub fn remove_answer_row(&mut self, row: RowId) -> bool {
        if !self.can_delete_answer() {
            return false;
        }
        let before = self.answers.len();
        self.answers.retain(|a| a.id != row);
        self.answers.len() != before
    }

    /// Checking a row clears every sibling; unchecking only clears that row.
    pub fn set_correct(&mut self, row: RowId, checked: bool) -> bool {
        if self.answer(row).is_none() {
            return false;
        }
        for answer in &mut self.answers {
            if answer.id == row {
                answer.is_correct = checked;
            } else if checked {
                answer.is_correct = false;
            }
        }
        true
    }

    pub fn toggle_correct(&mut self, row: RowId) -> bool {
        match self.answer(row) {
            Some(answer) => {
                let checked = !answer.is_correct;
                self.set_correct(row, checked)
            }
            None => false,
        }
    }

    pub fn has_correct_answer(&self) -> bool {
        self.answers.iter().any(|a| a.is_correct)
    }

    #[cfg(test)]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_respects_maxlength() {
        let mut field = TextField::new(Some(3));
        assert!(field.push('a'));
        assert!(field.push('ż'));
        assert!(field.push('c'));
        assert!(!field.push('d'));
        assert_eq!(field.value(), "ażc");

        let loaded = TextField::with_value("abcdef", Some(4));
        assert_eq!(loaded.value(), "abcd");
    }

    #[test]
    fn test_text_field_validation_marks_blank() {
        let mut field = TextField::new(None);
        field.set("   ");
        assert!(!field.validate());
        assert!(field.is_invalid());

        field.set(" x ");
        assert!(field.validate());
        assert!(!field.is_invalid());
    }

    #[test]
    fn test_time_limit_clamps() {
        assert_eq!(TimeLimit::default().seconds(), 5);
        assert_eq!(TimeLimit::new(2).seconds(), 5);
        assert_eq!(TimeLimit::new(99).seconds(), 30);

        let mut limit = TimeLimit::new(29);
        limit.step(5);
        assert_eq!(limit.seconds(), 30);
        limit.step(-100);
        assert_eq!(limit.readout(), "5");
    }

    #[test]
    fn test_answer_rows_stay_within_bounds() {
        let mut card = QuestionCard::blank();
        assert_eq!(card.answers.len(), 2);
        assert!(card.can_add_answer());
        assert!(!card.can_delete_answer());

        let first = card.answers[0].id;
        assert!(!card.remove_answer_row(first));
        assert_eq!(card.answers.len(), 2);

        let third = card.add_answer_row().unwrap();
        assert!(card.can_delete_answer());
        card.add_answer_row().unwrap();
        assert_eq!(card.answers.len(), 4);
        assert!(!card.can_add_answer());
        assert!(card.add_answer_row().is_none());

        assert!(card.remove_answer_row(third));
        assert_eq!(card.answers.len(), 3);
        assert!(card.can_add_answer());
    }

    #[test]
    fn test_new_rows_are_appended_last() {
        let mut card = QuestionCard::blank();
        let added = card.add_answer_row().unwrap();
        assert_eq!(card.answers.last().map(|a| a.id), Some(added));

        card.answers.clear();
        let only = card.add_answer_row().unwrap();
        assert_eq!(card.answers[0].id, only);
    }

    #[test]
    fn test_checking_clears_siblings() {
        let mut card = QuestionCard::blank();
        card.add_answer_row();
        let ids: Vec<RowId> = card.answers.iter().map(|a| a.id).collect();

        card.set_correct(ids[0], true);
        card.set_correct(ids[2], true);
        assert_eq!(card.correct_count(), 1);
        assert!(card.answer(ids[2]).unwrap().is_highlighted());
        assert!(!card.answer(ids[0]).unwrap().is_highlighted());

        card.toggle_correct(ids[2]);
        assert_eq!(card.correct_count(), 0);
        assert!(!card.has_correct_answer());
    }

    #[test]
    fn test_unknown_row_is_ignored() {
        let mut card = QuestionCard::blank();
        assert!(!card.set_correct(RowId::new(), true));
        assert!(!card.toggle_correct(RowId::new()));
        assert_eq!(card.correct_count(), 0);
    }
}
