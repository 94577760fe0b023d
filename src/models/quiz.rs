//! Quiz summaries shown by the quiz browser.

use serde::Deserialize;

/// One quiz as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    /// Number of questions in the quiz.
    pub questions: u32,
    #[serde(default)]
    pub is_editable: bool,
}

impl QuizSummary {
    pub fn view_path(&self) -> String {
        format!("/quiz/view/{}", self.id)
    }

    /// Edit link, only for quizzes the current user owns.
    pub fn edit_path(&self) -> Option<String> {
        self.is_editable.then(|| format!("/quiz/edit/{}", self.id))
    }
}

/// A page of quiz summaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizPage {
    pub quizzes: Vec<QuizSummary>,
    pub total_pages: u32,
}

/// Listing order accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    TitleAsc,
    TitleDesc,
    QuestionsAsc,
    QuestionsDesc,
    AuthorAsc,
    AuthorDesc,
    CreatedAsc,
    CreatedDesc,
    UpdatedAsc,
    UpdatedDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 10] = [
        SortOption::TitleAsc,
        SortOption::TitleDesc,
        SortOption::QuestionsAsc,
        SortOption::QuestionsDesc,
        SortOption::AuthorAsc,
        SortOption::AuthorDesc,
        SortOption::CreatedAsc,
        SortOption::CreatedDesc,
        SortOption::UpdatedAsc,
        SortOption::UpdatedDesc,
    ];

    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::TitleAsc => "title_asc",
            SortOption::TitleDesc => "title_desc",
            SortOption::QuestionsAsc => "questions_asc",
            SortOption::QuestionsDesc => "questions_desc",
            SortOption::AuthorAsc => "author_asc",
            SortOption::AuthorDesc => "author_desc",
            SortOption::CreatedAsc => "create_date_asc",
            SortOption::CreatedDesc => "create_date_desc",
            SortOption::UpdatedAsc => "updated_date_asc",
            SortOption::UpdatedDesc => "updated_date_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::TitleAsc => "Title A-Z",
            SortOption::TitleDesc => "Title Z-A",
            SortOption::QuestionsAsc => "Fewest questions",
            SortOption::QuestionsDesc => "Most questions",
            SortOption::AuthorAsc => "Author A-Z",
            SortOption::AuthorDesc => "Author Z-A",
            SortOption::CreatedAsc => "Oldest",
            SortOption::CreatedDesc => "Newest",
            SortOption::UpdatedAsc => "Least recently updated",
            SortOption::UpdatedDesc => "Recently updated",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
