use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::models::TIME_LIMIT_DEFAULT;
use crate::protocol::AnswerPayload;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A quiz already stored on the server, as rendered by its edit page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizDraft {
    #[serde(default, rename = "_id", alias = "quiz_id")]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<DraftQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftQuestion {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerPayload>,
    #[serde(default = "default_time", deserialize_with = "deserialize_time")]
    pub time: i64,
}

fn default_time() -> i64 {
    i64::from(TIME_LIMIT_DEFAULT)
}

/// Accept `10`, `10.0` or `"10"`; anything unreadable is the default.
/// Out-of-range values are kept for the editor to clamp.
fn deserialize_time<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let seconds = match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(round_seconds)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(round_seconds))
        }
        _ => None,
    };
    Ok(seconds.unwrap_or_else(default_time))
}

/// Float to whole seconds; `as` saturates at the `i64` bounds.
fn round_seconds(seconds: f64) -> i64 {
    seconds.round() as i64
}

pub fn load_quiz_draft<P: AsRef<Path>>(path: P) -> Result<QuizDraft, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeLimit;

    fn write_temp(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quiz-draft-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_edit_page_json() {
        let path = write_temp(
            r#"{
                "_id": "65f0",
                "title": "Capitals",
                "user_id": 42,
                "questions": [
                    {"content": "France?", "image_url": "/quiz/image/65f1",
                     "answers": [{"content": "Paris", "is_correct": true}, {"content": "Rome", "is_correct": false}],
                     "time": 12},
                    {"content": "Spain?", "image_url": null,
                     "answers": [{"content": "Madrid", "is_correct": true}], "time": "20"}
                ]
            }"#,
        );
        let draft = load_quiz_draft(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(draft.quiz_id.as_deref(), Some("65f0"));
        assert_eq!(draft.title, "Capitals");
        assert_eq!(draft.questions.len(), 2);
        assert_eq!(draft.questions[0].time, 12);
        assert_eq!(draft.questions[0].image_url.as_deref(), Some("/quiz/image/65f1"));
        assert_eq!(draft.questions[1].time, 20);
        assert_eq!(draft.questions[1].image_url, None);
    }

    #[test]
    fn test_float_and_huge_times_are_kept_for_clamping() {
        let draft: QuizDraft = serde_json::from_str(
            r#"{"title": "t", "questions": [
                {"content": "a", "answers": [], "time": 10.0},
                {"content": "b", "answers": [], "time": "12.6"},
                {"content": "c", "answers": [], "time": 18446744073709551615},
                {"content": "d", "answers": [], "time": -3}
            ]}"#,
        )
        .unwrap();

        let times: Vec<i64> = draft.questions.iter().map(|q| q.time).collect();
        assert_eq!(times[0], 10);
        assert_eq!(times[1], 13);
        assert!(times[2] > 30);
        assert_eq!(times[3], -3);

        let limits: Vec<u8> = times.iter().map(|t| TimeLimit::new(*t).seconds()).collect();
        assert_eq!(limits, vec![10, 13, 30, 5]);
    }

    #[test]
    fn test_time_falls_back_to_default() {
        let path = write_temp(
            r#"{"title": "t", "questions": [
                {"content": "a", "answers": []},
                {"content": "b", "answers": [], "time": "soon"},
                {"content": "c", "answers": [], "time": null}
            ]}"#,
        );
        let draft = load_quiz_draft(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(draft.quiz_id.is_none());
        assert!(draft.questions.iter().all(|q| q.time == 5));
    }

    #[test]
    fn test_missing_file() {
        let result = load_quiz_draft("/definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let path = write_temp("{ not json");
        let result = load_quiz_draft(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }
}
