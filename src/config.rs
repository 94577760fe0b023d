use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Prefix of environment overrides, e.g. `QUIZ_STUDIO_BASE_URL`.
const ENV_PREFIX: &str = "QUIZ_STUDIO";

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "quiz-studio";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the quiz service, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Value of the `session_id` cookie of a logged-in user.
    #[serde(default)]
    pub session_id: Option<String>,
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            session_id: None,
            request_timeout_secs: 10,
            log_file: PathBuf::from("quiz-studio.log"),
        }
    }
}

impl Config {
    /// Defaults, then the config file, then `QUIZ_STUDIO_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("log_file", defaults.log_file.display().to_string())?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Apply command line overrides on top of the loaded values.
    pub fn with_overrides(mut self, base_url: Option<String>, session_id: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if session_id.is_some() {
            self.session_id = session_id;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!("quiz-studio-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "base_url = \"http://quiz.example:9000\"\nsession_id = \"abc\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.base_url, "http://quiz.example:9000");
        assert_eq!(config.session_id.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("quiz-studio-missing-config.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_overrides(Some("http://other".to_string()), None);
        assert_eq!(config.base_url, "http://other");
        assert_eq!(config.session_id, None);

        let config = config.with_overrides(None, Some("s1".to_string()));
        assert_eq!(config.base_url, "http://other");
        assert_eq!(config.session_id.as_deref(), Some("s1"));
    }
}
