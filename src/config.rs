use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::SourceSpec;
use crate::normalize::SourceSchema;

const NY_POWERBALL_URL: &str = "https://data.ny.gov/resource/d6yy-mqv8.json";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const RESULT_LIMIT: &str = "500";

#[derive(Debug, Clone)]
pub struct Config {
    pub sources: Vec<SourceSpec>,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub output: OutputPaths,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub history_file: String,
    pub recent_file: String,
    pub status_file: String,
    pub error_file: String,
}

impl OutputPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            history_file: "pb_history.json".to_string(),
            recent_file: "pb_recent.json".to_string(),
            status_file: "last_update.txt".to_string(),
            error_file: "last_error.txt".to_string(),
        }
    }

    pub fn history(&self) -> PathBuf {
        self.dir.join(&self.history_file)
    }

    pub fn recent(&self) -> PathBuf {
        self.dir.join(&self.recent_file)
    }

    pub fn status(&self) -> PathBuf {
        self.dir.join(&self.status_file)
    }

    pub fn error(&self) -> PathBuf {
        self.dir.join(&self.error_file)
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

pub fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec {
            name: "ny-open-data".to_string(),
            url: NY_POWERBALL_URL.to_string(),
            query: vec![
                ("$limit".to_string(), RESULT_LIMIT.to_string()),
                ("$order".to_string(), "draw_date DESC".to_string()),
            ],
            schema: SourceSchema::Socrata,
        },
        // Same dataset without server-side ordering; the history is sorted locally anyway.
        SourceSpec {
            name: "ny-open-data-unordered".to_string(),
            url: NY_POWERBALL_URL.to_string(),
            query: vec![("$limit".to_string(), RESULT_LIMIT.to_string())],
            schema: SourceSchema::Socrata,
        },
    ]
}

pub fn load() -> Result<Config> {
    Ok(Config {
        sources: default_sources(),
        user_agent: USER_AGENT.to_string(),
        request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        output: OutputPaths::default(),
    })
}
