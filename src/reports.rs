use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::OutputPaths;
use crate::history::History;
use crate::types::DrawResult;
use crate::utils::format_status_timestamp;

pub const RECENT_LIMIT: usize = 10;

/// Fixed prize-tier legend shown next to each recent draw.
/// It is display data only and is not derived from the draw itself.
#[derive(Debug, Serialize)]
pub struct PayoutTable {
    #[serde(rename = "5+1")]
    pub five_plus_one: &'static str,
    #[serde(rename = "5+0")]
    pub five: &'static str,
    #[serde(rename = "4+1")]
    pub four_plus_one: &'static str,
    #[serde(rename = "4+0")]
    pub four: &'static str,
}

pub static PAYOUTS: PayoutTable = PayoutTable {
    five_plus_one: "Jackpot",
    five: "$1M",
    four_plus_one: "$50k",
    four: "$100",
};

#[derive(Serialize)]
struct RecentDraw<'a> {
    #[serde(flatten)]
    draw: &'a DrawResult,
    #[serde(rename = "p")]
    payouts: &'static PayoutTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Written { history: usize, recent: usize },
    NothingToWrite,
}

pub struct ReportWriter {
    paths: OutputPaths,
}

impl ReportWriter {
    pub fn new(paths: OutputPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    pub fn publish(&self, history: &History, now: NaiveDateTime) -> Result<PublishOutcome> {
        if history.is_empty() {
            return Ok(PublishOutcome::NothingToWrite);
        }

        ensure_dir(&self.paths.dir)?;

        write_json(&self.paths.history(), history.draws())?;

        let recent: Vec<RecentDraw<'_>> = history
            .recent(RECENT_LIMIT)
            .iter()
            .map(|draw| RecentDraw {
                draw,
                payouts: &PAYOUTS,
            })
            .collect();
        write_json(&self.paths.recent(), &recent)?;

        write_text(&self.paths.status(), &format_status_timestamp(now))?;
        remove_if_present(&self.paths.error())?;

        Ok(PublishOutcome::Written {
            history: history.len(),
            recent: recent.len(),
        })
    }

    pub fn record_failure(&self, attempted: usize, now: NaiveDateTime) -> Result<()> {
        ensure_dir(&self.paths.dir)?;
        let message = format!(
            "fetch failed: all {} sources unavailable at {}",
            attempted,
            format_status_timestamp(now)
        );
        write_text(&self.paths.error(), &message)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    write_text(path, &json)
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameType;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn history_of(days: u32) -> History {
        History::build((1..=days).map(|day| DrawResult {
            date: format!("2024-03-{day:02}"),
            numbers: vec![1, 2, 3, 4, day],
            special: day,
            multiplier: 2,
            game_type: GameType::Powerball,
        }))
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn publishes_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));

        let outcome = writer.publish(&history_of(12), now()).unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::Written {
                history: 12,
                recent: 10
            }
        );

        let history = read_json(&writer.paths().history());
        assert_eq!(history.as_array().unwrap().len(), 12);
        assert_eq!(
            history[0],
            json!({"d": "2024-03-12", "w": [1, 2, 3, 4, 12], "s": 12, "m": 2, "t": 0})
        );

        let recent = read_json(&writer.paths().recent());
        let recent = recent.as_array().unwrap();
        assert_eq!(recent.len(), 10);
        for (entry, full) in recent.iter().zip(history.as_array().unwrap()) {
            assert_eq!(
                entry["p"],
                json!({"5+1": "Jackpot", "5+0": "$1M", "4+1": "$50k", "4+0": "$100"})
            );
            let mut stripped = entry.clone();
            stripped.as_object_mut().unwrap().remove("p");
            assert_eq!(&stripped, full);
        }

        let status = fs::read_to_string(writer.paths().status()).unwrap();
        assert_eq!(status, "2026-10-16 08:30");
    }

    #[test]
    fn history_file_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));
        writer.publish(&history_of(1), now()).unwrap();

        let text = fs::read_to_string(writer.paths().history()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"d\": \"2024-03-01\","));
    }

    #[test]
    fn recent_keys_keep_record_order_then_payouts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));
        writer.publish(&history_of(1), now()).unwrap();

        let text = fs::read_to_string(writer.paths().recent()).unwrap();
        let positions: Vec<usize> = ["\"d\"", "\"w\"", "\"s\"", "\"m\"", "\"t\"", "\"p\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn empty_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));

        let outcome = writer.publish(&History::default(), now()).unwrap();

        assert_eq!(outcome, PublishOutcome::NothingToWrite);
        assert!(!writer.paths().history().exists());
        assert!(!writer.paths().recent().exists());
        assert!(!writer.paths().status().exists());
    }

    #[test]
    fn success_clears_stale_error_marker() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));

        writer.record_failure(2, now()).unwrap();
        assert!(writer.paths().error().exists());

        writer.publish(&history_of(3), now()).unwrap();
        assert!(!writer.paths().error().exists());
    }

    #[test]
    fn failure_marker_names_time_and_leaves_success_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(OutputPaths::in_dir(dir.path()));
        writer.publish(&history_of(3), now()).unwrap();
        let before = fs::read_to_string(writer.paths().history()).unwrap();

        writer.record_failure(2, now()).unwrap();

        let marker = fs::read_to_string(writer.paths().error()).unwrap();
        assert!(marker.contains("2026-10-16 08:30"));
        assert!(marker.contains("2 sources"));
        assert_eq!(fs::read_to_string(writer.paths().history()).unwrap(), before);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site").join("data");
        let writer = ReportWriter::new(OutputPaths::in_dir(&nested));

        writer.publish(&history_of(2), now()).unwrap();

        assert!(nested.join("pb_history.json").exists());
    }
}
