use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::api::{HttpSource, RecordSource, build_client, fetch_first_available};
use crate::config::Config;
use crate::history::History;
use crate::reports::{PublishOutcome, ReportWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Published {
        source: String,
        saved: usize,
        discarded: usize,
        duplicates: usize,
    },
    NoValidRecords { source: String, discarded: usize },
    FetchFailed { attempted: usize },
}

pub struct UpdateUseCase<S> {
    sources: Vec<S>,
    writer: ReportWriter,
}

impl UpdateUseCase<HttpSource> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(&config.user_agent, config.request_timeout)
            .context("building HTTP client")?;
        let sources = HttpSource::from_specs(&client, &config.sources);
        Ok(Self::new(sources, ReportWriter::new(config.output.clone())))
    }
}

impl<S: RecordSource> UpdateUseCase<S> {
    pub fn new(sources: Vec<S>, writer: ReportWriter) -> Self {
        Self { sources, writer }
    }

    pub async fn run(&self, now: NaiveDateTime) -> Result<RunOutcome> {
        let attempted = self.sources.len();

        let Some(fetched) = fetch_first_available(&self.sources).await else {
            error!("💥 All {} sources failed, writing error marker", attempted);
            self.writer.record_failure(attempted, now)?;
            return Ok(RunOutcome::FetchFailed { attempted });
        };

        let batch = fetched.schema.normalize_all(&fetched.records);
        let discarded = batch.discarded.len();
        let history = History::build(batch.kept);

        info!(
            "🧮 {} usable draws, {} records discarded, {} duplicate dates dropped",
            history.len(),
            discarded,
            history.duplicates_dropped()
        );

        match self.writer.publish(&history, now)? {
            PublishOutcome::NothingToWrite => {
                warn!(
                    "⚠ {} returned {} records but none were usable; nothing written",
                    fetched.source,
                    fetched.records.len()
                );
                Ok(RunOutcome::NoValidRecords {
                    source: fetched.source,
                    discarded,
                })
            }
            PublishOutcome::Written { history: saved, recent } => {
                if let Some(latest) = history.latest() {
                    info!("🎟️ Latest draw: {}", latest.date);
                }
                info!("✅ Success! {} results saved ({} recent)", saved, recent);
                Ok(RunOutcome::Published {
                    source: fetched.source,
                    saved,
                    discarded,
                    duplicates: history.duplicates_dropped(),
                })
            }
        }
    }
}
