pub mod api;
pub mod config;
pub mod history;
pub mod logging;
pub mod normalize;
pub mod reports;
pub mod types;
pub mod use_cases;
pub mod utils;

pub use api::{FetchError, Fetched, HttpSource, RecordSource, SourceSpec, fetch_first_available};
pub use history::History;
pub use normalize::{Discard, SourceSchema};
pub use reports::{PublishOutcome, ReportWriter};
pub use types::{DrawResult, GameType, RawRecord};
pub use use_cases::{RunOutcome, UpdateUseCase};
