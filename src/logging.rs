use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";

// Unset, blank or unparseable RUST_LOG falls back to info.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

pub fn init() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
