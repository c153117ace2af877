use anyhow::Result;
use chrono::Local;

use powerball_history::{config, logging};
use powerball_history::use_cases::UpdateUseCase;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("📡 Starting Powerball history update...");

    // Failures end up on the console only; the exit status stays clean.
    if let Err(e) = update().await {
        tracing::error!("💥 Update aborted: {:#}", e);
    }

    Ok(())
}

async fn update() -> Result<()> {
    let config = config::load()?;
    let use_case = UpdateUseCase::from_config(&config)?;
    let outcome = use_case.run(Local::now().naive_local()).await?;
    tracing::debug!("run outcome: {:?}", outcome);
    Ok(())
}
