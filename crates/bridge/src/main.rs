use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Local;
use serde_json::json;
use tracing::{info, warn};

use screen_time_bridge::{
    config::Config, fixture::FixturePlatform, logging::init_logging, module::ScreenTimeModule,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting screen time bridge v{}", env!("CARGO_PKG_VERSION"));

    let platform = Arc::new(FixturePlatform::load(&config.platform.fixture_path).await?);
    let module = ScreenTimeModule::from_platform(platform, &config);

    if !module.get_grant_status().await {
        warn!("Usage access not granted, opening usage access settings");
        module.open_usage_settings().await;
        return Ok(());
    }

    let (start_time, end_time) = shared::time::day_bounds(&Local::now())
        .ok_or_else(|| anyhow!("Local midnight does not exist today"))?;
    let params = json!({ "startTime": start_time, "endTime": end_time });
    info!(start_time, end_time, "Loading today's usage");

    let output = if config.reporter.combine_by_package {
        serde_json::to_string_pretty(&module.get_combined_usage_stats(params).await?)?
    } else {
        serde_json::to_string_pretty(&module.get_usage_stats(params).await?)?
    };
    println!("{output}");

    Ok(())
}
