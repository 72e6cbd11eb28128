use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Variables already in the environment win over `.env`; a missing file is fine.
    let dotenv = dotenvy::dotenv();

    let config = api::AppConfig::from_env()?;

    let (default, lib_level) = if config.debug {
        ("debug,hyper=info,reqwest=info", Level::DEBUG)
    } else {
        ("info,tower_http=info", Level::INFO)
    };
    let filter = telemetry::env_filter_with_level(default, lib_level);

    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(filter::filter_fn(|meta| !telemetry::is_library_event(meta))),
        )
        .try_init()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => info!("no .env file; using process environment"),
        Err(e) => return Err(e.into()),
    }

    api::start(config).await?;

    Ok(())
}
