use anyhow::Result;
use docvqa_api::{setup, telemetry};
use docvqa_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    telemetry::init_telemetry(config.environment());

    let (_state, app) = setup::initialize_app(config.clone())?;

    setup::server::start_server(&config, app).await?;

    Ok(())
}
