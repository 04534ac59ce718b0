use anyhow::Context;
use api::{
    SERVICE_NAME,
    config::get_configuration,
    logging::setup_logging,
    server::run_server,
    state::{AppState, load_classifier},
};
use common::TelemetryGuard;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("failed to load configuration")?;

    let telemetry = config
        .otel_endpoint
        .as_ref()
        .map(|endpoint| TelemetryGuard::init(SERVICE_NAME, endpoint))
        .transpose()?;

    setup_logging(&config, telemetry.as_ref())?;

    tracing::info!(
        environment = config.environment.as_str(),
        config = ?config,
        "Loaded configuration"
    );

    // The service never starts without a working model
    let classifier = load_classifier(&config).inspect_err(|e| {
        tracing::error!(error = ?e, "Model loading failed");
    })?;

    let state = AppState::new(Arc::new(classifier));
    run_server(&config, state).await
}
