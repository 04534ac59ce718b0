use crate::{SERVICE_NAME, config::Config};
use common::TelemetryGuard;

pub fn setup_logging(config: &Config, telemetry: Option<&TelemetryGuard>) -> anyhow::Result<()> {
    common::setup_logging(
        SERVICE_NAME,
        config.environment,
        config.log_level,
        config.log_dir.as_deref(),
        telemetry,
    )
}
