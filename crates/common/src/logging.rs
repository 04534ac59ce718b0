use crate::config::{Environment, LogLevel};
use crate::telemetry::TelemetryGuard;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

type FileLayer<S> = fmt::Layer<S, format::DefaultFields, format::Format, Mutex<File>>;

/// Initialize tracing subscriber with pretty formatting for development
/// and JSON formatting for production.
///
/// Uses RUST_LOG environment variable for filtering, falling back to `level`.
///
/// When `telemetry` is given, spans are also exported through its OTLP tracer.
/// When `log_dir` is set, every event is additionally appended to
/// `<log_dir>/<service_name>.log`.
pub fn setup_logging(
    service_name: &'static str,
    environment: Environment,
    level: LogLevel,
    log_dir: Option<&Path>,
    telemetry: Option<&TelemetryGuard>,
) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));

    let otel_layer = telemetry
        .map(|guard| tracing_opentelemetry::layer().with_tracer(guard.tracer(service_name)));

    let file_output = log_dir
        .map(|dir| file_layer(dir, service_name))
        .transpose()?;

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(file_output);

    match environment {
        Environment::Production => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_level(true))
                .try_init()?;
        }
        Environment::Development => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_ansi(true))
                .try_init()?;
        }
    }

    Ok(())
}

/// Plain-text layer appending to `<dir>/<service_name>.log`.
pub fn file_layer<S>(dir: &Path, service_name: &str) -> std::io::Result<FileLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = open_log_file(dir, service_name)?;
    Ok(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
}

pub fn log_file_path(dir: &Path, service_name: &str) -> PathBuf {
    dir.join(format!("{}.log", service_name))
}

/// Open (creating if needed) the append-only log file for `service_name`.
pub fn open_log_file(dir: &Path, service_name: &str) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(dir, service_name))
}
