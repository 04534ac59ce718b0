use inference::ExecutionProvider;
use serde::Deserialize;
use std::path::PathBuf;

pub use common::{Environment, LogLevel};

const ENV_PREFIX: &str = "RETINA";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub execution_provider: ExecutionProvider,
    pub intra_threads: usize,
    pub body_limit_bytes: usize,
    /// Append logs to `<log_dir>/retinopathy-api.log` in addition to stdout.
    pub log_dir: Option<PathBuf>,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    build_configuration(config::Environment::with_prefix(ENV_PREFIX))
}

fn build_configuration(env_source: config::Environment) -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("log_level", "info")?
        .set_default("environment", "development")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8000)?
        .set_default("model_path", "retinopathy_model.onnx")?
        .set_default("execution_provider", "cpu")?
        .set_default("intra_threads", 4)?
        .set_default("body_limit_bytes", 20 * 1024 * 1024)?
        .add_source(
            env_source
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize::<Config>()?;

    Ok(config)
}
