pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;

/// Name used for the log file, tracer and meter.
pub const SERVICE_NAME: &str = "retinopathy-api";

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
