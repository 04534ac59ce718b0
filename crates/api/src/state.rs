use crate::{SERVICE_NAME, config::Config, metrics::PredictionMetrics};
use anyhow::Context;
use inference::{Classifier, DEFAULT_INPUT_SIZE, backend::ort::OrtBackend};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub metrics: PredictionMetrics,
}

impl AppState {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            metrics: PredictionMetrics::new(SERVICE_NAME),
        }
    }
}

/// Load the model artifact once at startup. Any error here is fatal.
pub fn load_classifier(config: &Config) -> anyhow::Result<Classifier> {
    tracing::info!(
        model_path = %config.model_path,
        provider = ?config.execution_provider,
        "Loading inference model"
    );

    let backend = OrtBackend::load_model_with_provider(
        &config.model_path,
        config.execution_provider,
        config.intra_threads,
    )
    .with_context(|| format!("failed to load model from {}", config.model_path))?;

    let classifier = Classifier::new(Box::new(backend), DEFAULT_INPUT_SIZE)
        .context("model warm-up check failed")?;

    tracing::info!(
        num_classes = classifier.labels().len(),
        input_size = classifier.input_size(),
        "Model loaded successfully"
    );

    Ok(classifier)
}
