use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to resize image: {0}")]
    Resize(String),

    #[error("Inference failed: {0}")]
    Inference(#[from] anyhow::Error),

    #[error("Model output has {actual} scores, expected {expected}")]
    OutputShape { expected: usize, actual: usize },

    #[error("Model output score at index {index} is not finite")]
    NonFiniteScore { index: usize },

    #[error("Model produces {actual} scores but {expected} class labels are configured")]
    LabelMismatch { expected: usize, actual: usize },

    #[error("Inference backend unavailable (lock poisoned)")]
    BackendUnavailable,
}
