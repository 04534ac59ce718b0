use ndarray::{Array, IxDyn};
use serde::Deserialize;

#[cfg(feature = "ort-backend")]
pub mod ort;

/// Runs the pretrained artifact on a preprocessed `(1, H, W, 3)` batch.
pub trait ClassifierBackend: Send {
    fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput>;
}

pub struct InferenceOutput {
    pub scores: Vec<f32>, // [num_classes] for the single image in the batch
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionProvider {
    Cpu,
    Cuda,
}
