use crate::{
    backend::{ClassifierBackend, InferenceOutput},
    error::ClassifyError,
    labels::CLASS_NAMES,
    processing::{
        post::{Classification, PostProcessor},
        pre::PreProcessor,
    },
};
use common::span;
use ndarray::{Array, IxDyn};
use std::sync::Mutex;

/// The full upload-to-label pipeline around one loaded model.
///
/// Shared across request handlers behind an `Arc`. Decoding and resizing run
/// without locking; only the backend call itself is serialized.
pub struct Classifier {
    backend: Mutex<Box<dyn ClassifierBackend>>,
    preprocessor: PreProcessor,
    postprocessor: PostProcessor,
}

impl Classifier {
    /// Wrap a loaded backend and check that its output lines up with the labels.
    pub fn new(
        backend: Box<dyn ClassifierBackend>,
        input_size: u32,
    ) -> Result<Self, ClassifyError> {
        let classifier = Self {
            backend: Mutex::new(backend),
            preprocessor: PreProcessor::new(input_size),
            postprocessor: PostProcessor::new(&CLASS_NAMES),
        };

        classifier.verify_label_alignment()?;

        Ok(classifier)
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.postprocessor.labels
    }

    pub fn input_size(&self) -> u32 {
        self.preprocessor.input_size
    }

    pub fn classify(&self, bytes: &[u8]) -> Result<Classification, ClassifyError> {
        let _s = span!("classify");

        let input = self.preprocessor.preprocess(bytes)?;

        let InferenceOutput { scores } = {
            let _infer_span = span!("model_inference");
            self.run_backend(&input)?
        };

        self.postprocessor.classify(&scores)
    }

    /// Warm-up inference on a blank batch; fails if the score count differs
    /// from the label count.
    fn verify_label_alignment(&self) -> Result<(), ClassifyError> {
        let side = self.preprocessor.input_size as usize;
        let blank = Array::<f32, IxDyn>::zeros(IxDyn(&[1, side, side, 3]));

        let output = self.run_backend(&blank)?;
        let expected = self.postprocessor.labels.len();

        if output.scores.len() != expected {
            return Err(ClassifyError::LabelMismatch {
                expected,
                actual: output.scores.len(),
            });
        }

        tracing::debug!(num_classes = expected, "Model output matches label list");
        Ok(())
    }

    fn run_backend(&self, input: &Array<f32, IxDyn>) -> Result<InferenceOutput, ClassifyError> {
        let mut backend = self
            .backend
            .lock()
            .map_err(|_| ClassifyError::BackendUnavailable)?;

        Ok(backend.infer(input)?)
    }
}
