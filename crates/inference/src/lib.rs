pub mod backend;
pub mod classifier;
pub mod error;
pub mod labels;
pub mod processing;

// Re-export commonly used types for convenience
pub use backend::{ClassifierBackend, ExecutionProvider, InferenceOutput};
pub use classifier::Classifier;
pub use error::ClassifyError;
pub use labels::CLASS_NAMES;
pub use processing::{
    post::{Classification, PostProcessor, round_percentage},
    pre::{DEFAULT_INPUT_SIZE, PreProcessor},
};
