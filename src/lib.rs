//! Binary sentiment classification over an ONNX sequence-classification
//! model, with a simplified whole-word tokenizer.
//!
//! The pipeline loads a newline-delimited vocabulary, encodes input text
//! into fixed-length `input_ids`/`attention_mask`/`token_type_ids`
//! sequences, runs one synchronous forward pass through an ONNX Runtime
//! session, and reads the first output tensor's two leading logits as
//! competing class scores.

pub mod config;
pub mod error;
pub mod interpret;
pub mod model;
pub mod pipeline;
pub mod tokenizer;
pub mod vocab;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use interpret::{interpret, sigmoid, Interpretation, Label};
pub use model::{resolve_model_path, InferenceEngine, OnnxEngine, OutputTensor};
pub use pipeline::{SentimentPipeline, SentimentReading, SentimentService};
pub use tokenizer::{Encoding, WordTokenizer, DEFAULT_MAX_LENGTH};
pub use vocab::Vocab;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
