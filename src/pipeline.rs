use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::interpret::{interpret, join_logits, Interpretation};
use crate::model::{resolve_model_path, InferenceEngine, OnnxEngine};
use crate::tokenizer::WordTokenizer;
use crate::vocab::Vocab;
use std::fmt;

/// Result of classifying one input, rendered for display via `Display`.
#[derive(Debug, Clone)]
pub struct SentimentReading {
    pub input: String,
    pub interpretation: Interpretation,
}

impl fmt::Display for SentimentReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.interpretation {
            Interpretation::Labeled {
                label,
                score,
                logits,
            } => write!(
                f,
                "input: '{}'\nprediction: {} (score: {:.2})\nlogits: {}",
                self.input,
                label,
                score,
                join_logits(logits)
            ),
            Interpretation::Raw(values) => write!(
                f,
                "input: '{}'\nprediction: raw logits: {}\nlogits: {}",
                self.input,
                join_logits(values),
                join_logits(values)
            ),
            Interpretation::Failed(message) => f.write_str(message),
        }
    }
}

/// Context object owning the vocabulary, tokenizer and engine for the
/// lifetime of the process. Constructed at startup; dropping it releases the
/// model session on every exit path, including failed construction.
///
/// `classify` takes `&mut self`: the engine's session is not guaranteed safe
/// for concurrent forward passes, so one in-flight request per pipeline is
/// enforced at compile time.
pub struct SentimentPipeline<E: InferenceEngine = OnnxEngine> {
    tokenizer: WordTokenizer,
    engine: E,
    config: PipelineConfig,
}

impl SentimentPipeline<OnnxEngine> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let vocab = Vocab::load(&config.vocab_path)?;
        let model_path = resolve_model_path(&config.model_path, &config.cache_dir)?;
        let engine = OnnxEngine::load(&model_path)?;

        Ok(Self::with_engine(engine, vocab, config))
    }
}

impl<E: InferenceEngine> SentimentPipeline<E> {
    /// Assemble a pipeline around an already-built engine.
    pub fn with_engine(engine: E, vocab: Vocab, config: PipelineConfig) -> Self {
        let tokenizer = WordTokenizer::new(vocab, config.max_length);
        Self {
            tokenizer,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classify(&mut self, text: &str) -> Result<SentimentReading> {
        let encoding = self.tokenizer.encode(text);
        let outputs = self
            .engine
            .run(&encoding.input_ids, &encoding.attention_mask)?;
        let interpretation = interpret(&outputs);

        tracing::debug!("classified '{}': {:?}", text, interpretation);
        Ok(SentimentReading {
            input: text.to_string(),
            interpretation,
        })
    }
}

/// Shell-facing wrapper mirroring the host-application lifecycle: requests
/// made before `init` succeeds are rejected with a state error instead of
/// touching a half-built pipeline.
pub struct SentimentService<E: InferenceEngine = OnnxEngine> {
    pipeline: Option<SentimentPipeline<E>>,
}

impl<E: InferenceEngine> SentimentService<E> {
    pub fn uninitialized() -> Self {
        Self { pipeline: None }
    }

    pub fn with_pipeline(pipeline: SentimentPipeline<E>) -> Self {
        Self {
            pipeline: Some(pipeline),
        }
    }

    /// Whether `init` has completed; a shell gates its trigger control on this.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn classify(&mut self, text: &str) -> Result<SentimentReading> {
        match self.pipeline.as_mut() {
            Some(pipeline) => pipeline.classify(text),
            None => Err(PipelineError::Uninitialized(
                "classification requested before the model and vocabulary were loaded".to_string(),
            )),
        }
    }
}

impl SentimentService<OnnxEngine> {
    pub fn init(&mut self, config: PipelineConfig) -> Result<()> {
        let pipeline = SentimentPipeline::new(config)?;
        self.pipeline = Some(pipeline);
        tracing::info!("sentiment pipeline initialized");
        Ok(())
    }
}

impl Default for SentimentService<OnnxEngine> {
    fn default() -> Self {
        Self::uninitialized()
    }
}
