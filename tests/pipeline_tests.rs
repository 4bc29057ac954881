//! End-to-end pipeline coverage against a stub engine.

use sentibert::{
    InferenceEngine, Interpretation, Label, OutputTensor, PipelineConfig, PipelineError,
    SentimentPipeline, SentimentService, Vocab,
};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

type Capture = Rc<RefCell<Vec<(Vec<i64>, Vec<i64>)>>>;

/// Echoes a fixed output collection and records the tensors it was handed.
struct StubEngine {
    outputs: Vec<OutputTensor>,
    capture: Capture,
}

impl StubEngine {
    fn with_logits(logits: &[f32], capture: Capture) -> Self {
        Self {
            outputs: vec![OutputTensor {
                name: "logits".to_string(),
                values: Some(logits.to_vec()),
            }],
            capture,
        }
    }
}

impl InferenceEngine for StubEngine {
    fn run(
        &mut self,
        input_ids: &[i64],
        attention_mask: &[i64],
    ) -> sentibert::Result<Vec<OutputTensor>> {
        self.capture
            .borrow_mut()
            .push((input_ids.to_vec(), attention_mask.to_vec()));
        Ok(self.outputs.clone())
    }
}

struct FailEngine;

impl InferenceEngine for FailEngine {
    fn run(&mut self, _: &[i64], _: &[i64]) -> sentibert::Result<Vec<OutputTensor>> {
        Err(PipelineError::Engine("engine exploded".to_string()))
    }
}

fn five_token_vocab() -> Vocab {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for token in ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "good"] {
        writeln!(file, "{}", token).unwrap();
    }
    Vocab::load(file.path()).unwrap()
}

fn test_config() -> PipelineConfig {
    PipelineConfig::default()
}

#[test]
fn classify_renders_input_and_label_from_stub_logits() {
    let capture: Capture = Rc::new(RefCell::new(Vec::new()));
    let engine = StubEngine::with_logits(&[0.25, 0.75], capture.clone());
    let mut pipeline = SentimentPipeline::with_engine(engine, five_token_vocab(), test_config());

    let reading = pipeline.classify("good").unwrap();
    match &reading.interpretation {
        Interpretation::Labeled { label, score, .. } => {
            assert_eq!(*label, Label::Negative);
            assert_eq!(*score, 0.75);
        }
        other => panic!("unexpected interpretation: {:?}", other),
    }

    let rendered = reading.to_string();
    assert!(rendered.contains("input: 'good'"));
    assert!(rendered.contains("negative"));
    assert!(rendered.contains("0.75"));

    // the engine saw exactly one forward pass of two full-length sequences
    let calls = capture.borrow();
    assert_eq!(calls.len(), 1);
    let (input_ids, attention_mask) = &calls[0];
    assert_eq!(input_ids.len(), 128);
    assert_eq!(attention_mask.len(), 128);
    // [CLS] good [SEP] then padding
    assert_eq!(&input_ids[..4], &[2, 4, 3, 0]);
    assert_eq!(&attention_mask[..4], &[1, 1, 1, 0]);
}

#[test]
fn classify_reports_positive_when_first_logit_wins() {
    let capture: Capture = Rc::new(RefCell::new(Vec::new()));
    let engine = StubEngine::with_logits(&[1.9, -0.4], capture);
    let mut pipeline = SentimentPipeline::with_engine(engine, five_token_vocab(), test_config());

    let reading = pipeline.classify("good good").unwrap();
    let rendered = reading.to_string();
    assert!(rendered.contains("prediction: positive (score: 1.90)"));
    assert!(rendered.contains("logits: 1.9, -0.4"));
}

#[test]
fn single_value_output_degrades_to_raw_buffer() {
    let capture: Capture = Rc::new(RefCell::new(Vec::new()));
    let engine = StubEngine::with_logits(&[0.4], capture);
    let mut pipeline = SentimentPipeline::with_engine(engine, five_token_vocab(), test_config());

    let reading = pipeline.classify("good").unwrap();
    assert_eq!(reading.interpretation, Interpretation::Raw(vec![0.4]));
    assert!(reading.to_string().contains("raw logits: 0.4"));
}

#[test]
fn empty_output_collection_degrades_to_failure_string() {
    let capture: Capture = Rc::new(RefCell::new(Vec::new()));
    let engine = StubEngine {
        outputs: Vec::new(),
        capture,
    };
    let mut pipeline = SentimentPipeline::with_engine(engine, five_token_vocab(), test_config());

    let reading = pipeline.classify("good").unwrap();
    assert!(matches!(reading.interpretation, Interpretation::Failed(_)));
    assert!(reading.to_string().contains("no output tensors"));
}

#[test]
fn engine_failure_surfaces_as_engine_error() {
    let mut pipeline =
        SentimentPipeline::with_engine(FailEngine, five_token_vocab(), test_config());

    let err = pipeline.classify("good").unwrap_err();
    assert!(matches!(err, PipelineError::Engine(_)));
    assert!(err.to_string().contains("engine exploded"));
}

#[test]
fn service_rejects_requests_before_init() {
    let mut service: SentimentService<StubEngine> = SentimentService::uninitialized();
    assert!(!service.is_ready());

    let err = service.classify("good").unwrap_err();
    assert!(matches!(err, PipelineError::Uninitialized(_)));
}

#[test]
fn service_delegates_once_a_pipeline_exists() {
    let capture: Capture = Rc::new(RefCell::new(Vec::new()));
    let engine = StubEngine::with_logits(&[0.8, 0.3], capture);
    let pipeline = SentimentPipeline::with_engine(engine, five_token_vocab(), test_config());

    let mut service = SentimentService::with_pipeline(pipeline);
    assert!(service.is_ready());

    let reading = service.classify("good").unwrap();
    match reading.interpretation {
        Interpretation::Labeled { label, score, .. } => {
            assert_eq!(label, Label::Positive);
            assert_eq!(score, 0.8);
        }
        other => panic!("unexpected interpretation: {:?}", other),
    }
}

#[test]
fn service_init_fails_on_missing_resources() {
    let mut service = SentimentService::default();
    let config = PipelineConfig {
        model_path: "no/such/bert.onnx".into(),
        vocab_path: "no/such/vocab.txt".into(),
        ..PipelineConfig::default()
    };

    let err = service.init(config).unwrap_err();
    assert!(matches!(err, PipelineError::ResourceLoad(_)));
    // the trigger stays gated after a failed init
    assert!(!service.is_ready());

    let err = service.classify("good").unwrap_err();
    assert!(matches!(err, PipelineError::Uninitialized(_)));
}
