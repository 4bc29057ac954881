use crate::error::{PipelineError, Result};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};

/// Copy the bundled model asset into `cache_dir` and return the cached path.
///
/// Skips the copy when a file of the same name is already cached; there is no
/// content check, an identical name is taken to mean identical content.
pub fn resolve_model_path(bundled: &Path, cache_dir: &Path) -> Result<PathBuf> {
    let file_name = bundled.file_name().ok_or_else(|| {
        PipelineError::ResourceLoad(format!("invalid model path: {}", bundled.display()))
    })?;
    let cached = cache_dir.join(file_name);

    if cached.exists() {
        tracing::debug!("model already cached at {}", cached.display());
        return Ok(cached);
    }

    tracing::info!("copying model asset to {}", cached.display());
    std::fs::create_dir_all(cache_dir).map_err(|e| {
        PipelineError::ResourceLoad(format!(
            "failed to create cache directory {}: {}",
            cache_dir.display(),
            e
        ))
    })?;
    std::fs::copy(bundled, &cached).map_err(|e| {
        PipelineError::ResourceLoad(format!(
            "failed to copy model {} into cache: {}",
            bundled.display(),
            e
        ))
    })?;

    Ok(cached)
}

/// One named model output. `values` is `None` when the tensor's buffer was
/// not readable as f32.
#[derive(Debug, Clone)]
pub struct OutputTensor {
    pub name: String,
    pub values: Option<Vec<f32>>,
}

/// Seam between the pipeline and the inference runtime: one synchronous
/// forward pass over the two `(1, N)` integer sequences, returning the
/// outputs in the engine's native order.
pub trait InferenceEngine {
    fn run(&mut self, input_ids: &[i64], attention_mask: &[i64]) -> Result<Vec<OutputTensor>>;
}

#[derive(Debug)]
pub struct OnnxEngine {
    session: Session,
    output_names: Vec<String>,
}

impl OnnxEngine {
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(PipelineError::ResourceLoad(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| PipelineError::ResourceLoad(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::ResourceLoad(format!("failed to set optimization level: {}", e)))?
            .with_intra_threads(1)
            .map_err(|e| PipelineError::ResourceLoad(format!("failed to set thread count: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| PipelineError::ResourceLoad(format!("failed to load model: {}", e)))?;

        for input in session.inputs() {
            tracing::debug!("model input: {}", input.name());
        }
        for output in session.outputs() {
            tracing::debug!("model output: {}", output.name());
        }

        let output_names: Vec<String> =
            session.outputs().iter().map(|o| o.name().to_string()).collect();

        // The interpreter reads the first output positionally; flag drift in
        // the exported graph once, here at the boundary.
        match output_names.first() {
            Some(name) if name != "logits" => {
                tracing::warn!("first model output is '{}', expected 'logits'", name);
            }
            None => tracing::warn!("model declares no outputs"),
            _ => {}
        }

        tracing::info!("loaded ONNX model from {}", model_path.display());
        Ok(Self {
            session,
            output_names,
        })
    }
}

impl InferenceEngine for OnnxEngine {
    fn run(&mut self, input_ids: &[i64], attention_mask: &[i64]) -> Result<Vec<OutputTensor>> {
        use ort::inputs;

        let input_ids_array =
            ndarray::Array2::from_shape_vec((1, input_ids.len()), input_ids.to_vec()).map_err(
                |e| PipelineError::Engine(format!("failed to create input_ids array: {}", e)),
            )?;
        let attention_mask_array =
            ndarray::Array2::from_shape_vec((1, attention_mask.len()), attention_mask.to_vec())
                .map_err(|e| {
                    PipelineError::Engine(format!("failed to create attention_mask array: {}", e))
                })?;

        let input_tensor = Value::from_array(input_ids_array)
            .map_err(|e| PipelineError::Engine(format!("failed to build input_ids tensor: {}", e)))?;
        let attention_tensor = Value::from_array(attention_mask_array).map_err(|e| {
            PipelineError::Engine(format!("failed to build attention_mask tensor: {}", e))
        })?;

        let outputs = self
            .session
            .run(inputs![
                "input_ids" => input_tensor,
                "attention_mask" => attention_tensor
            ])
            .map_err(|e| PipelineError::Engine(format!("inference failed: {}", e)))?;

        let mut collected = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            match outputs.get(name.as_str()) {
                Some(value) => {
                    let values = value
                        .try_extract_tensor::<f32>()
                        .ok()
                        .map(|(_shape, data)| data.to_vec());
                    collected.push(OutputTensor {
                        name: name.clone(),
                        values,
                    });
                }
                None => {
                    tracing::warn!("declared output '{}' missing from session results", name);
                }
            }
        }

        Ok(collected)
    }
}
