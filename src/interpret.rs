//! Maps the first output tensor's two leading logits to a binary label.
//!
//! Access is positional by contract: the adapter returns outputs in the
//! engine's declared order and index 0 is read here, not a name lookup.

use crate::model::OutputTensor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading one forward pass. Malformed outputs degrade to
/// `Raw`/`Failed` instead of erroring; this is a display-only path.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    Labeled {
        label: Label,
        score: f32,
        logits: Vec<f32>,
    },
    /// Fewer than two values: report the buffer as is.
    Raw(Vec<f32>),
    /// No output tensors, or the first one was not readable.
    Failed(String),
}

/// Interpret the output collection of a single forward pass.
///
/// The reported score is the winning raw logit; no normalization is applied
/// (see [`sigmoid`] for the optional squash). A tie classifies as negative.
pub fn interpret(outputs: &[OutputTensor]) -> Interpretation {
    let first = match outputs.first() {
        Some(first) => first,
        None => return Interpretation::Failed("inference produced no output tensors".to_string()),
    };

    let values = match &first.values {
        Some(values) => values,
        None => {
            return Interpretation::Failed(format!(
                "could not read model output '{}' as a float tensor",
                first.name
            ))
        }
    };

    if values.len() > 1 {
        let (label, score) = if values[0] > values[1] {
            (Label::Positive, values[0])
        } else {
            (Label::Negative, values[1])
        };
        Interpretation::Labeled {
            label,
            score,
            logits: values.clone(),
        }
    } else {
        Interpretation::Raw(values.clone())
    }
}

/// Squash a logit into (0, 1). Not applied on the display path, which
/// reports raw logits.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

pub(crate) fn join_logits(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
