use crate::error::{PipelineError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Immutable token -> id table built from a newline-delimited vocabulary file.
///
/// Ids are assigned by 0-based line order. A repeated token keeps the id of
/// its last occurrence; no deduplication diagnostics are emitted.
#[derive(Debug)]
pub struct Vocab {
    entries: HashMap<String, i64>,
}

impl Vocab {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            PipelineError::ResourceLoad(format!(
                "failed to open vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let mut entries = HashMap::new();
        for (index, line) in reader.lines().enumerate() {
            let token = line?;
            entries.insert(token, index as i64);
        }

        tracing::info!("loaded vocabulary with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn id(&self, token: &str) -> Option<i64> {
        self.entries.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
