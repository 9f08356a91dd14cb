//! In-process analysis registry
//!
//! Contents live only as long as the process. Entries are kept in insertion
//! order for listing, with a side index for lookups by id.

use std::collections::HashMap;
use std::sync::Arc;

use symptom_core::{AnalysisError, AnalysisResult};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Entries {
    ordered: Vec<AnalysisResult>,
    index: HashMap<Uuid, usize>,
}

/// Shared, concurrency-safe store of completed analyses
#[derive(Clone, Default)]
pub struct AnalysisStore {
    inner: Arc<RwLock<Entries>>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result under its id. An existing entry with the same id is
    /// replaced in place and keeps its list position.
    pub async fn put(&self, result: AnalysisResult) {
        let mut entries = self.inner.write().await;
        let id = result.analysis_id;

        match entries.index.get(&id).copied() {
            Some(pos) => {
                tracing::debug!(analysis_id = %id, "Overwriting stored analysis");
                entries.ordered[pos] = result;
            }
            None => {
                let pos = entries.ordered.len();
                entries.ordered.push(result);
                entries.index.insert(id, pos);
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<AnalysisResult, AnalysisError> {
        let entries = self.inner.read().await;
        entries
            .index
            .get(&id)
            .map(|&pos| entries.ordered[pos].clone())
            .ok_or(AnalysisError::NotFound(id))
    }

    /// All stored results, oldest first
    pub async fn list_all(&self) -> Vec<AnalysisResult> {
        self.inner.read().await.ordered.clone()
    }

    /// Number of stored results
    pub async fn count(&self) -> usize {
        self.inner.read().await.ordered.len()
    }
}
