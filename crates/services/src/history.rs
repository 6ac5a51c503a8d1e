use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{HistoryEntry, HistoryStats, PracticeModule};

use crate::backend::PracticeBackend;
use crate::error::ServiceError;

/// Past sessions for one module plus the aggregates shown above them.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryReport {
    pub module: PracticeModule,
    /// Newest first; undated entries last.
    pub entries: Vec<HistoryEntry>,
    pub stats: HistoryStats,
}

#[derive(Clone)]
pub struct HistoryService {
    clock: Clock,
    backend: Arc<dyn PracticeBackend>,
}

impl HistoryService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn PracticeBackend>) -> Self {
        Self { clock, backend }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the history request fails.
    pub async fn load(&self, module: PracticeModule) -> Result<HistoryReport, ServiceError> {
        let mut entries = self.backend.history(module).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let stats = HistoryStats::from_entries(&entries, self.clock.now());
        log::debug!("loaded {} {module} history entries", entries.len());
        Ok(HistoryReport {
            module,
            entries,
            stats,
        })
    }
}
