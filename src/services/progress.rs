//! Progress Tracker
//!
//! In-memory `ProgressRecorder`. Every `begin` appends a new entry, so a step
//! run once per iteration shows up once per iteration in the report.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use content_cascade_core::{CoreError, CoreResult, ProgressRecorder};
use serde::Serialize;

/// Status of a recorded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    InProgress,
    Completed,
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStatus::InProgress => write!(f, "In Progress"),
            ProgressStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One invocation of a step
#[derive(Debug, Clone)]
pub struct ProgressEntry {
    pub component: String,
    pub step: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: ProgressStatus,
    start: Instant,
    end: Option<Instant>,
}

impl ProgressEntry {
    /// Elapsed time, measured up to now while still in progress
    pub fn duration(&self) -> Duration {
        self.end.unwrap_or_else(Instant::now).duration_since(self.start)
    }
}

/// Mutex-guarded list of progress entries
#[derive(Debug, Default)]
pub struct ProgressTracker {
    entries: Mutex<Vec<ProgressEntry>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry in invocation order
    pub fn entries(&self) -> CoreResult<Vec<ProgressEntry>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, Vec<ProgressEntry>>> {
        self.entries
            .lock()
            .map_err(|e| CoreError::internal(format!("progress tracker lock poisoned: {}", e)))
    }
}

impl ProgressRecorder for ProgressTracker {
    fn begin(&self, component: &str, step: &str) -> CoreResult<()> {
        let mut entries = self.lock()?;
        entries.push(ProgressEntry {
            component: component.to_string(),
            step: step.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            status: ProgressStatus::InProgress,
            start: Instant::now(),
            end: None,
        });
        Ok(())
    }

    fn finish(&self, component: &str, step: &str) -> CoreResult<()> {
        let mut entries = self.lock()?;
        let entry = entries
            .iter_mut()
            .rev()
            .find(|e| {
                e.component == component
                    && e.step == step
                    && e.status == ProgressStatus::InProgress
            })
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "no in-progress step '{}' for component '{}'",
                    step, component
                ))
            })?;

        entry.status = ProgressStatus::Completed;
        entry.end = Some(Instant::now());
        entry.finished_at = Some(Utc::now());
        Ok(())
    }

    fn report(&self) -> CoreResult<String> {
        let entries = self.lock()?;

        // Components in first-seen order
        let mut components: Vec<&str> = Vec::new();
        for entry in entries.iter() {
            if !components.contains(&entry.component.as_str()) {
                components.push(&entry.component);
            }
        }

        let mut report = String::from("Progress Report:\n\n");
        for component in components {
            report.push_str(&format!("{}:\n", component));
            for entry in entries.iter().filter(|e| e.component == component) {
                report.push_str(&format!(
                    "  - {}: {} (Duration: {:.2} seconds)\n",
                    entry.step,
                    entry.status,
                    entry.duration().as_secs_f64()
                ));
            }
        }
        Ok(report)
    }
}
