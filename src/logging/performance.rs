// src/logging/performance.rs
use log::info;
use std::time::Instant;

/// Measures one phase of a run and logs its duration when finished.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    label: String,
    start_time: Instant,
}

impl PhaseTimer {
    pub fn start(label: impl Into<String>) -> Self {
        PhaseTimer {
            label: label.into(),
            start_time: Instant::now(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn finish(self) -> u64 {
        let elapsed = self.elapsed_ms();
        info!("{} done in {}ms", self.label, elapsed);
        elapsed
    }
}
