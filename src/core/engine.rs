use crate::core::{ComparisonReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CompareEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CompareEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ComparisonReport> {
        tracing::info!("Loading inputs...");
        let inputs = self.pipeline.load_inputs().await?;
        tracing::info!(
            "Loaded {} ({} bytes) and {} ({} bytes)",
            inputs.reference.source().display(),
            inputs.reference.len(),
            inputs.candidate.source().display(),
            inputs.candidate.len()
        );
        self.monitor.log_stats("Load");

        tracing::info!("Comparing...");
        let report = self.pipeline.compare(inputs).await?;
        tracing::info!(
            "Compared {} bytes, {} differ, identical: {}",
            report.entries.len(),
            report.mismatch_count(),
            report.is_identical()
        );
        self.monitor.log_stats("Compare");
        self.monitor.log_final_stats();

        Ok(report)
    }
}
