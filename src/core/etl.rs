use crate::core::Pipeline;
use crate::domain::model::CycleOutcome;
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// One fetch/enrich/save cycle. An empty extract leaves the previous file untouched.
    pub async fn run(&self) -> Result<CycleOutcome> {
        let raw_data = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} skaters", raw_data.len());

        if raw_data.is_empty() {
            tracing::warn!("No data received");
            return Ok(CycleOutcome::NoData);
        }

        let transformed = self.pipeline.transform(raw_data).await?;
        let rows = transformed.players.len();
        let leader = transformed.leader.clone();
        tracing::debug!("Transformed {} rows", rows);

        let path = self.pipeline.load(transformed).await?;

        match &leader {
            Some(leader) => tracing::info!("Data saved to {}. Leader: {}", path, leader),
            None => tracing::info!("Data saved to {}", path),
        }

        Ok(CycleOutcome::Saved { path, rows, leader })
    }

    /// Runs cycles every `refresh` until `max_cycles` have run or `shutdown` resolves.
    /// Failed cycles are logged and the loop carries on. Returns the number of cycles run.
    pub async fn run_loop<F>(&self, refresh: Duration, max_cycles: Option<u64>, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0u64;

        loop {
            let started = chrono::Local::now();
            tracing::info!("[{}] Starting refresh cycle", started.format("%H:%M:%S"));

            tokio::select! {
                outcome = self.run() => {
                    match outcome {
                        Err(e) if e.is_transient() => {
                            tracing::warn!("Cycle failed, will retry next refresh: {}", e);
                            tracing::warn!("Recovery suggestion: {}", e.recovery_suggestion());
                        }
                        Err(e) => {
                            tracing::error!(
                                "Cycle failed: {} (Category: {:?}, Severity: {:?})",
                                e,
                                e.category(),
                                e.severity()
                            );
                            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
                        }
                        Ok(_) => {}
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, abandoning current cycle");
                    return cycles;
                }
            }

            cycles += 1;
            if max_cycles.is_some_and(|max| cycles >= max) {
                return cycles;
            }

            tracing::info!("Waiting {:?} for next update...", refresh);
            tokio::select! {
                _ = tokio::time::sleep(refresh) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping");
                    return cycles;
                }
            }
        }
    }
}
