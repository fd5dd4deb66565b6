//! Step observer for progress reporting.

use std::fmt;
use std::time::Instant;

use crate::RunSummary;

/// The stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    LoadSkims,
    BuildZones,
    ReshapeSkims,
    LoadTables,
    FetchDirectory,
    ComputeAttributes,
    WriteInputs,
    WriteSkims,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::LoadSkims => "loading skims",
            Step::BuildZones => "building zones",
            Step::ReshapeSkims => "reshaping skims",
            Step::LoadTables => "loading land-use tables",
            Step::FetchDirectory => "fetching schools and colleges",
            Step::ComputeAttributes => "computing attributes",
            Step::WriteInputs => "writing ActivitySim inputs",
            Step::WriteSkims => "writing skims",
        })
    }
}

/// Callbacks invoked by [`Pipeline::run`](crate::Pipeline::run) around each
/// step.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait PipelineObserver {
    /// Called before `step` starts.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after `step` finished successfully.
    fn on_step_end(&mut self, _step: Step) {}

    /// Called once after the last step.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`PipelineObserver`] that does nothing.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Logs each step and its wall-clock time at `info`.
#[derive(Debug, Default)]
pub struct LoggingObserver {
    started: Option<Instant>,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineObserver for LoggingObserver {
    fn on_step_start(&mut self, step: Step) {
        log::info!("{step}...");
        self.started = Some(Instant::now());
    }

    fn on_step_end(&mut self, step: Step) {
        if let Some(t) = self.started.take() {
            log::info!("{step}: done in {:.2}s", t.elapsed().as_secs_f64());
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        log::info!(
            "run complete: {} zones, {} matrices ({} zero-filled)",
            summary.zones,
            summary.matrices,
            summary.zero_filled,
        );
        for (table, n) in &summary.buffered {
            if *n > 0 {
                log::info!("{table}: {n} entities placed by the buffered search");
            }
        }
    }
}
