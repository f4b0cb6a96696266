use std::collections::HashMap;
use std::time::Instant;

use crate::parsing::domain::parse_warning::ParseWarning;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Use cases report stage timings and parse warnings here instead of
/// writing output themselves, so the caller decides where diagnostics go.
/// Nothing reported through this trait ends up in the rendered document.
pub trait PipelineLogger: Send {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a non-fatal parse warning.
    fn warning(&mut self, warning: &ParseWarning);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn warning(&mut self, _warning: &ParseWarning) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that emits through the `log` facade and keeps
/// per-stage timings and warning counts for a closing summary.
pub struct LogPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    warnings: HashMap<&'static str, usize>,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            warnings: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.warnings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!("Pipeline summary ({:.1}ms total):", elapsed_ms)];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let total_ms: f64 = self.timings[stage].iter().sum();
            lines.push(format!("  {stage:10}: {total_ms:8.2}ms"));
        }

        if !self.warnings.is_empty() {
            let total: usize = self.warnings.values().sum();
            let mut kinds: Vec<_> = self.warnings.iter().collect();
            kinds.sort();
            let breakdown = kinds
                .iter()
                .map(|(kind, count)| format!("{kind} x{count}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  warnings  : {total} ({breakdown})"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.2}ms");
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn warning(&mut self, warning: &ParseWarning) {
        log::warn!("{warning}");
        *self.warnings.entry(warning.kind.as_str()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}
