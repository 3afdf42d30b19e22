use super::config::ValidationConfig;
use super::progress::ProgressReporter;

/// Shared, read-only inputs of an analysis task.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub reporter: &'a ProgressReporter<'a>,
    pub config: &'a ValidationConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(reporter: &'a ProgressReporter<'a>, config: &'a ValidationConfig) -> Self {
        Self { reporter, config }
    }
}
