//! Warning reporting for the block pipeline
//!
//! Nothing in the pipeline is fatal: over-length lines and invalid redact
//! patterns degrade to documented fallbacks and surface only through an
//! injected [`Reporter`]. Callers that want to redirect or suppress the
//! warnings swap the sink; control flow never changes.

/// Sink for non-fatal pipeline warnings
pub trait Reporter {
    /// Report one warning message
    fn warn(&mut self, message: &str);
}

/// Default reporter, forwards to [`log::warn!`]
///
/// Binaries pick the actual output by installing a `log` backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Reporter that accumulates messages in memory
///
/// Useful in tests and for callers that present warnings themselves.
///
/// # Example
///
/// ```
/// use slidebolt_core::report::{CollectReporter, Reporter};
///
/// let mut reporter = CollectReporter::new();
/// reporter.warn("something soft went wrong");
/// assert_eq!(reporter.warnings.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct CollectReporter {
    /// Warnings in the order they were reported
    pub warnings: Vec<String>,
}

impl CollectReporter {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether anything was reported
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl Reporter for CollectReporter {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
