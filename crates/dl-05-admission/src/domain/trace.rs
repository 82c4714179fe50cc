//! Per-request admission stages, traced as they are passed.

use std::fmt;

use shared_types::LedgerError;
use tracing::{debug, info, warn};

/// `Received → KeyResolved → SignatureVerified → SemanticallyValid → Admitted`,
/// or `Rejected` from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Received,
    KeyResolved,
    SignatureVerified,
    SemanticallyValid,
    Admitted,
    Rejected,
}

#[derive(Debug)]
pub struct RequestTrace {
    operation: &'static str,
    subject: String,
    stage: RequestStage,
}

impl RequestTrace {
    pub fn received(operation: &'static str, subject: impl Into<String>) -> Self {
        let trace = Self {
            operation,
            subject: subject.into(),
            stage: RequestStage::Received,
        };
        debug!("[dl-05] {}: Received", trace);
        trace
    }

    pub fn stage(&self) -> RequestStage {
        self.stage
    }

    pub fn advance(&mut self, stage: RequestStage) {
        self.stage = stage;
        debug!("[dl-05] {}: {:?}", self, stage);
    }

    pub fn admitted(&mut self) {
        self.stage = RequestStage::Admitted;
        info!("[dl-05] {}: Admitted", self);
    }

    /// Record the rejection and hand the error back.
    pub fn reject(&mut self, error: LedgerError) -> LedgerError {
        let at = self.stage;
        self.stage = RequestStage::Rejected;
        if error.is_retryable() {
            debug!("[dl-05] {}: Rejected after {:?}: {}", self, at, error);
        } else {
            warn!("[dl-05] {}: Rejected after {:?}: {}", self, at, error);
        }
        error
    }
}

impl fmt::Display for RequestTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.subject)
    }
}
