//! Recoverable failures raised while decoding and rendering alerts.
//!
//! Nothing here is fatal. Callers log the error and carry on with the rest
//! of the snapshot, suppress the outbound request, or fall back to a
//! default value.

use std::time::Duration;

use thiserror::Error;

use crate::codec::AlertCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// Snapshot entry carries a code outside this client's catalog
    #[error("unrecognized encoded alert {0}")]
    UnrecognizedCode(AlertCode),

    /// Descriptor id is not part of the code table
    #[error("unable to encode alert {0:?}")]
    UnknownDescriptor(String),

    /// Cooldown end is not after its start
    #[error("degenerate cooldown interval {start:?}..{end:?}")]
    DegenerateCooldownInterval { start: Duration, end: Duration },

    /// Severity outside the descriptor's range (clamped, never surfaced)
    #[error("severity {severity} outside [{min}, {max}] for alert {alert:?}")]
    SeverityOutOfRange {
        alert: String,
        severity: i16,
        min: i16,
        max: i16,
    },
}
