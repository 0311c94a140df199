//! # Error Taxonomy
//!
//! Every rejection in the core belongs to exactly one `ErrorKind`. Each
//! subsystem keeps its own `thiserror` enum with the offending fields and
//! classifies its variants through `Classify`, so callers can decide to
//! resubmit, wait, or abandon without matching on subsystem internals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a rejected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required capability.
    Authorization,
    /// Malformed target, threshold, or arguments.
    Validation,
    /// Duplicate confirmation, already executed, record already exists.
    State,
    /// Timelock not yet elapsed, signature expired.
    Temporal,
    /// Signer set rotated since submission.
    Consistency,
    /// The inner privileged call failed.
    Execution,
    /// Circuit breaker engaged.
    Availability,
}

impl ErrorKind {
    /// Stable name used in logs and events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authorization => "AuthorizationError",
            Self::Validation => "ValidationError",
            Self::State => "StateError",
            Self::Temporal => "TemporalError",
            Self::Consistency => "ConsistencyError",
            Self::Execution => "ExecutionError",
            Self::Availability => "AvailabilityError",
        }
    }

    /// Whether the identical call may succeed later with no change of input.
    ///
    /// Temporal rejections clear with time and availability ones when the
    /// breaker is released. Execution failures need their cause fixed first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Temporal | Self::Availability)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a subsystem error onto the shared taxonomy.
pub trait Classify {
    /// The kind of this rejection.
    fn kind(&self) -> ErrorKind;
}
