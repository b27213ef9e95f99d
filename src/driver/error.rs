// driver/error.rs
// Error taxonomy for volume operations

use thiserror::Error;

/// Errors surfaced by the volume driver.
///
/// Engine failures are propagated verbatim and never retried. The only
/// failures swallowed by the driver are the two documented best-effort
/// cases: a skipped List entry and a missing creation timestamp on Get.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("volume '{0}' already exists")]
    AlreadyExists(String),

    #[error("volume '{0}' not found")]
    NotFound(String),

    /// A qualified dataset name did not carry the expected root prefix.
    /// Unreachable with correct callers; guarded instead of indexed.
    #[error("dataset '{name}' is not under root dataset '{root}'")]
    MalformedName { name: String, root: String },

    #[error("{0}")]
    Engine(String),
}
