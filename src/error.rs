//! Gate error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`ValidationGate::check`](crate::ValidationGate::check).
///
/// Validation failures are not errors; they come back as a rejection
/// inside [`Outcome`](crate::Outcome). `GateError` covers the cases
/// where the gate itself could not finish its work.
#[derive(Debug, Error)]
pub enum GateError {
    /// Removing a stored upload failed during cleanup.
    #[error("failed to clean up uploaded file {}", path.display())]
    Cleanup {
        /// Path of the upload that could not be removed.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn cleanup_error_names_the_path_and_keeps_the_source() {
        let error = GateError::Cleanup {
            path: PathBuf::from("/tmp/upload-1"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "failed to clean up uploaded file /tmp/upload-1"
        );
        assert!(error.source().is_some());
    }
}
