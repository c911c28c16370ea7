//! Error types reported by delivery sinks.

use thiserror::Error;

/// Errors a [`DeliverySink`](super::DeliverySink) can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// A filesystem operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The requested filename is not a plain file name.
    #[error("invalid filename '{filename}': must not contain path components")]
    InvalidFilename {
        /// The rejected filename.
        filename: String,
    },

    /// The host could not provide a preview surface.
    #[error("no preview surface available: {message}")]
    SurfaceUnavailable {
        /// Reason the surface could not be provided.
        message: String,
    },

    /// Launching the external viewer failed.
    #[error("failed to launch viewer: {message}")]
    Launch {
        /// Error detail from the launcher.
        message: String,
    },
}

impl DeliveryError {
    /// Wraps an I/O error with context.
    #[must_use]
    pub fn io(context: &str, error: &std::io::Error) -> Self {
        Self::Io {
            message: format!("{context}: {error}"),
        }
    }
}
