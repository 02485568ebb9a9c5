//! Error types for the Roadcast bridge.
//!
//! All crates return `RoadcastResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Roadcast bridge.
#[derive(Debug, Error)]
pub enum RoadcastError {
    /// The host application or protocol version is unsupported.
    /// Initialization aborts cleanly and nothing is registered.
    #[error("Incompatible host: {0}")]
    Incompatible(String),

    /// A required event registration was refused by the host.
    #[error("Unable to register for '{0}' event callback")]
    EventRegistration(String),

    /// Another producer already owns the shared region.
    #[error("Shared region '{0}' already exists")]
    RegionExists(String),

    /// The shared region contents are not a valid Roadcast region.
    #[error("Invalid shared region: {0}")]
    InvalidRegion(String),

    /// Transport endpoint setup failed (bind, map, connect).
    #[error("Transport setup failed: {0}")]
    TransportSetup(String),

    /// A per-frame send failed. The bridge logs and drops the frame.
    #[error("Transport send failed: {0}")]
    Send(String),

    /// Wire envelope carries a different protocol major version.
    #[error("Protocol version mismatch: implemented {implemented}, received {received}")]
    ProtocolVersion { implemented: u8, received: u8 },

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, RoadcastError>`.
pub type RoadcastResult<T> = Result<T, RoadcastError>;
