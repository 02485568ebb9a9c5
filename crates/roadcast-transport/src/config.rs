//! Deployment configuration.
//!
//! The transport is selected once, at initialization, by deployment
//! configuration — the core never knows which strategy it is feeding.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use roadcast_core::transport::Transport;
use roadcast_types::RoadcastResult;

use crate::publish::PublishTransport;
use crate::region::RegionTransport;
use crate::reqrep::ReplyTransport;

/// Which delivery strategy a deployment uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransportMode {
    /// Poll-based shared region at the given path.
    Region { path: PathBuf },
    /// Fire-and-forget datagrams to the given consumer endpoint.
    Publish { addr: String },
    /// Blocking request/reply on the given listen address. Only for hosts
    /// that tolerate blocking callbacks.
    RequestReply { addr: String },
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Region { path: std::env::temp_dir().join("roadcast.region") }
    }
}

impl TransportMode {
    /// Builds the configured transport, acquiring its endpoint.
    pub fn build(&self) -> RoadcastResult<Box<dyn Transport>> {
        match self {
            TransportMode::Region { path } => {
                Ok(Box::new(RegionTransport::create(path)?))
            }
            TransportMode::Publish { addr } => {
                Ok(Box::new(PublishTransport::connect(addr)?))
            }
            TransportMode::RequestReply { addr } => {
                Ok(Box::new(ReplyTransport::bind(addr)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_serde() {
        let mode = TransportMode::Publish { addr: "127.0.0.1:4545".to_string() };
        let json = serde_json::to_string(&mode).unwrap();
        assert!(json.contains("\"mode\":\"publish\""));
        let recovered: TransportMode = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, mode);
    }

    #[test]
    fn default_is_the_poll_region() {
        assert!(matches!(TransportMode::default(), TransportMode::Region { .. }));
    }

    #[test]
    fn build_acquires_the_configured_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let mode = TransportMode::Region { path: dir.path().join("telemetry.region") };
        let mut transport = mode.build().unwrap();
        assert_eq!(transport.name(), "region");
        transport.close().unwrap();
    }
}
