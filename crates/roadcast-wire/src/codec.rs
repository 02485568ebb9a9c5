//! Envelope encoding and decoding.
//!
//! JSON keeps the format self-describing: field names are the tags, so a
//! consumer built against an older minor version simply ignores keys it
//! does not know. Encoding is deterministic — struct fields serialize in
//! declaration order, so the same snapshot always yields the same bytes.

use roadcast_core::frame::FrameSnapshot;
use roadcast_core::transport::LifecycleEvent;
use roadcast_types::constants::{protocol_major, PROTOCOL_VERSION};
use roadcast_types::{RoadcastError, RoadcastResult};

use crate::message::{Envelope, FrameData, Message};

/// Encodes an envelope to its wire bytes.
pub fn encode(envelope: &Envelope) -> RoadcastResult<Vec<u8>> {
    serde_json::to_vec(envelope).map_err(|e| RoadcastError::Serialization(e.to_string()))
}

/// Builds and encodes the envelope for a lifecycle event.
pub fn encode_lifecycle(event: LifecycleEvent) -> RoadcastResult<Vec<u8>> {
    encode(&Envelope::new(Message::from(event)))
}

/// Builds and encodes the envelope for a completed frame.
pub fn encode_frame(snapshot: &FrameSnapshot) -> RoadcastResult<Vec<u8>> {
    encode(&Envelope::new(Message::Frame(Box::new(FrameData::from(snapshot)))))
}

/// Decodes wire bytes, rejecting envelopes from a different protocol
/// major version.
pub fn decode(bytes: &[u8]) -> RoadcastResult<Envelope> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|e| RoadcastError::Serialization(e.to_string()))?;
    if protocol_major(envelope.version) != protocol_major(PROTOCOL_VERSION) {
        return Err(RoadcastError::ProtocolVersion {
            implemented: protocol_major(PROTOCOL_VERSION),
            received: protocol_major(envelope.version),
        });
    }
    Ok(envelope)
}
