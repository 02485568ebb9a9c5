//! # roadcast-wire
//!
//! The two wire contracts of the Roadcast bridge:
//!
//! - a versioned, field-tagged message envelope for the channel transports
//!   (publish and request/reply), encoded as JSON so adding fields never
//!   breaks older consumers and absent fields stay distinguishable from
//!   zeroed ones;
//! - a fixed-size packed layout for the poll-based shared region,
//!   byte-for-byte stable within a protocol major version.

pub mod codec;
pub mod message;
pub mod region;

pub use codec::{decode, encode, encode_frame, encode_lifecycle};
pub use message::{ConfigData, Envelope, FrameData, Message};
