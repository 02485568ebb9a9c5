//! # roadcast-types
//!
//! Shared types, identifiers, error types, and protocol constants
//! for the Roadcast telemetry bridge.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Roadcast crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod value;

pub use error::{RoadcastError, RoadcastResult};
pub use ids::{Channel, ChannelRef};
pub use value::{Euler, PlacementD, PlacementF, Value, ValueKind, Vec3D, Vec3F};
