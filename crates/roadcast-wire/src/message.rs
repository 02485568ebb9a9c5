//! Wire message types.
//!
//! Every message a consumer can receive is one `Envelope`: a protocol
//! version plus a discriminated `Message`. Frame fields are `Option`s —
//! `null` means the channel is absent in this producer build, while a
//! channel the host zeroed is an explicit `0`.

use serde::{Deserialize, Serialize};

use roadcast_core::config::VehicleConfig;
use roadcast_core::frame::{FrameSnapshot, FrameTiming};
use roadcast_core::transport::LifecycleEvent;
use roadcast_types::constants::PROTOCOL_VERSION;
use roadcast_types::{PlacementD, PlacementF, Vec3D, Vec3F};

/// The outermost wire record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Packed protocol version, major in the high byte.
    pub version: u16,
    pub message: Message,
}

impl Envelope {
    pub fn new(message: Message) -> Self {
        Self { version: PROTOCOL_VERSION, message }
    }
}

/// Discriminated message kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Producer initialized and bound its endpoint.
    Init,
    /// Vehicle configuration changed.
    Config(ConfigData),
    /// Simulation started advancing.
    Started,
    /// One completed simulation frame.
    Frame(Box<FrameData>),
    /// Simulation paused; no frames until the next `Started`.
    Paused,
    /// Producer terminated. Always the last message.
    Shutdown,
}

impl From<LifecycleEvent> for Message {
    fn from(event: LifecycleEvent) -> Self {
        match event {
            LifecycleEvent::Init => Message::Init,
            LifecycleEvent::Config(config) => Message::Config(ConfigData::from(&config)),
            LifecycleEvent::Started => Message::Started,
            LifecycleEvent::Paused => Message::Paused,
            LifecycleEvent::Shutdown => Message::Shutdown,
        }
    }
}

/// Configuration payload of a `Config` message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    pub wheel_count: u32,
    pub cabin_position: Vec3F,
    pub head_position: Vec3F,
}

impl From<&VehicleConfig> for ConfigData {
    fn from(config: &VehicleConfig) -> Self {
        Self {
            wheel_count: config.wheel_count,
            cabin_position: config.cabin_position,
            head_position: config.head_position,
        }
    }
}

/// Payload of a `Frame` message: the full snapshot, field-tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub timing: FrameTiming,

    pub world_placement: Option<PlacementD>,
    pub speed: Option<f32>,
    pub engine_rpm: Option<f32>,
    pub engine_gear: Option<i32>,
    pub effective_steering: Option<f32>,
    pub effective_throttle: Option<f32>,
    pub effective_brake: Option<f32>,
    pub effective_clutch: Option<f32>,
    pub local_linear_velocity: Option<Vec3F>,
    pub local_angular_velocity: Option<Vec3F>,
    pub local_linear_acceleration: Option<Vec3F>,
    pub local_angular_acceleration: Option<Vec3F>,
    pub cabin_angular_velocity: Option<Vec3F>,
    pub cabin_angular_acceleration: Option<Vec3F>,
    pub cabin_offset: Option<PlacementF>,
    pub head_offset: Option<PlacementF>,
    pub head_world_position: Option<Vec3D>,

    pub wheel_deflections: Vec<f32>,
}

impl From<&FrameSnapshot> for FrameData {
    fn from(snapshot: &FrameSnapshot) -> Self {
        Self {
            timing: snapshot.timing,
            world_placement: snapshot.world_placement,
            speed: snapshot.speed,
            engine_rpm: snapshot.engine_rpm,
            engine_gear: snapshot.engine_gear,
            effective_steering: snapshot.effective_steering,
            effective_throttle: snapshot.effective_throttle,
            effective_brake: snapshot.effective_brake,
            effective_clutch: snapshot.effective_clutch,
            local_linear_velocity: snapshot.local_linear_velocity,
            local_angular_velocity: snapshot.local_angular_velocity,
            local_linear_acceleration: snapshot.local_linear_acceleration,
            local_angular_acceleration: snapshot.local_angular_acceleration,
            cabin_angular_velocity: snapshot.cabin_angular_velocity,
            cabin_angular_acceleration: snapshot.cabin_angular_acceleration,
            cabin_offset: snapshot.cabin_offset,
            head_offset: snapshot.head_offset,
            head_world_position: snapshot.head_world_position,
            wheel_deflections: snapshot.wheel_deflections.clone(),
        }
    }
}
