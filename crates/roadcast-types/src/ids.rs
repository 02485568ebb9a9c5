//! Channel identifiers.
//!
//! The host names channels with stable dotted strings. Roadcast maps each
//! tracked name onto a closed enum at the callback boundary; names it does
//! not track resolve to `None` and are ignored, so newer hosts can report
//! channels this build knows nothing about.

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

/// One tracked telemetry channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    WorldPlacement,
    Speed,
    EngineRpm,
    EngineGear,
    EffectiveSteering,
    EffectiveThrottle,
    EffectiveBrake,
    EffectiveClutch,
    LocalLinearVelocity,
    LocalAngularVelocity,
    LocalLinearAcceleration,
    LocalAngularAcceleration,
    CabinAngularVelocity,
    CabinAngularAcceleration,
    CabinOffset,
    HeadOffset,
    WheelSuspDeflection,
}

impl Channel {
    /// Every tracked channel, in registration order.
    pub const ALL: [Channel; 17] = [
        Channel::WorldPlacement,
        Channel::Speed,
        Channel::EngineRpm,
        Channel::EngineGear,
        Channel::EffectiveSteering,
        Channel::EffectiveThrottle,
        Channel::EffectiveBrake,
        Channel::EffectiveClutch,
        Channel::LocalLinearVelocity,
        Channel::LocalAngularVelocity,
        Channel::LocalLinearAcceleration,
        Channel::LocalAngularAcceleration,
        Channel::CabinAngularVelocity,
        Channel::CabinAngularAcceleration,
        Channel::CabinOffset,
        Channel::HeadOffset,
        Channel::WheelSuspDeflection,
    ];

    /// The host-side channel name.
    pub fn name(self) -> &'static str {
        match self {
            Channel::WorldPlacement => "truck.world.placement",
            Channel::Speed => "truck.speed",
            Channel::EngineRpm => "truck.engine.rpm",
            Channel::EngineGear => "truck.engine.gear",
            Channel::EffectiveSteering => "truck.effective.steering",
            Channel::EffectiveThrottle => "truck.effective.throttle",
            Channel::EffectiveBrake => "truck.effective.brake",
            Channel::EffectiveClutch => "truck.effective.clutch",
            Channel::LocalLinearVelocity => "truck.local.velocity.linear",
            Channel::LocalAngularVelocity => "truck.local.velocity.angular",
            Channel::LocalLinearAcceleration => "truck.local.acceleration.linear",
            Channel::LocalAngularAcceleration => "truck.local.acceleration.angular",
            Channel::CabinAngularVelocity => "truck.cabin.velocity.angular",
            Channel::CabinAngularAcceleration => "truck.cabin.acceleration.angular",
            Channel::CabinOffset => "truck.cabin.offset",
            Channel::HeadOffset => "truck.head.offset",
            Channel::WheelSuspDeflection => "truck.wheel.suspension.deflection",
        }
    }

    /// Looks up a tracked channel by its host-side name.
    /// Returns `None` for names this build does not track.
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// The value kind this channel's slot is declared with.
    pub fn kind(self) -> ValueKind {
        match self {
            Channel::WorldPlacement => ValueKind::PlacementD,
            Channel::Speed
            | Channel::EngineRpm
            | Channel::EffectiveSteering
            | Channel::EffectiveThrottle
            | Channel::EffectiveBrake
            | Channel::EffectiveClutch
            | Channel::WheelSuspDeflection => ValueKind::F32,
            Channel::EngineGear => ValueKind::I32,
            Channel::LocalLinearVelocity
            | Channel::LocalAngularVelocity
            | Channel::LocalLinearAcceleration
            | Channel::LocalAngularAcceleration
            | Channel::CabinAngularVelocity
            | Channel::CabinAngularAcceleration => ValueKind::Vec3F,
            Channel::CabinOffset | Channel::HeadOffset => ValueKind::PlacementF,
        }
    }

    /// Whether this channel is addressed with a numeric index (per-wheel).
    pub fn is_indexed(self) -> bool {
        matches!(self, Channel::WheelSuspDeflection)
    }
}

/// A channel plus its optional index — the full address of one field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
    pub channel: Channel,
    pub index: Option<u32>,
}

impl ChannelRef {
    pub fn plain(channel: Channel) -> Self {
        Self { channel, index: None }
    }

    pub fn indexed(channel: Channel, index: u32) -> Self {
        Self { channel, index: Some(index) }
    }
}
