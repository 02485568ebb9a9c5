//! Field store — the in-memory telemetry snapshot source.
//!
//! A fixed set of typed slots, one per tracked channel, plus a capped
//! indexed group for per-wheel data. Host callbacks write into it in
//! arbitrary order between frame boundaries; the assembler reads it at
//! frame end. Within a frame the last write to a channel wins, and slots
//! with no write keep their previous value.
//!
//! The store performs no locking: the host delivers field updates serially.

use thiserror::Error;

use roadcast_types::constants::MAX_WHEEL_COUNT;
use roadcast_types::{Channel, PlacementD, PlacementF, Value, ValueKind, Vec3F};

/// A typed storage cell. `live` records whether the channel registration
/// succeeded; dead slots stay at their zero value forever and are reported
/// as absent rather than zero.
#[derive(Debug, Clone, Copy, Default)]
struct Slot<T: Copy + Default> {
    value: T,
    live: bool,
}

impl<T: Copy + Default> Slot<T> {
    fn set(&mut self, value: T) {
        self.value = value;
    }

    /// Host reported the value absent: reset to the type's zero value,
    /// never leave a stale reading behind.
    fn reset(&mut self) {
        self.value = T::default();
    }

    fn read(&self) -> Option<T> {
        self.live.then_some(self.value)
    }
}

/// A write the store refused. The caller decides whether to log it;
/// rejections never escalate into the host's control flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// The delivered value does not match the slot's declared type.
    #[error("Type mismatch on '{channel:?}': slot holds {expected:?}, host sent {received:?}")]
    TypeMismatch {
        channel: Channel,
        expected: ValueKind,
        received: ValueKind,
    },

    /// An indexed channel arrived without an index, or vice versa.
    #[error("Channel '{channel:?}' addressed with wrong index form")]
    BadIndex { channel: Channel },

    /// A wheel update beyond the currently configured wheel count.
    #[error("Wheel index {index} out of range (count {count})")]
    IndexOutOfRange { index: u32, count: usize },
}

/// The fixed slot set plus the wheel group.
#[derive(Debug, Default)]
pub struct FieldStore {
    world_placement: Slot<PlacementD>,
    speed: Slot<f32>,
    engine_rpm: Slot<f32>,
    engine_gear: Slot<i32>,
    effective_steering: Slot<f32>,
    effective_throttle: Slot<f32>,
    effective_brake: Slot<f32>,
    effective_clutch: Slot<f32>,
    local_linear_velocity: Slot<Vec3F>,
    local_angular_velocity: Slot<Vec3F>,
    local_linear_acceleration: Slot<Vec3F>,
    local_angular_acceleration: Slot<Vec3F>,
    cabin_angular_velocity: Slot<Vec3F>,
    cabin_angular_acceleration: Slot<Vec3F>,
    cabin_offset: Slot<PlacementF>,
    head_offset: Slot<PlacementF>,

    wheel_deflections: [f32; MAX_WHEEL_COUNT],
    wheel_count: usize,
}

impl FieldStore {
    /// Creates a store with every slot dead and zeroed. Slots come alive
    /// as their channel registrations succeed; wheels come alive through
    /// [`FieldStore::resize_wheels`] on configuration events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fixed channel's slot live after successful registration.
    /// Wheel liveness is tracked by the group size instead.
    pub fn set_live(&mut self, channel: Channel) {
        match channel {
            Channel::WorldPlacement => self.world_placement.live = true,
            Channel::Speed => self.speed.live = true,
            Channel::EngineRpm => self.engine_rpm.live = true,
            Channel::EngineGear => self.engine_gear.live = true,
            Channel::EffectiveSteering => self.effective_steering.live = true,
            Channel::EffectiveThrottle => self.effective_throttle.live = true,
            Channel::EffectiveBrake => self.effective_brake.live = true,
            Channel::EffectiveClutch => self.effective_clutch.live = true,
            Channel::LocalLinearVelocity => self.local_linear_velocity.live = true,
            Channel::LocalAngularVelocity => self.local_angular_velocity.live = true,
            Channel::LocalLinearAcceleration => self.local_linear_acceleration.live = true,
            Channel::LocalAngularAcceleration => self.local_angular_acceleration.live = true,
            Channel::CabinAngularVelocity => self.cabin_angular_velocity.live = true,
            Channel::CabinAngularAcceleration => self.cabin_angular_acceleration.live = true,
            Channel::CabinOffset => self.cabin_offset.live = true,
            Channel::HeadOffset => self.head_offset.live = true,
            Channel::WheelSuspDeflection => {}
        }
    }

    /// Writes a host-delivered value into the matching slot.
    ///
    /// `None` means the host reported the value absent; the slot resets to
    /// its zero value. A value of the wrong type is rejected and the slot
    /// keeps its previous contents.
    pub fn update(
        &mut self,
        channel: Channel,
        index: Option<u32>,
        value: Option<Value>,
    ) -> Result<(), UpdateError> {
        if channel.is_indexed() {
            let Some(index) = index else {
                return Err(UpdateError::BadIndex { channel });
            };
            return self.update_wheel(index, value);
        }
        if index.is_some() {
            return Err(UpdateError::BadIndex { channel });
        }

        match channel {
            Channel::WorldPlacement => {
                Self::write(&mut self.world_placement, channel, value, Value::as_placement_d)
            }
            Channel::Speed => Self::write(&mut self.speed, channel, value, Value::as_f32),
            Channel::EngineRpm => Self::write(&mut self.engine_rpm, channel, value, Value::as_f32),
            Channel::EngineGear => Self::write(&mut self.engine_gear, channel, value, Value::as_i32),
            Channel::EffectiveSteering => {
                Self::write(&mut self.effective_steering, channel, value, Value::as_f32)
            }
            Channel::EffectiveThrottle => {
                Self::write(&mut self.effective_throttle, channel, value, Value::as_f32)
            }
            Channel::EffectiveBrake => {
                Self::write(&mut self.effective_brake, channel, value, Value::as_f32)
            }
            Channel::EffectiveClutch => {
                Self::write(&mut self.effective_clutch, channel, value, Value::as_f32)
            }
            Channel::LocalLinearVelocity => {
                Self::write(&mut self.local_linear_velocity, channel, value, Value::as_vec3f)
            }
            Channel::LocalAngularVelocity => {
                Self::write(&mut self.local_angular_velocity, channel, value, Value::as_vec3f)
            }
            Channel::LocalLinearAcceleration => {
                Self::write(&mut self.local_linear_acceleration, channel, value, Value::as_vec3f)
            }
            Channel::LocalAngularAcceleration => {
                Self::write(&mut self.local_angular_acceleration, channel, value, Value::as_vec3f)
            }
            Channel::CabinAngularVelocity => {
                Self::write(&mut self.cabin_angular_velocity, channel, value, Value::as_vec3f)
            }
            Channel::CabinAngularAcceleration => {
                Self::write(&mut self.cabin_angular_acceleration, channel, value, Value::as_vec3f)
            }
            Channel::CabinOffset => {
                Self::write(&mut self.cabin_offset, channel, value, Value::as_placement_f)
            }
            Channel::HeadOffset => {
                Self::write(&mut self.head_offset, channel, value, Value::as_placement_f)
            }
            Channel::WheelSuspDeflection => unreachable!("handled above"),
        }
    }

    fn write<T: Copy + Default>(
        slot: &mut Slot<T>,
        channel: Channel,
        value: Option<Value>,
        decode: fn(&Value) -> Option<T>,
    ) -> Result<(), UpdateError> {
        match value {
            None => {
                slot.reset();
                Ok(())
            }
            Some(v) => match decode(&v) {
                Some(typed) => {
                    slot.set(typed);
                    Ok(())
                }
                None => Err(UpdateError::TypeMismatch {
                    channel,
                    expected: channel.kind(),
                    received: v.kind(),
                }),
            },
        }
    }

    fn update_wheel(&mut self, index: u32, value: Option<Value>) -> Result<(), UpdateError> {
        if index as usize >= self.wheel_count {
            return Err(UpdateError::IndexOutOfRange { index, count: self.wheel_count });
        }
        let deflection = match value {
            None => 0.0,
            Some(v) => v.as_f32().ok_or(UpdateError::TypeMismatch {
                channel: Channel::WheelSuspDeflection,
                expected: ValueKind::F32,
                received: v.kind(),
            })?,
        };
        self.wheel_deflections[index as usize] = deflection;
        Ok(())
    }

    /// Resizes the wheel group. Driven only by configuration events.
    ///
    /// Shrinking zeroes the vacated entries; growing zero-initializes the
    /// newly exposed ones, so no update can ever observe a stale reading.
    /// Sizes beyond [`MAX_WHEEL_COUNT`] are truncated.
    pub fn resize_wheels(&mut self, new_count: usize) {
        let new_count = new_count.min(MAX_WHEEL_COUNT);
        let low = new_count.min(self.wheel_count);
        for slot in &mut self.wheel_deflections[low..] {
            *slot = 0.0;
        }
        self.wheel_count = new_count;
    }

    pub fn wheel_count(&self) -> usize {
        self.wheel_count
    }

    /// The live wheel deflections, length equal to the configured count.
    pub fn wheel_deflections(&self) -> &[f32] {
        &self.wheel_deflections[..self.wheel_count]
    }

    pub fn world_placement(&self) -> Option<PlacementD> {
        self.world_placement.read()
    }

    pub fn speed(&self) -> Option<f32> {
        self.speed.read()
    }

    pub fn engine_rpm(&self) -> Option<f32> {
        self.engine_rpm.read()
    }

    pub fn engine_gear(&self) -> Option<i32> {
        self.engine_gear.read()
    }

    pub fn effective_steering(&self) -> Option<f32> {
        self.effective_steering.read()
    }

    pub fn effective_throttle(&self) -> Option<f32> {
        self.effective_throttle.read()
    }

    pub fn effective_brake(&self) -> Option<f32> {
        self.effective_brake.read()
    }

    pub fn effective_clutch(&self) -> Option<f32> {
        self.effective_clutch.read()
    }

    pub fn local_linear_velocity(&self) -> Option<Vec3F> {
        self.local_linear_velocity.read()
    }

    pub fn local_angular_velocity(&self) -> Option<Vec3F> {
        self.local_angular_velocity.read()
    }

    pub fn local_linear_acceleration(&self) -> Option<Vec3F> {
        self.local_linear_acceleration.read()
    }

    pub fn local_angular_acceleration(&self) -> Option<Vec3F> {
        self.local_angular_acceleration.read()
    }

    pub fn cabin_angular_velocity(&self) -> Option<Vec3F> {
        self.cabin_angular_velocity.read()
    }

    pub fn cabin_angular_acceleration(&self) -> Option<Vec3F> {
        self.cabin_angular_acceleration.read()
    }

    pub fn cabin_offset(&self) -> Option<PlacementF> {
        self.cabin_offset.read()
    }

    pub fn head_offset(&self) -> Option<PlacementF> {
        self.head_offset.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_store() -> FieldStore {
        let mut store = FieldStore::new();
        for channel in Channel::ALL {
            store.set_live(channel);
        }
        store
    }

    #[test]
    fn dead_slot_reads_absent_even_after_write() {
        let mut store = FieldStore::new();
        store.update(Channel::Speed, None, Some(Value::F32(10.0))).unwrap();
        assert_eq!(store.speed(), None);
    }

    #[test]
    fn mismatched_write_keeps_previous_value() {
        let mut store = live_store();
        store.update(Channel::EngineGear, None, Some(Value::I32(3))).unwrap();
        let rejected = store.update(Channel::EngineGear, None, Some(Value::U32(4)));
        assert!(matches!(rejected, Err(UpdateError::TypeMismatch { .. })));
        assert_eq!(store.engine_gear(), Some(3));
    }

    #[test]
    fn index_on_plain_channel_is_rejected() {
        let mut store = live_store();
        let rejected = store.update(Channel::Speed, Some(0), Some(Value::F32(1.0)));
        assert!(matches!(rejected, Err(UpdateError::BadIndex { .. })));
    }

    #[test]
    fn resize_exposes_only_zeroed_entries() {
        let mut store = live_store();
        store.resize_wheels(4);
        store.update(Channel::WheelSuspDeflection, Some(3), Some(Value::F32(0.5))).unwrap();

        store.resize_wheels(2);
        assert_eq!(store.wheel_deflections(), &[0.0, 0.0]);

        // Regrow past the previously written entry: it was zeroed.
        store.resize_wheels(6);
        assert_eq!(store.wheel_deflections(), &[0.0; 6]);
        assert_eq!(store.wheel_deflections().len(), 6);
    }

    #[test]
    fn resize_truncates_at_capacity() {
        let mut store = live_store();
        store.resize_wheels(12);
        assert_eq!(store.wheel_count(), MAX_WHEEL_COUNT);
    }

    #[test]
    fn wheel_write_beyond_count_is_rejected() {
        let mut store = live_store();
        store.resize_wheels(2);
        let rejected = store.update(Channel::WheelSuspDeflection, Some(2), Some(Value::F32(0.1)));
        assert!(matches!(rejected, Err(UpdateError::IndexOutOfRange { .. })));
    }
}
