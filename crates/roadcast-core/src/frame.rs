//! Frame timing and the per-frame snapshot.

use serde::{Deserialize, Serialize};

use roadcast_types::{PlacementD, PlacementF, Vec3D, Vec3F};

use crate::config::VehicleConfig;
use crate::derive;
use crate::store::FieldStore;

/// Timing metadata delivered at each frame-start boundary.
///
/// Three independent microsecond counters: `simulation_time` advances only
/// while running, `paused_simulation_time` only while paused, `render_time`
/// follows the render clock. None is derived from another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTiming {
    pub simulation_time: u64,
    pub paused_simulation_time: u64,
    pub render_time: u64,
}

/// An immutable, self-consistent copy of the field store at one frame
/// boundary. Produced exactly once per frame while running, handed straight
/// to the transport, and superseded by the next frame — never retained.
///
/// `None` fields belong to channels whose registration failed in this
/// session; a live channel the host zeroed reports `Some(0)` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
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

    /// World-space head position, derived from the placement, the cabin and
    /// head offset channels, and the configured static offsets. Present only
    /// when the placement channel is live and a configuration has arrived.
    pub head_world_position: Option<Vec3D>,

    /// Per-wheel suspension deflections, length equal to the configured
    /// wheel count.
    pub wheel_deflections: Vec<f32>,
}

impl FrameSnapshot {
    /// Materializes the store contents plus timing into one snapshot.
    pub fn assemble(
        store: &FieldStore,
        timing: FrameTiming,
        config: Option<&VehicleConfig>,
    ) -> Self {
        let head_world_position = match (store.world_placement(), config) {
            (Some(placement), Some(cfg)) => Some(derive::head_world_position(
                &placement,
                &store.cabin_offset().unwrap_or(PlacementF::ZERO),
                &store.head_offset().unwrap_or(PlacementF::ZERO),
                cfg,
            )),
            _ => None,
        };

        Self {
            timing,
            world_placement: store.world_placement(),
            speed: store.speed(),
            engine_rpm: store.engine_rpm(),
            engine_gear: store.engine_gear(),
            effective_steering: store.effective_steering(),
            effective_throttle: store.effective_throttle(),
            effective_brake: store.effective_brake(),
            effective_clutch: store.effective_clutch(),
            local_linear_velocity: store.local_linear_velocity(),
            local_angular_velocity: store.local_angular_velocity(),
            local_linear_acceleration: store.local_linear_acceleration(),
            local_angular_acceleration: store.local_angular_acceleration(),
            cabin_angular_velocity: store.cabin_angular_velocity(),
            cabin_angular_acceleration: store.cabin_angular_acceleration(),
            cabin_offset: store.cabin_offset(),
            head_offset: store.head_offset(),
            head_world_position,
            wheel_deflections: store.wheel_deflections().to_vec(),
        }
    }
}
