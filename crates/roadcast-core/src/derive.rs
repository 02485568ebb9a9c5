//! Derived positions.
//!
//! The head's world-space position is not a host channel; it is computed
//! from the truck placement, the cabin/head offset channels, and the static
//! cabin/head positions delivered with the vehicle configuration.
//!
//! The value corresponds to simulation steps directly — no interpolation
//! between neighbouring steps the way a renderer would.

use std::f32::consts::TAU;

use roadcast_types::{Euler, PlacementD, PlacementF, Vec3D, Vec3F};

use crate::config::VehicleConfig;

/// Rotates `vector` by `orientation`: roll around Z, then pitch around X,
/// then heading around Y. Angles are unit-circle fractions.
fn rotate(orientation: &Euler, vector: Vec3F) -> Vec3F {
    let heading = orientation.heading * TAU;
    let pitch = orientation.pitch * TAU;
    let roll = orientation.roll * TAU;

    let (sin_heading, cos_heading) = heading.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let (sin_roll, cos_roll) = roll.sin_cos();

    let post_roll_x = vector.x * cos_roll - vector.y * sin_roll;
    let post_roll_y = vector.x * sin_roll + vector.y * cos_roll;
    let post_roll_z = vector.z;

    let post_pitch_x = post_roll_x;
    let post_pitch_y = post_roll_y * cos_pitch - post_roll_z * sin_pitch;
    let post_pitch_z = post_roll_y * sin_pitch + post_roll_z * cos_pitch;

    Vec3F {
        x: post_pitch_x * cos_heading + post_pitch_z * sin_heading,
        y: post_pitch_y,
        z: -post_pitch_x * sin_heading + post_pitch_z * cos_heading,
    }
}

fn add_f(first: Vec3F, second: Vec3F) -> Vec3F {
    Vec3F::new(first.x + second.x, first.y + second.y, first.z + second.z)
}

fn add_df(first: Vec3D, second: Vec3F) -> Vec3D {
    Vec3D::new(
        first.x + f64::from(second.x),
        first.y + f64::from(second.y),
        first.z + f64::from(second.z),
    )
}

/// World-space position of the driver's head.
///
/// head-in-cabin = head_position + head_offset.position;
/// head-in-vehicle = cabin_position + cabin_offset.position
///                   + rotate(cabin_offset.orientation, head-in-cabin);
/// head-in-world = placement.position
///                 + rotate(placement.orientation, head-in-vehicle).
pub fn head_world_position(
    placement: &PlacementD,
    cabin_offset: &PlacementF,
    head_offset: &PlacementF,
    config: &VehicleConfig,
) -> Vec3D {
    let head_in_cabin = add_f(config.head_position, head_offset.position);
    let head_in_vehicle = add_f(
        add_f(config.cabin_position, cabin_offset.position),
        rotate(&cabin_offset.orientation, head_in_cabin),
    );
    add_df(
        placement.position,
        rotate(&placement.orientation, head_in_vehicle),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_heading_swaps_axes() {
        let orientation = Euler::new(0.25, 0.0, 0.0);
        let rotated = rotate(&orientation, Vec3F::new(0.0, 0.0, 1.0));
        assert!((rotated.x - 1.0).abs() < 1e-6);
        assert!(rotated.y.abs() < 1e-6);
        assert!(rotated.z.abs() < 1e-6);
    }

    #[test]
    fn identity_orientation_translates_only() {
        let config = VehicleConfig {
            wheel_count: 4,
            cabin_position: Vec3F::new(0.0, 2.0, 1.0),
            head_position: Vec3F::new(-0.5, 1.0, 0.0),
        };
        let placement = PlacementD {
            position: Vec3D::new(100.0, 10.0, -50.0),
            orientation: Euler::ZERO,
        };
        let head = head_world_position(
            &placement,
            &PlacementF::ZERO,
            &PlacementF::ZERO,
            &config,
        );
        assert!((head.x - 99.5).abs() < 1e-5);
        assert!((head.y - 13.0).abs() < 1e-5);
        assert!((head.z - (-49.0)).abs() < 1e-5);
    }
}
