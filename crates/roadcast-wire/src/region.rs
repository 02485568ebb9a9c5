//! Packed shared-region layout.
//!
//! The poll transport overwrites one fixed-size record in place; consumers
//! map the same region and read at their own cadence. The layout is
//! little-endian, explicitly offset, with no implicit padding, and must
//! stay byte-for-byte stable within a protocol major version — the offset
//! constants below are the contract, and the tests pin them.
//!
//! Readers may observe a torn record (fields from two generations). That
//! is accepted: a consumer polling live telemetry tolerates a single-frame
//! inconsistency, and the next read supersedes it.

use roadcast_core::config::VehicleConfig;
use roadcast_core::frame::FrameSnapshot;
use roadcast_types::constants::MAX_WHEEL_COUNT;
use roadcast_types::{Euler, PlacementD, RoadcastError, RoadcastResult, Vec3D, Vec3F};

/// Identifies a Roadcast region. First bytes of every region.
pub const REGION_MAGIC: u32 = 0x5243_5431; // "RCT1"

pub const OFF_MAGIC: usize = 0;
pub const OFF_RUNNING: usize = 4;
pub const OFF_PLACEMENT: usize = 5; // x,y,z f64; heading,pitch,roll f32
pub const OFF_SPEED: usize = 41;
pub const OFF_ENGINE_RPM: usize = 45;
pub const OFF_ENGINE_GEAR: usize = 49;
pub const OFF_STEERING: usize = 53;
pub const OFF_THROTTLE: usize = 57;
pub const OFF_BRAKE: usize = 61;
pub const OFF_CLUTCH: usize = 65;
pub const OFF_LINEAR_VELOCITY: usize = 69;
pub const OFF_ANGULAR_VELOCITY: usize = 81;
pub const OFF_LINEAR_ACCELERATION: usize = 93;
pub const OFF_ANGULAR_ACCELERATION: usize = 105;
pub const OFF_CABIN_ANGULAR_VELOCITY: usize = 117;
pub const OFF_CABIN_ANGULAR_ACCELERATION: usize = 129;
pub const OFF_WHEEL_COUNT: usize = 141;
pub const OFF_WHEEL_DEFLECTIONS: usize = 145;

/// Total record size in bytes.
pub const REGION_SIZE: usize = OFF_WHEEL_DEFLECTIONS + MAX_WHEEL_COUNT * 4;

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f64(buf: &mut [u8], offset: usize, value: f64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

fn put_vec3f(buf: &mut [u8], offset: usize, value: Vec3F) {
    put_f32(buf, offset, value.x);
    put_f32(buf, offset + 4, value.y);
    put_f32(buf, offset + 8, value.z);
}

fn get_u32(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn get_i32(buf: &[u8], offset: usize) -> i32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    i32::from_le_bytes(bytes)
}

fn get_f32(buf: &[u8], offset: usize) -> f32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    f32::from_le_bytes(bytes)
}

fn get_f64(buf: &[u8], offset: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    f64::from_le_bytes(bytes)
}

fn get_vec3f(buf: &[u8], offset: usize) -> Vec3F {
    Vec3F::new(get_f32(buf, offset), get_f32(buf, offset + 4), get_f32(buf, offset + 8))
}

/// Initializes a freshly created region: zeroed, magic written, not
/// running, no wheels until a configuration arrives.
pub fn init(buf: &mut [u8]) {
    debug_assert!(buf.len() >= REGION_SIZE);
    buf[..REGION_SIZE].fill(0);
    put_u32(buf, OFF_MAGIC, REGION_MAGIC);
}

/// Flips the running flag. A single-byte write, so never torn.
pub fn write_running(buf: &mut [u8], running: bool) {
    debug_assert!(buf.len() >= REGION_SIZE);
    buf[OFF_RUNNING] = u8::from(running);
}

/// Applies a configuration: updates the wheel count and zeroes the
/// deflection entries beyond it.
pub fn write_config(buf: &mut [u8], config: &VehicleConfig) {
    debug_assert!(buf.len() >= REGION_SIZE);
    let count = (config.wheel_count as usize).min(MAX_WHEEL_COUNT);
    put_u32(buf, OFF_WHEEL_COUNT, count as u32);
    for index in count..MAX_WHEEL_COUNT {
        put_f32(buf, OFF_WHEEL_DEFLECTIONS + index * 4, 0.0);
    }
}

/// Overwrites the telemetry fields in place with one frame's values.
/// Dead channels write their zero value; the region format has no notion
/// of absence. The running flag is left untouched.
pub fn write_frame(buf: &mut [u8], snapshot: &FrameSnapshot) {
    debug_assert!(buf.len() >= REGION_SIZE);

    let placement = snapshot.world_placement.unwrap_or(PlacementD::ZERO);
    put_f64(buf, OFF_PLACEMENT, placement.position.x);
    put_f64(buf, OFF_PLACEMENT + 8, placement.position.y);
    put_f64(buf, OFF_PLACEMENT + 16, placement.position.z);
    put_f32(buf, OFF_PLACEMENT + 24, placement.orientation.heading);
    put_f32(buf, OFF_PLACEMENT + 28, placement.orientation.pitch);
    put_f32(buf, OFF_PLACEMENT + 32, placement.orientation.roll);

    put_f32(buf, OFF_SPEED, snapshot.speed.unwrap_or(0.0));
    put_f32(buf, OFF_ENGINE_RPM, snapshot.engine_rpm.unwrap_or(0.0));
    put_i32(buf, OFF_ENGINE_GEAR, snapshot.engine_gear.unwrap_or(0));
    put_f32(buf, OFF_STEERING, snapshot.effective_steering.unwrap_or(0.0));
    put_f32(buf, OFF_THROTTLE, snapshot.effective_throttle.unwrap_or(0.0));
    put_f32(buf, OFF_BRAKE, snapshot.effective_brake.unwrap_or(0.0));
    put_f32(buf, OFF_CLUTCH, snapshot.effective_clutch.unwrap_or(0.0));

    put_vec3f(buf, OFF_LINEAR_VELOCITY, snapshot.local_linear_velocity.unwrap_or(Vec3F::ZERO));
    put_vec3f(buf, OFF_ANGULAR_VELOCITY, snapshot.local_angular_velocity.unwrap_or(Vec3F::ZERO));
    put_vec3f(
        buf,
        OFF_LINEAR_ACCELERATION,
        snapshot.local_linear_acceleration.unwrap_or(Vec3F::ZERO),
    );
    put_vec3f(
        buf,
        OFF_ANGULAR_ACCELERATION,
        snapshot.local_angular_acceleration.unwrap_or(Vec3F::ZERO),
    );
    put_vec3f(
        buf,
        OFF_CABIN_ANGULAR_VELOCITY,
        snapshot.cabin_angular_velocity.unwrap_or(Vec3F::ZERO),
    );
    put_vec3f(
        buf,
        OFF_CABIN_ANGULAR_ACCELERATION,
        snapshot.cabin_angular_acceleration.unwrap_or(Vec3F::ZERO),
    );

    let count = snapshot.wheel_deflections.len().min(MAX_WHEEL_COUNT);
    put_u32(buf, OFF_WHEEL_COUNT, count as u32);
    for (index, deflection) in snapshot.wheel_deflections.iter().take(count).enumerate() {
        put_f32(buf, OFF_WHEEL_DEFLECTIONS + index * 4, *deflection);
    }
}

/// A decoded region record, as a consumer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionImage {
    pub running: bool,
    pub world_placement: PlacementD,
    pub speed: f32,
    pub engine_rpm: f32,
    pub engine_gear: i32,
    pub effective_steering: f32,
    pub effective_throttle: f32,
    pub effective_brake: f32,
    pub effective_clutch: f32,
    pub local_linear_velocity: Vec3F,
    pub local_angular_velocity: Vec3F,
    pub local_linear_acceleration: Vec3F,
    pub local_angular_acceleration: Vec3F,
    pub cabin_angular_velocity: Vec3F,
    pub cabin_angular_acceleration: Vec3F,
    pub wheel_deflections: Vec<f32>,
}

/// Decodes a region record, validating size and magic.
pub fn read(buf: &[u8]) -> RoadcastResult<RegionImage> {
    if buf.len() < REGION_SIZE {
        return Err(RoadcastError::InvalidRegion(format!(
            "region too small: {} bytes, expected {REGION_SIZE}",
            buf.len()
        )));
    }
    if get_u32(buf, OFF_MAGIC) != REGION_MAGIC {
        return Err(RoadcastError::InvalidRegion("bad magic".to_string()));
    }

    let wheel_count = (get_u32(buf, OFF_WHEEL_COUNT) as usize).min(MAX_WHEEL_COUNT);
    let wheel_deflections = (0..wheel_count)
        .map(|index| get_f32(buf, OFF_WHEEL_DEFLECTIONS + index * 4))
        .collect();

    Ok(RegionImage {
        running: buf[OFF_RUNNING] != 0,
        world_placement: PlacementD {
            position: Vec3D::new(
                get_f64(buf, OFF_PLACEMENT),
                get_f64(buf, OFF_PLACEMENT + 8),
                get_f64(buf, OFF_PLACEMENT + 16),
            ),
            orientation: Euler::new(
                get_f32(buf, OFF_PLACEMENT + 24),
                get_f32(buf, OFF_PLACEMENT + 28),
                get_f32(buf, OFF_PLACEMENT + 32),
            ),
        },
        speed: get_f32(buf, OFF_SPEED),
        engine_rpm: get_f32(buf, OFF_ENGINE_RPM),
        engine_gear: get_i32(buf, OFF_ENGINE_GEAR),
        effective_steering: get_f32(buf, OFF_STEERING),
        effective_throttle: get_f32(buf, OFF_THROTTLE),
        effective_brake: get_f32(buf, OFF_BRAKE),
        effective_clutch: get_f32(buf, OFF_CLUTCH),
        local_linear_velocity: get_vec3f(buf, OFF_LINEAR_VELOCITY),
        local_angular_velocity: get_vec3f(buf, OFF_ANGULAR_VELOCITY),
        local_linear_acceleration: get_vec3f(buf, OFF_LINEAR_ACCELERATION),
        local_angular_acceleration: get_vec3f(buf, OFF_ANGULAR_ACCELERATION),
        cabin_angular_velocity: get_vec3f(buf, OFF_CABIN_ANGULAR_VELOCITY),
        cabin_angular_acceleration: get_vec3f(buf, OFF_CABIN_ANGULAR_ACCELERATION),
        wheel_deflections,
    })
}
