//! Protocol constants and capacity limits.

/// Maximum number of wheels the bridge tracks. Vehicles reporting more
/// wheels have the excess silently truncated.
pub const MAX_WHEEL_COUNT: usize = 8;

/// Wire protocol version carried in every envelope.
/// Major version in the high byte, minor in the low byte.
pub const PROTOCOL_VERSION: u16 = 0x0100;

/// Extracts the major version from a packed protocol version.
pub const fn protocol_major(version: u16) -> u8 {
    (version >> 8) as u8
}
