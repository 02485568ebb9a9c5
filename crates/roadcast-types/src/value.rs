//! Telemetry value types.
//!
//! The host delivers every field update as a tagged union. Roadcast decodes
//! it once, at the field-store boundary, into the slot's declared type —
//! a mismatched tag is rejected there and never propagates further.

use serde::{Deserialize, Serialize};

/// 3-vector with f32 components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3F {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 3-vector with f64 components. Used by channels whose precision class
/// is double (e.g. the world placement position).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Euler orientation in unit-circle fractions, not radians.
/// A heading of 0.25 is a quarter turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Euler {
    pub const ZERO: Self = Self { heading: 0.0, pitch: 0.0, roll: 0.0 };

    pub fn new(heading: f32, pitch: f32, roll: f32) -> Self {
        Self { heading, pitch, roll }
    }
}

/// Position + orientation with f32 position precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementF {
    pub position: Vec3F,
    pub orientation: Euler,
}

impl PlacementF {
    pub const ZERO: Self = Self { position: Vec3F::ZERO, orientation: Euler::ZERO };
}

/// Position + orientation with f64 position precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementD {
    pub position: Vec3D,
    pub orientation: Euler,
}

impl PlacementD {
    pub const ZERO: Self = Self { position: Vec3D::ZERO, orientation: Euler::ZERO };
}

/// A single telemetry value as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Vec3F(Vec3F),
    Vec3D(Vec3D),
    Euler(Euler),
    PlacementF(PlacementF),
    PlacementD(PlacementD),
    Str(String),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::I32(_) => ValueKind::I32,
            Value::U32(_) => ValueKind::U32,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Vec3F(_) => ValueKind::Vec3F,
            Value::Vec3D(_) => ValueKind::Vec3D,
            Value::Euler(_) => ValueKind::Euler,
            Value::PlacementF(_) => ValueKind::PlacementF,
            Value::PlacementD(_) => ValueKind::PlacementD,
            Value::Str(_) => ValueKind::Str,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3f(&self) -> Option<Vec3F> {
        match self {
            Value::Vec3F(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_placement_f(&self) -> Option<PlacementF> {
        match self {
            Value::PlacementF(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_placement_d(&self) -> Option<PlacementD> {
        match self {
            Value::PlacementD(v) => Some(*v),
            _ => None,
        }
    }
}

/// Value kind tags, used when declaring a channel's type at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    I32,
    U32,
    F32,
    F64,
    Vec3F,
    Vec3D,
    Euler,
    PlacementF,
    PlacementD,
    Str,
}
