//! Integration tests for roadcast-types.

use roadcast_types::constants::{protocol_major, PROTOCOL_VERSION};
use roadcast_types::{Channel, Euler, PlacementD, Value, ValueKind, Vec3D, Vec3F};

#[test]
fn every_channel_name_round_trips() {
    for channel in Channel::ALL {
        assert_eq!(Channel::from_name(channel.name()), Some(channel));
    }
}

#[test]
fn unknown_names_are_not_tracked() {
    assert_eq!(Channel::from_name("truck.navigation.speed.limit"), None);
    assert_eq!(Channel::from_name(""), None);
}

#[test]
fn channel_kinds_match_their_slots() {
    assert_eq!(Channel::WorldPlacement.kind(), ValueKind::PlacementD);
    assert_eq!(Channel::Speed.kind(), ValueKind::F32);
    assert_eq!(Channel::EngineGear.kind(), ValueKind::I32);
    assert_eq!(Channel::LocalLinearVelocity.kind(), ValueKind::Vec3F);
    assert_eq!(Channel::CabinOffset.kind(), ValueKind::PlacementF);
}

#[test]
fn only_wheel_deflection_is_indexed() {
    for channel in Channel::ALL {
        assert_eq!(channel.is_indexed(), channel == Channel::WheelSuspDeflection);
    }
}

#[test]
fn value_kind_tags_match_variants() {
    assert_eq!(Value::F32(1.0).kind(), ValueKind::F32);
    assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
    assert_eq!(Value::Vec3D(Vec3D::ZERO).kind(), ValueKind::Vec3D);
    assert_eq!(Value::PlacementD(PlacementD::ZERO).kind(), ValueKind::PlacementD);
    assert_eq!(Value::Str("depot".to_string()).kind(), ValueKind::Str);
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(Value::F32(2.5).as_f32(), Some(2.5));
    assert_eq!(Value::F64(2.5).as_f32(), None);
    assert_eq!(Value::U32(4).as_u32(), Some(4));
    assert_eq!(Value::I32(4).as_u32(), None);
    assert_eq!(Value::Vec3F(Vec3F::new(1.0, 2.0, 3.0)).as_vec3f(), Some(Vec3F::new(1.0, 2.0, 3.0)));
    assert_eq!(Value::Euler(Euler::ZERO).as_vec3f(), None);
}

#[test]
fn zero_constants_match_defaults() {
    assert_eq!(Vec3F::ZERO, Vec3F::default());
    assert_eq!(Vec3D::ZERO, Vec3D::default());
    assert_eq!(Euler::ZERO, Euler::default());
    assert_eq!(PlacementD::ZERO, PlacementD::default());
}

#[test]
fn protocol_version_unpacks() {
    assert_eq!(protocol_major(PROTOCOL_VERSION), 1);
    assert_eq!(protocol_major(0x0207), 2);
}

#[test]
fn values_survive_serde() {
    let value = Value::PlacementD(PlacementD {
        position: Vec3D::new(1.0, 2.0, 3.0),
        orientation: Euler::new(0.5, 0.0, -0.25),
    });
    let json = serde_json::to_string(&value).unwrap();
    let recovered: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, value);
}
