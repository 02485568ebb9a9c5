//! Vehicle configuration events.
//!
//! Configuration arrives as a named attribute list. Only the truck
//! configuration is consumed; its attributes size the wheel group and
//! supply the static offsets used for derived positions. None of this is
//! on the per-frame hot path.

use roadcast_types::constants::MAX_WHEEL_COUNT;
use roadcast_types::{Value, ValueKind, Vec3F};

use crate::host::{LogLevel, LogSink};

/// Identifier of the configuration event the bridge consumes.
pub const TRUCK_CONFIG_ID: &str = "truck";

const ATTR_WHEEL_COUNT: &str = "wheels.count";
const ATTR_CABIN_POSITION: &str = "cabin.position";
const ATTR_HEAD_POSITION: &str = "head.position";

/// One attribute of a configuration event.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedAttribute {
    pub name: String,
    pub index: Option<u32>,
    pub value: Value,
}

/// A configuration event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEvent {
    pub id: String,
    pub attributes: Vec<NamedAttribute>,
}

/// Parsed truck configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleConfig {
    /// Number of wheels, already truncated to [`MAX_WHEEL_COUNT`].
    pub wheel_count: u32,
    /// Position of the cabin joint in vehicle space.
    pub cabin_position: Vec3F,
    /// Base position of the head in cabin space.
    pub head_position: Vec3F,
}

impl VehicleConfig {
    /// Parses a configuration event. Returns `None` for configurations
    /// other than the truck's; those are not tracked.
    pub fn from_event(event: &ConfigEvent, log: &dyn LogSink) -> Option<Self> {
        if event.id != TRUCK_CONFIG_ID {
            return None;
        }

        let wheel_count = find_attribute(event, ATTR_WHEEL_COUNT, ValueKind::U32, log)
            .and_then(Value::as_u32)
            .unwrap_or(0)
            .min(MAX_WHEEL_COUNT as u32);

        // Vehicles without a separate cabin report no cabin position.
        let cabin_position = find_attribute(event, ATTR_CABIN_POSITION, ValueKind::Vec3F, log)
            .and_then(Value::as_vec3f)
            .unwrap_or(Vec3F::ZERO);

        let head_position = match find_attribute(event, ATTR_HEAD_POSITION, ValueKind::Vec3F, log)
            .and_then(Value::as_vec3f)
        {
            Some(position) => position,
            None => {
                log.log(LogLevel::Warning, "Head position unavailable");
                Vec3F::ZERO
            }
        };

        Some(Self { wheel_count, cabin_position, head_position })
    }
}

/// Finds an un-indexed attribute of the expected type. A present attribute
/// of the wrong type is logged and treated as missing.
fn find_attribute<'a>(
    event: &'a ConfigEvent,
    name: &str,
    expected: ValueKind,
    log: &dyn LogSink,
) -> Option<&'a Value> {
    let attribute = event
        .attributes
        .iter()
        .find(|attr| attr.index.is_none() && attr.name == name)?;
    if attribute.value.kind() != expected {
        log.log(
            LogLevel::Error,
            &format!(
                "Attribute '{name}' has unexpected type {:?}",
                attribute.value.kind()
            ),
        );
        return None;
    }
    Some(&attribute.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullLog;

    impl LogSink for NullLog {
        fn log(&self, _level: LogLevel, _message: &str) {}
    }

    fn truck_event(attributes: Vec<NamedAttribute>) -> ConfigEvent {
        ConfigEvent { id: TRUCK_CONFIG_ID.to_string(), attributes }
    }

    fn attr(name: &str, value: Value) -> NamedAttribute {
        NamedAttribute { name: name.to_string(), index: None, value }
    }

    #[test]
    fn parses_truck_attributes() {
        let event = truck_event(vec![
            attr(ATTR_WHEEL_COUNT, Value::U32(6)),
            attr(ATTR_CABIN_POSITION, Value::Vec3F(Vec3F::new(0.0, 1.5, 2.0))),
            attr(ATTR_HEAD_POSITION, Value::Vec3F(Vec3F::new(-0.6, 1.0, 0.0))),
        ]);
        let config = VehicleConfig::from_event(&event, &NullLog).unwrap();
        assert_eq!(config.wheel_count, 6);
        assert_eq!(config.cabin_position, Vec3F::new(0.0, 1.5, 2.0));
    }

    #[test]
    fn truncates_excess_wheels() {
        let event = truck_event(vec![attr(ATTR_WHEEL_COUNT, Value::U32(12))]);
        let config = VehicleConfig::from_event(&event, &NullLog).unwrap();
        assert_eq!(config.wheel_count, MAX_WHEEL_COUNT as u32);
    }

    #[test]
    fn ignores_foreign_configurations() {
        let event = ConfigEvent { id: "trailer".to_string(), attributes: vec![] };
        assert!(VehicleConfig::from_event(&event, &NullLog).is_none());
    }

    #[test]
    fn wrong_typed_attribute_treated_as_missing() {
        let event = truck_event(vec![attr(ATTR_WHEEL_COUNT, Value::F32(6.0))]);
        let config = VehicleConfig::from_event(&event, &NullLog).unwrap();
        assert_eq!(config.wheel_count, 0);
    }
}
