//! Host SDK capabilities and the startup compatibility gate.
//!
//! The host hands the bridge two capabilities at initialization: a
//! registrar for event/channel subscriptions and a log sink. Both are
//! traits so tests can drive the bridge without a live host.

use roadcast_types::{Channel, RoadcastError, RoadcastResult, ValueKind};

/// Severity levels of the host's log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Message,
}

/// The host's logging capability. All telemetry failures surface here and
/// nowhere else; the simulation loop is never interrupted.
pub trait LogSink {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards host-sink messages to the `tracing` crate. Useful when the
/// bridge is embedded in a process that owns its own subscriber.
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Message => tracing::info!("{message}"),
        }
    }
}

/// Lifecycle events the bridge subscribes to. All five are required;
/// failing to register any of them aborts initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Configuration,
    Started,
    Paused,
    FrameStart,
    FrameEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Configuration,
        EventKind::Started,
        EventKind::Paused,
        EventKind::FrameStart,
        EventKind::FrameEnd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Configuration => "configuration",
            EventKind::Started => "started",
            EventKind::Paused => "paused",
            EventKind::FrameStart => "frame-start",
            EventKind::FrameEnd => "frame-end",
        }
    }
}

/// Why a registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// The channel does not exist in this host version.
    NotFound,
    /// The channel exists but not with the requested value type.
    UnsupportedType,
    /// Any other host-side refusal.
    Refused,
}

/// The host's registration capability.
///
/// Registrations made here outlive initialization: the bridge keeps the
/// registrar to add and remove wheel channels when the configuration
/// changes.
pub trait HostRegistrar {
    fn register_event(&mut self, event: EventKind) -> Result<(), RegisterError>;

    fn register_channel(
        &mut self,
        channel: Channel,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<(), RegisterError>;

    fn unregister_channel(&mut self, channel: Channel, index: Option<u32>, kind: ValueKind);
}

/// Version descriptor the host presents at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Stable application identifier, e.g. `trucksim.eu`.
    pub app_id: String,
    /// Packed version: major in the high 16 bits, minor in the low 16.
    pub version: u32,
}

impl HostInfo {
    pub fn new(app_id: impl Into<String>, major: u16, minor: u16) -> Self {
        Self {
            app_id: app_id.into(),
            version: (u32::from(major) << 16) | u32::from(minor),
        }
    }

    pub fn major(&self) -> u16 {
        (self.version >> 16) as u16
    }

    pub fn minor(&self) -> u16 {
        (self.version & 0xFFFF) as u16
    }
}

/// A host application this build knows how to talk to.
struct KnownApp {
    id: &'static str,
    /// Oldest version whose channel set matches this build.
    minimal: u32,
    /// Version this build was written against.
    implemented: u32,
}

const fn packed(major: u16, minor: u16) -> u32 {
    ((major as u32) << 16) | minor as u32
}

const KNOWN_APPS: [KnownApp; 2] = [
    KnownApp { id: "trucksim.eu", minimal: packed(1, 3), implemented: packed(1, 14) },
    KnownApp { id: "trucksim.us", minimal: packed(1, 0), implemented: packed(1, 1) },
];

/// Validates the host's version descriptor.
///
/// Known application older than the minimum: hard error, initialization
/// aborts and nothing is registered. Newer major than implemented: warning,
/// some channels may misbehave. Unknown application: warning, continue.
pub fn check_compatibility(info: &HostInfo, log: &dyn LogSink) -> RoadcastResult<()> {
    let Some(app) = KNOWN_APPS.iter().find(|app| app.id == info.app_id) else {
        log.log(
            LogLevel::Warning,
            &format!("Unsupported application '{}', some channels may be missing", info.app_id),
        );
        return Ok(());
    };

    if info.version < app.minimal {
        let message = format!(
            "Incompatible (old) version of '{}': found {}.{}, need at least {}.{}",
            app.id,
            info.major(),
            info.minor(),
            (app.minimal >> 16),
            (app.minimal & 0xFFFF),
        );
        log.log(LogLevel::Error, &message);
        return Err(RoadcastError::Incompatible(message));
    }

    if info.major() > (app.implemented >> 16) as u16 {
        log.log(
            LogLevel::Warning,
            &format!(
                "Newer major version of '{}' than implemented, some channels may misbehave",
                app.id
            ),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct NullLog;

    impl LogSink for NullLog {
        fn log(&self, _level: LogLevel, _message: &str) {}
    }

    struct CountingLog {
        warnings: RefCell<u32>,
    }

    impl LogSink for CountingLog {
        fn log(&self, level: LogLevel, _message: &str) {
            if level == LogLevel::Warning {
                *self.warnings.borrow_mut() += 1;
            }
        }
    }

    #[test]
    fn known_app_current_version_passes() {
        let info = HostInfo::new("trucksim.eu", 1, 14);
        assert!(check_compatibility(&info, &NullLog).is_ok());
    }

    #[test]
    fn known_app_too_old_is_rejected() {
        let info = HostInfo::new("trucksim.eu", 1, 2);
        assert!(matches!(
            check_compatibility(&info, &NullLog),
            Err(RoadcastError::Incompatible(_))
        ));
    }

    #[test]
    fn newer_major_warns_but_passes() {
        let log = CountingLog { warnings: RefCell::new(0) };
        let info = HostInfo::new("trucksim.us", 2, 0);
        assert!(check_compatibility(&info, &log).is_ok());
        assert_eq!(*log.warnings.borrow(), 1);
    }

    #[test]
    fn unknown_app_warns_but_passes() {
        let log = CountingLog { warnings: RefCell::new(0) };
        let info = HostInfo::new("boatsim", 1, 0);
        assert!(check_compatibility(&info, &log).is_ok());
        assert_eq!(*log.warnings.borrow(), 1);
    }
}
