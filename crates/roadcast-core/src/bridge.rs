//! The telemetry bridge — one owned producer instance per host session.
//!
//! The host constructs it at initialization, feeds it every lifecycle and
//! field-update callback, and destroys it at shutdown. There is no global
//! state: the callback context is the bridge itself.
//!
//! Runtime failures are logged through the host sink and swallowed; a
//! telemetry problem never interrupts or slows the simulation loop.

use roadcast_types::{Channel, RoadcastError, RoadcastResult, Value, ValueKind};

use crate::config::{ConfigEvent, VehicleConfig};
use crate::frame::{FrameSnapshot, FrameTiming};
use crate::host::{check_compatibility, EventKind, HostInfo, HostRegistrar, LogLevel, LogSink};
use crate::state::RunState;
use crate::store::FieldStore;
use crate::transport::{LifecycleEvent, Transport};

/// A host lifecycle callback, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Configuration(ConfigEvent),
    Started,
    Paused,
    FrameStart(FrameTiming),
    FrameEnd,
}

/// The producer. Owns the field store, the run state, and the transport.
pub struct TelemetryBridge<T: Transport> {
    store: FieldStore,
    run_state: RunState,
    timing: FrameTiming,
    vehicle: Option<VehicleConfig>,
    transport: T,
    registrar: Box<dyn HostRegistrar>,
    log: Box<dyn LogSink>,
}

impl<T: Transport> TelemetryBridge<T> {
    /// Initializes the bridge: validates the host version, registers every
    /// required event and all fixed channels, and announces itself on the
    /// transport.
    ///
    /// Aborts (registering nothing further) on an incompatible host or a
    /// failed event registration. Individual channel registration failures
    /// are logged and leave that one slot permanently at its zero value.
    pub fn init(
        info: &HostInfo,
        mut registrar: Box<dyn HostRegistrar>,
        log: Box<dyn LogSink>,
        transport: T,
    ) -> RoadcastResult<Self> {
        check_compatibility(info, log.as_ref())?;

        for event in EventKind::ALL {
            if registrar.register_event(event).is_err() {
                let message =
                    format!("Unable to register '{}' event callback", event.name());
                log.log(LogLevel::Error, &message);
                return Err(RoadcastError::EventRegistration(event.name().to_string()));
            }
        }

        let mut store = FieldStore::new();
        for channel in Channel::ALL {
            if channel.is_indexed() {
                // Wheel channels are registered when a configuration
                // event reports the wheel count.
                continue;
            }
            match registrar.register_channel(channel, None, channel.kind()) {
                Ok(()) => store.set_live(channel),
                Err(_) => log.log(
                    LogLevel::Warning,
                    &format!("Unable to register for '{}' channel update", channel.name()),
                ),
            }
        }

        let mut bridge = Self {
            store,
            run_state: RunState::initialize(),
            timing: FrameTiming::default(),
            vehicle: None,
            transport,
            registrar,
            log,
        };
        bridge.send_lifecycle(LifecycleEvent::Init);
        Ok(bridge)
    }

    /// Entry point for every host lifecycle callback.
    pub fn handle_event(&mut self, event: HostEvent) {
        if self.run_state == RunState::Unloaded {
            return;
        }
        match event {
            HostEvent::Configuration(config) => self.configuration(&config),
            HostEvent::Started => {
                self.run_state.on_started();
                self.send_lifecycle(LifecycleEvent::Started);
            }
            HostEvent::Paused => {
                self.run_state.on_paused();
                self.send_lifecycle(LifecycleEvent::Paused);
            }
            HostEvent::FrameStart(timing) => self.timing = timing,
            HostEvent::FrameEnd => self.frame_end(),
        }
    }

    /// Entry point for every field-update callback. Channels this build
    /// does not track are ignored; rejected writes are logged and dropped.
    pub fn handle_channel(&mut self, name: &str, index: Option<u32>, value: Option<Value>) {
        let Some(channel) = Channel::from_name(name) else {
            return;
        };
        if let Err(rejection) = self.store.update(channel, index, value) {
            self.log.log(LogLevel::Warning, &rejection.to_string());
        }
    }

    /// Unconditional, immediate shutdown: a final lifecycle message is
    /// flushed best-effort, then the transport endpoint is released.
    pub fn shutdown(&mut self) {
        if self.run_state == RunState::Unloaded {
            return;
        }
        self.send_lifecycle(LifecycleEvent::Shutdown);
        if let Err(error) = self.transport.close() {
            self.log
                .log(LogLevel::Warning, &format!("Transport close failed: {error}"));
        }
        self.run_state.on_shutdown();
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn vehicle(&self) -> Option<&VehicleConfig> {
        self.vehicle.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn configuration(&mut self, event: &ConfigEvent) {
        let Some(config) = VehicleConfig::from_event(event, self.log.as_ref()) else {
            return;
        };
        self.apply_wheel_count(config.wheel_count as usize);
        self.vehicle = Some(config);
        self.send_lifecycle(LifecycleEvent::Config(config));
    }

    /// Brings the wheel channel registrations in line with the configured
    /// count, then resizes the store group (zeroing vacated entries).
    fn apply_wheel_count(&mut self, new_count: usize) {
        let current = self.store.wheel_count();
        for index in new_count..current {
            self.registrar.unregister_channel(
                Channel::WheelSuspDeflection,
                Some(index as u32),
                ValueKind::F32,
            );
        }
        for index in current..new_count {
            if self
                .registrar
                .register_channel(Channel::WheelSuspDeflection, Some(index as u32), ValueKind::F32)
                .is_err()
            {
                self.log.log(
                    LogLevel::Warning,
                    &format!(
                        "Unable to register for '{}' channel update (wheel {index})",
                        Channel::WheelSuspDeflection.name()
                    ),
                );
            }
        }
        self.store.resize_wheels(new_count);
    }

    /// Frame boundary: publish exactly one snapshot, and only while
    /// running. Not running means no snapshot and no side effect.
    fn frame_end(&mut self) {
        if !self.run_state.is_running() {
            return;
        }
        let snapshot = FrameSnapshot::assemble(&self.store, self.timing, self.vehicle.as_ref());
        if let Err(error) = self.transport.publish_frame(&snapshot) {
            // Best-effort: the frame is dropped, the simulation carries on.
            self.log
                .log(LogLevel::Warning, &format!("Frame dropped: {error}"));
        }
    }

    fn send_lifecycle(&mut self, event: LifecycleEvent) {
        if let Err(error) = self.transport.publish_lifecycle(event) {
            self.log.log(
                LogLevel::Warning,
                &format!("Lifecycle message failed on {}: {error}", self.transport.name()),
            );
        }
    }
}
