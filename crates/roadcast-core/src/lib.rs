//! # roadcast-core
//!
//! The producer side of the Roadcast telemetry bridge: a field store that
//! accumulates host callbacks, a run-state machine that gates frame
//! emission, and the bridge that assembles one immutable snapshot per
//! simulation frame and hands it to a pluggable [`Transport`].
//!
//! Everything here is synchronous and single-threaded by contract: the host
//! delivers all callbacks serially from its simulation thread, so the store
//! performs no locking and the assembler simply reads it at frame end.

pub mod bridge;
pub mod config;
pub mod derive;
pub mod frame;
pub mod host;
pub mod state;
pub mod store;
pub mod transport;

pub use bridge::{HostEvent, TelemetryBridge};
pub use config::{ConfigEvent, NamedAttribute, VehicleConfig};
pub use frame::{FrameSnapshot, FrameTiming};
pub use host::{EventKind, HostInfo, HostRegistrar, LogLevel, LogSink, RegisterError};
pub use state::RunState;
pub use store::FieldStore;
pub use transport::{LifecycleEvent, Transport};
