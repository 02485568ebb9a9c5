//! The transport capability.
//!
//! One assembler core, swappable delivery strategies: the bridge talks to
//! a `Transport` trait object and never knows whether frames land in a
//! shared region, a publish socket, or a reply socket.

use roadcast_types::RoadcastResult;

use crate::config::VehicleConfig;
use crate::frame::FrameSnapshot;

/// A discrete lifecycle signal, distinct from frame data, so consumers can
/// tell "no frame because paused" from "producer terminated".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifecycleEvent {
    /// Producer initialized and bound its endpoint.
    Init,
    /// Vehicle configuration changed.
    Config(VehicleConfig),
    /// Simulation started advancing.
    Started,
    /// Simulation paused.
    Paused,
    /// Producer is going away. Always the last message.
    Shutdown,
}

/// Delivery strategy for assembled snapshots and lifecycle events.
///
/// Implementations must not block the caller outside the explicitly
/// blocking request/reply mode, and must release their endpoint
/// deterministically in `close`.
pub trait Transport {
    /// Delivers a lifecycle event.
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()>;

    /// Delivers one completed frame.
    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()>;

    /// Releases the endpoint. Called exactly once, at shutdown.
    fn close(&mut self) -> RoadcastResult<()>;

    /// Human-readable transport name for log messages.
    fn name(&self) -> &str;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()> {
        (**self).publish_lifecycle(event)
    }

    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()> {
        (**self).publish_frame(snapshot)
    }

    fn close(&mut self) -> RoadcastResult<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Records everything it is handed. For tests and inspection.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub lifecycle: Vec<LifecycleEvent>,
    pub frames: Vec<FrameSnapshot>,
    pub closed: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for RecordingTransport {
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()> {
        self.lifecycle.push(event);
        Ok(())
    }

    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }

    fn close(&mut self) -> RoadcastResult<()> {
        self.closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
