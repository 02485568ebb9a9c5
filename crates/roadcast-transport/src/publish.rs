//! Push-based publish transport.
//!
//! One UDP datagram per lifecycle event and per completed frame, sent to a
//! configured consumer endpoint. Fire-and-forget: the socket is
//! non-blocking, nothing is queued, and a message nobody is listening for
//! is simply gone. The producer is never slowed down by a consumer.

use std::io::ErrorKind;
use std::net::UdpSocket;

use roadcast_core::frame::FrameSnapshot;
use roadcast_core::transport::{LifecycleEvent, Transport};
use roadcast_types::{RoadcastError, RoadcastResult};
use roadcast_wire::codec;

pub struct PublishTransport {
    socket: Option<UdpSocket>,
}

impl PublishTransport {
    /// Binds an ephemeral local socket and aims it at the consumer
    /// endpoint. The endpoint does not need to exist yet — or ever.
    pub fn connect(addr: &str) -> RoadcastResult<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .and_then(|socket| {
                socket.connect(addr)?;
                socket.set_nonblocking(true)?;
                Ok(socket)
            })
            .map_err(|error| {
                RoadcastError::TransportSetup(format!("unable to open publish socket to '{addr}': {error}"))
            })?;
        Ok(Self { socket: Some(socket) })
    }

    fn send(&mut self, bytes: &[u8]) -> RoadcastResult<()> {
        let Some(socket) = self.socket.as_ref() else {
            return Ok(());
        };
        match socket.send(bytes) {
            Ok(_) => Ok(()),
            // A full buffer means a consumer that cannot keep up; the
            // message is dropped, never queued.
            Err(error) if error.kind() == ErrorKind::WouldBlock => Ok(()),
            // Nobody listening yet: the OS reports the last datagram's
            // rejection. Absent consumers are expected.
            Err(error) if error.kind() == ErrorKind::ConnectionRefused => Ok(()),
            Err(error) => Err(RoadcastError::Send(error.to_string())),
        }
    }
}

impl Transport for PublishTransport {
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()> {
        let bytes = codec::encode_lifecycle(event)?;
        self.send(&bytes)
    }

    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()> {
        let bytes = codec::encode_frame(snapshot)?;
        self.send(&bytes)
    }

    fn close(&mut self) -> RoadcastResult<()> {
        self.socket = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "publish"
    }
}
