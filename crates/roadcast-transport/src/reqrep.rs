//! Request/reply transport.
//!
//! The producer binds a TCP listener once and then serves every message on
//! demand: each publish blocks until a consumer sends a one-byte request,
//! then replies with the length-prefixed envelope. Per-frame delivery is
//! guaranteed at the price of producer responsiveness — the host must
//! tolerate blocking in its callbacks for this mode to be selectable.
//!
//! Shutdown must not hang: the final message is served only to an
//! already-connected consumer, under a bounded timeout.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use roadcast_core::frame::FrameSnapshot;
use roadcast_core::transport::{LifecycleEvent, Transport};
use roadcast_types::{RoadcastError, RoadcastResult};
use roadcast_wire::codec;

/// How long the shutdown message may wait for a request before the
/// endpoint is released regardless.
const SHUTDOWN_FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

pub struct ReplyTransport {
    listener: Option<TcpListener>,
    client: Option<TcpStream>,
}

impl ReplyTransport {
    /// Binds the reply endpoint. A second producer on the same address is
    /// a reported conflict, not a race.
    pub fn bind(addr: &str) -> RoadcastResult<Self> {
        let listener = TcpListener::bind(addr).map_err(|error| match error.kind() {
            ErrorKind::AddrInUse => RoadcastError::TransportSetup(format!(
                "reply endpoint '{addr}' already bound by another producer"
            )),
            _ => RoadcastError::TransportSetup(format!("unable to bind '{addr}': {error}")),
        })?;
        Ok(Self { listener: Some(listener), client: None })
    }

    /// The address the listener actually bound, for consumers and tests.
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        self.listener.as_ref().and_then(|listener| listener.local_addr().ok())
    }

    /// Waits for one request and replies with `bytes`.
    ///
    /// A consumer that disconnects mid-session is replaced by the next
    /// accept; `bounded` limits the wait (used at shutdown).
    fn serve(&mut self, bytes: &[u8], bounded: bool) -> RoadcastResult<()> {
        let Some(listener) = self.listener.as_ref() else {
            return Ok(());
        };

        loop {
            if self.client.is_none() {
                if bounded {
                    // Shutdown path: never wait for a consumer to appear.
                    return Ok(());
                }
                let (stream, _addr) = listener
                    .accept()
                    .map_err(|error| RoadcastError::Send(error.to_string()))?;
                self.client = Some(stream);
            }

            let Some(stream) = self.client.as_mut() else {
                continue;
            };
            let timeout = bounded.then_some(SHUTDOWN_FLUSH_TIMEOUT);
            if stream.set_read_timeout(timeout).is_err() {
                self.client = None;
                continue;
            }

            let mut request = [0u8; 1];
            match stream.read_exact(&mut request) {
                Ok(()) => {}
                Err(error)
                    if bounded
                        && matches!(error.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    // The bounded flush ran out; release without hanging.
                    return Ok(());
                }
                Err(_) => {
                    // Peer gone; serve the next consumer instead.
                    self.client = None;
                    continue;
                }
            }

            let length = (bytes.len() as u32).to_le_bytes();
            let reply = stream
                .write_all(&length)
                .and_then(|()| stream.write_all(bytes))
                .and_then(|()| stream.flush());
            match reply {
                Ok(()) => return Ok(()),
                Err(_) => {
                    self.client = None;
                    continue;
                }
            }
        }
    }
}

impl Transport for ReplyTransport {
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()> {
        let bytes = codec::encode_lifecycle(event)?;
        let bounded = event == LifecycleEvent::Shutdown;
        self.serve(&bytes, bounded)
    }

    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()> {
        let bytes = codec::encode_frame(snapshot)?;
        self.serve(&bytes, false)
    }

    fn close(&mut self) -> RoadcastResult<()> {
        self.client = None;
        self.listener = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "reply"
    }
}
