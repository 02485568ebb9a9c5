//! Integration tests for the three transports, driven the way a real
//! consumer would drive them.

use std::io::{Read, Write};
use std::net::{TcpStream, UdpSocket};
use std::thread;
use std::time::Duration;

use roadcast_core::config::VehicleConfig;
use roadcast_core::frame::{FrameSnapshot, FrameTiming};
use roadcast_core::transport::{LifecycleEvent, Transport};
use roadcast_types::{RoadcastError, Vec3F};
use roadcast_wire::message::Message;
use roadcast_wire::{codec, region};
use roadcast_transport::{PublishTransport, RegionTransport, ReplyTransport};

fn empty_snapshot() -> FrameSnapshot {
    FrameSnapshot {
        timing: FrameTiming { simulation_time: 42, paused_simulation_time: 0, render_time: 7 },
        world_placement: None,
        speed: Some(13.5),
        engine_rpm: None,
        engine_gear: None,
        effective_steering: None,
        effective_throttle: None,
        effective_brake: None,
        effective_clutch: None,
        local_linear_velocity: None,
        local_angular_velocity: None,
        local_linear_acceleration: None,
        local_angular_acceleration: None,
        cabin_angular_velocity: None,
        cabin_angular_acceleration: None,
        cabin_offset: None,
        head_offset: None,
        head_world_position: None,
        wheel_deflections: vec![],
    }
}

#[test]
fn second_producer_on_same_region_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.region");

    let first = RegionTransport::create(&path).unwrap();
    let second = RegionTransport::create(&path);
    assert!(matches!(second, Err(RoadcastError::RegionExists(_))));

    // The conflict left the first producer's region intact.
    let bytes = std::fs::read(&path).unwrap();
    assert!(region::read(&bytes).is_ok());
    drop(first);
}

#[test]
fn region_reflects_lifecycle_and_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.region");
    let mut transport = RegionTransport::create(&path).unwrap();

    let image = region::read(&std::fs::read(&path).unwrap()).unwrap();
    assert!(!image.running);

    transport.publish_lifecycle(LifecycleEvent::Started).unwrap();
    transport.publish_frame(&empty_snapshot()).unwrap();

    let image = region::read(&std::fs::read(&path).unwrap()).unwrap();
    assert!(image.running);
    assert_eq!(image.speed, 13.5);

    transport.publish_lifecycle(LifecycleEvent::Paused).unwrap();
    let image = region::read(&std::fs::read(&path).unwrap()).unwrap();
    assert!(!image.running);
}

#[test]
fn region_config_applies_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.region");
    let mut transport = RegionTransport::create(&path).unwrap();

    let config = VehicleConfig {
        wheel_count: 6,
        cabin_position: Vec3F::ZERO,
        head_position: Vec3F::ZERO,
    };
    transport.publish_lifecycle(LifecycleEvent::Config(config)).unwrap();

    let image = region::read(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(image.wheel_deflections.len(), 6);
}

#[test]
fn region_close_releases_the_file_for_the_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.region");

    let mut transport = RegionTransport::create(&path).unwrap();
    transport.close().unwrap();
    assert!(!path.exists());

    // A fresh producer can now take the endpoint.
    let again = RegionTransport::create(&path);
    assert!(again.is_ok());
}

#[test]
fn publish_delivers_datagrams_to_a_listening_consumer() {
    let consumer = UdpSocket::bind("127.0.0.1:0").unwrap();
    consumer.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let addr = consumer.local_addr().unwrap();

    let mut transport = PublishTransport::connect(&addr.to_string()).unwrap();
    transport.publish_lifecycle(LifecycleEvent::Started).unwrap();
    transport.publish_frame(&empty_snapshot()).unwrap();

    let mut buf = [0u8; 65536];
    let n = consumer.recv(&mut buf).unwrap();
    assert_eq!(codec::decode(&buf[..n]).unwrap().message, Message::Started);

    let n = consumer.recv(&mut buf).unwrap();
    match codec::decode(&buf[..n]).unwrap().message {
        Message::Frame(frame) => assert_eq!(frame.timing.simulation_time, 42),
        other => panic!("expected Frame, got {other:?}"),
    }
}

#[test]
fn publish_without_consumer_never_blocks_or_fails() {
    // Aim at a port nobody listens on; every send must come back Ok.
    let mut transport = PublishTransport::connect("127.0.0.1:1").unwrap();
    for _ in 0..32 {
        transport.publish_frame(&empty_snapshot()).unwrap();
    }
    transport.close().unwrap();
}

#[test]
fn reply_serves_each_message_on_request() {
    let mut transport = ReplyTransport::bind("127.0.0.1:0").unwrap();
    let addr = transport.local_addr().unwrap();

    let consumer = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        let mut envelopes = Vec::new();
        for _ in 0..2 {
            stream.write_all(&[1u8]).unwrap();
            let mut length = [0u8; 4];
            stream.read_exact(&mut length).unwrap();
            let mut payload = vec![0u8; u32::from_le_bytes(length) as usize];
            stream.read_exact(&mut payload).unwrap();
            envelopes.push(codec::decode(&payload).unwrap());
        }
        envelopes
    });

    // Each publish blocks until the consumer's request arrives.
    transport.publish_lifecycle(LifecycleEvent::Init).unwrap();
    transport.publish_frame(&empty_snapshot()).unwrap();

    let envelopes = consumer.join().unwrap();
    assert_eq!(envelopes[0].message, Message::Init);
    assert!(matches!(envelopes[1].message, Message::Frame(_)));
}

#[test]
fn reply_endpoint_conflict_is_reported() {
    let first = ReplyTransport::bind("127.0.0.1:0").unwrap();
    let addr = first.local_addr().unwrap();
    assert!(ReplyTransport::bind(&addr.to_string()).is_err());
}

#[test]
fn reply_shutdown_without_consumer_returns_promptly() {
    let mut transport = ReplyTransport::bind("127.0.0.1:0").unwrap();
    // No consumer ever connected; the bounded flush must not hang.
    transport.publish_lifecycle(LifecycleEvent::Shutdown).unwrap();
    transport.close().unwrap();
}
