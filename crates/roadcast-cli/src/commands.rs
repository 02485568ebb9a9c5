//! CLI command implementations.

use std::io::{Read, Write};
use std::net::{TcpStream, UdpSocket};

use roadcast_wire::{codec, region, Envelope};

/// Decode and print one region image.
pub fn peek(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let image = region::read(&bytes)?;

    println!("Roadcast region: {path}");
    println!("─────────────────");
    println!("running:      {}", image.running);
    let position = image.world_placement.position;
    let orientation = image.world_placement.orientation;
    println!("position:     ({:.3}, {:.3}, {:.3})", position.x, position.y, position.z);
    println!(
        "orientation:  heading {:.4}  pitch {:.4}  roll {:.4}",
        orientation.heading, orientation.pitch, orientation.roll
    );
    println!("speed:        {:.2}", image.speed);
    println!("engine:       {:.0} rpm, gear {}", image.engine_rpm, image.engine_gear);
    println!(
        "controls:     steering {:.2}  throttle {:.2}  brake {:.2}  clutch {:.2}",
        image.effective_steering,
        image.effective_throttle,
        image.effective_brake,
        image.effective_clutch
    );
    println!("wheels:       {:?}", image.wheel_deflections);
    Ok(())
}

/// Bind a datagram socket and print every envelope that arrives.
pub fn listen(addr: &str, count: u64) -> Result<(), Box<dyn std::error::Error>> {
    let socket = UdpSocket::bind(addr)?;
    println!("Listening on {addr}");

    let mut buf = [0u8; 65536];
    let mut received = 0u64;
    while count == 0 || received < count {
        let n = socket.recv(&mut buf)?;
        match codec::decode(&buf[..n]) {
            Ok(envelope) => print_envelope(&envelope),
            Err(e) => eprintln!("undecodable message: {e}"),
        }
        received += 1;
    }
    Ok(())
}

/// Drive a request/reply producer: one request per message.
pub fn request(addr: &str, count: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(addr)?;

    for _ in 0..count {
        stream.write_all(&[1u8])?;
        let mut length = [0u8; 4];
        stream.read_exact(&mut length)?;
        let mut payload = vec![0u8; u32::from_le_bytes(length) as usize];
        stream.read_exact(&mut payload)?;
        print_envelope(&codec::decode(&payload)?);
    }
    Ok(())
}

fn print_envelope(envelope: &Envelope) {
    match serde_json::to_string(envelope) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{envelope:?}"),
    }
}
