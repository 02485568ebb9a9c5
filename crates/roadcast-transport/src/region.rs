//! Poll-based shared region transport.
//!
//! A file-backed mapping of [`REGION_SIZE`] bytes, created in exclusive
//! mode and overwritten in place once per frame. Consumers map the same
//! file read-only and poll it; no locking is performed, and a reader may
//! see a torn record, which the contract accepts.
//!
//! Exactly one producer per region: if the file already exists, creation
//! fails with a conflict instead of attaching, so two producers can never
//! corrupt one region. The file is removed on close, letting the next
//! session create it afresh.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use memmap2::MmapMut;

use roadcast_core::frame::FrameSnapshot;
use roadcast_core::transport::{LifecycleEvent, Transport};
use roadcast_types::{RoadcastError, RoadcastResult};
use roadcast_wire::region::{self, REGION_SIZE};

pub struct RegionTransport {
    map: Option<MmapMut>,
    path: PathBuf,
}

impl RegionTransport {
    /// Creates the region file and maps it.
    ///
    /// Fails with [`RoadcastError::RegionExists`] if the file is already
    /// there — another producer owns it — leaving it untouched.
    pub fn create(path: impl AsRef<Path>) -> RoadcastResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|error| match error.kind() {
                ErrorKind::AlreadyExists => {
                    RoadcastError::RegionExists(path.display().to_string())
                }
                _ => RoadcastError::TransportSetup(format!(
                    "unable to create region '{}': {error}",
                    path.display()
                )),
            })?;
        if let Err(error) = file.set_len(REGION_SIZE as u64) {
            // Release the half-made region so the session stays clean.
            let _ = fs::remove_file(&path);
            return Err(error.into());
        }

        // Safety: the file was just created with the right length and this
        // process is its only writer for the lifetime of the mapping.
        let mut map = unsafe {
            MmapMut::map_mut(&file).map_err(|error| {
                let _ = fs::remove_file(&path);
                RoadcastError::TransportSetup(format!("unable to map region: {error}"))
            })?
        };
        region::init(&mut map);

        Ok(Self { map: Some(map), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for RegionTransport {
    fn publish_lifecycle(&mut self, event: LifecycleEvent) -> RoadcastResult<()> {
        let Some(map) = self.map.as_mut() else {
            return Ok(());
        };
        match event {
            // The region is announced by existing; Init has no payload.
            LifecycleEvent::Init => {}
            LifecycleEvent::Started => region::write_running(map, true),
            LifecycleEvent::Paused => region::write_running(map, false),
            // Applied immediately, not at the next frame: a paused
            // consumer still sees the new wheel count.
            LifecycleEvent::Config(config) => region::write_config(map, &config),
            LifecycleEvent::Shutdown => region::write_running(map, false),
        }
        Ok(())
    }

    fn publish_frame(&mut self, snapshot: &FrameSnapshot) -> RoadcastResult<()> {
        if let Some(map) = self.map.as_mut() {
            region::write_frame(map, snapshot);
        }
        Ok(())
    }

    fn close(&mut self) -> RoadcastResult<()> {
        if self.map.take().is_some() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "region"
    }
}

impl Drop for RegionTransport {
    fn drop(&mut self) {
        // Backstop for sessions that never reach an orderly shutdown.
        let _ = self.close();
    }
}
