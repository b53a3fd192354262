//! The camera entity.

use chrono::{DateTime, Utc};
use zortrax::{client::Client, error::Error};

use crate::{
    config::PrinterConfig,
    traits::{note_poll_failure, Entity},
};

/// A still-frame camera backed by the printer's onboard camera.
///
/// Frames come back flipped right side up and re-encoded as JPEG. The last
/// good frame stays cached across failed polls, but [`Camera::image`] only
/// hands it out while the printer is reachable.
pub struct Camera {
    name: String,
    client: Client,
    quality: u8,
    frame: Option<Vec<u8>>,
    last_updated: Option<DateTime<Utc>>,
    available: bool,
}

impl Camera {
    /// Create the camera entity for a configured printer.
    pub fn new(config: &PrinterConfig) -> Self {
        Self {
            name: format!("{} Camera", config.name),
            client: config.client(),
            quality: config.quality,
            frame: None,
            last_updated: None,
            available: false,
        }
    }

    /// The latest JPEG frame, while the printer is available.
    pub fn image(&self) -> Option<&[u8]> {
        if !self.available {
            return None;
        }
        self.frame.as_deref()
    }

    /// When the last successful capture happened.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl Entity for Camera {
    type Error = Error;

    fn name(&self) -> &str {
        &self.name
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn update(&mut self) -> Result<(), Error> {
        match self.client.camera_preview(self.quality).await {
            Ok(frame) => {
                self.frame = Some(frame);
                self.last_updated = Some(Utc::now());
                self.available = true;
                Ok(())
            }
            Err(err) => {
                self.available = false;
                note_poll_failure(&self.name, &err);
                Err(err)
            }
        }
    }
}
