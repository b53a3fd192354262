//! The status sensor entity.

use chrono::{DateTime, Utc};
use zortrax::{
    client::Client,
    error::Error,
    message::StatusSnapshot,
};

use crate::{
    config::PrinterConfig,
    traits::{note_poll_failure, Entity},
};

/// A sensor reporting the printer's machine-state fields.
///
/// The snapshot is replaced whole on every successful poll; there is no
/// merging with earlier state, so the attribute map never mixes two polls.
pub struct Sensor {
    name: String,
    client: Client,
    snapshot: Option<StatusSnapshot>,
    last_updated: Option<DateTime<Utc>>,
    available: bool,
}

impl Sensor {
    /// Create the sensor entity for a configured printer.
    pub fn new(config: &PrinterConfig) -> Self {
        Self {
            name: config.name.clone(),
            client: config.client(),
            snapshot: None,
            last_updated: None,
            available: false,
        }
    }

    /// The sensor's primary state: the `printerStatus` field, while the
    /// printer is available.
    pub fn state(&self) -> Option<&str> {
        if !self.available {
            return None;
        }
        self.snapshot.as_ref().and_then(StatusSnapshot::printer_status)
    }

    /// Every field from the last good poll, for the host's attribute map.
    pub fn attributes(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    /// When the last successful poll happened.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl Entity for Sensor {
    type Error = Error;

    fn name(&self) -> &str {
        &self.name
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn update(&mut self) -> Result<(), Error> {
        match self.client.status().await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
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
