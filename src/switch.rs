//! The power switch entity.
//!
//! The printer protocol exposes no job or power control, so the switch is
//! read-only in practice: its state tracks `printingInProgress`, and the
//! on/off actions log the attempt and change nothing.

use zortrax::{client::Client, error::Error};

use crate::{
    config::PrinterConfig,
    traits::{note_poll_failure, Entity},
};

/// A switch mirroring whether the printer is mid-print.
pub struct Switch {
    name: String,
    client: Client,
    printing: Option<bool>,
    available: bool,
}

impl Switch {
    /// Create the switch entity for a configured printer.
    pub fn new(config: &PrinterConfig) -> Self {
        Self {
            name: format!("{} Switch", config.name),
            client: config.client(),
            printing: None,
            available: false,
        }
    }

    /// Whether a print job is running, while the printer is available.
    pub fn is_on(&self) -> Option<bool> {
        if !self.available {
            return None;
        }
        self.printing
    }

    /// Deliberately inert: the protocol defines no way to start a job.
    pub fn turn_on(&self) {
        tracing::info!(entity = %self.name, "turn_on requested, but the printer exposes no job control; ignoring");
    }

    /// Deliberately inert: the protocol defines no way to stop a job.
    pub fn turn_off(&self) {
        tracing::info!(entity = %self.name, "turn_off requested, but the printer exposes no job control; ignoring");
    }
}

impl Entity for Switch {
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
                self.printing = snapshot.printing_in_progress();
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
