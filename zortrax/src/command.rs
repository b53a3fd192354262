//! The commands that can be sent to the printer.

use serde::{Deserialize, Serialize};

/// Machine-state fields the status pollers ask for, in the order the
/// firmware expects them.
pub const STATUS_FIELDS: [&str; 9] = [
    "printerStatus",
    "storageBytesFree",
    "storageBytesTotal",
    "currentMaterialId",
    "failsafeReason",
    "serialNumber",
    "printingInProgress",
    "failsafeAlertReason",
    "failsafeAlertSource",
];

/// The commands that can be sent to the printer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Ask for a set of named machine-state fields.
    Status(StatusQuery),
    /// Ask for a still frame from the onboard camera.
    GetCameraPreview(CameraPreviewQuery),
}

impl Command {
    /// Return a status command with the standard field list.
    pub fn status() -> Self {
        Command::Status(StatusQuery {
            fields: STATUS_FIELDS.iter().map(|field| field.to_string()).collect(),
        })
    }

    /// Return a camera preview command.
    ///
    /// Qualities above 100 are clamped rather than forwarded; the
    /// firmware's handling of out-of-range values is undocumented.
    pub fn camera_preview(quality: u8) -> Self {
        Command::GetCameraPreview(CameraPreviewQuery {
            quality: quality.min(100),
        })
    }
}

/// Payload of the `status` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusQuery {
    /// Names of the fields the printer should report, in order.
    pub fields: Vec<String>,
}

/// Payload of the `getCameraPreview` command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CameraPreviewQuery {
    /// JPEG quality of the capture, 0-100.
    pub quality: u8,
}

/// The envelope the printer expects around every command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    /// Commands to execute, in order. In practice always one.
    pub commands: Vec<Command>,
}

impl Request {
    /// Wrap a single command.
    pub fn single(command: Command) -> Self {
        Self {
            commands: vec![command],
        }
    }
}
