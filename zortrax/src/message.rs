//! Replies from the printer.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Malformed};

/// The `status` marker the printer uses for success.
pub const STATUS_OK: &str = "1";

pub(crate) const KIND_STATUS: &str = "status";
pub(crate) const KIND_CAMERA: &str = "getCameraPreview";

/// A full reply from the printer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// One response per command sent.
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// A single response within an [`Envelope`].
///
/// Parsed leniently: unknown keys land in `other` so a firmware update
/// adding fields does not break parsing. Shape checks happen in the typed
/// decoders instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Which command this answers.
    #[serde(rename = "type")]
    pub kind: String,

    /// `"1"` on success; anything else is a failure.
    pub status: String,

    /// Field values, for `status` responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    /// Base64 image payload, for `getCameraPreview` responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_preview_data: Option<String>,

    /// Keys this client does not model.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Response {
    /// True when the printer reported success for this response.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// One name/value pair in a `status` response.
///
/// Both halves are optional on the wire; [`Envelope::status_snapshot`]
/// rejects entries missing either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    /// The field's wire name.
    pub name: Option<String>,
    /// The reported value, always a string on the wire.
    pub value: Option<String>,
}

impl Envelope {
    /// The first response, checked against the command it should answer.
    fn first(&self, expected: &'static str) -> Result<&Response, Malformed> {
        let response = self.responses.first().ok_or(Malformed::NoResponses)?;
        if response.kind != expected {
            return Err(Malformed::UnexpectedType {
                expected,
                got: response.kind.clone(),
            });
        }
        if !response.is_ok() {
            return Err(Malformed::CommandFailed {
                status: response.status.clone(),
            });
        }
        Ok(response)
    }

    /// Decode a `status` reply into a snapshot.
    ///
    /// The snapshot is atomic: one entry missing a name or value fails the
    /// whole decode rather than yielding a partial map.
    pub fn status_snapshot(&self) -> Result<StatusSnapshot, Error> {
        let response = self.first(KIND_STATUS)?;
        let mut fields = BTreeMap::new();
        for field in &response.fields {
            match (&field.name, &field.value) {
                (Some(name), Some(value)) => {
                    fields.insert(name.clone(), value.clone());
                }
                _ => return Err(Malformed::IncompleteField.into()),
            }
        }
        Ok(StatusSnapshot { fields })
    }

    /// Decode a `getCameraPreview` reply into raw image bytes.
    ///
    /// The bytes are exactly what the camera captured, still upside down;
    /// [`crate::preview::render_jpeg`] flips and transcodes them.
    pub fn camera_data(&self) -> Result<Vec<u8>, Error> {
        let response = self.first(KIND_CAMERA)?;
        let data = response
            .camera_preview_data
            .as_deref()
            .ok_or(Malformed::MissingCameraData)?;
        let raw = general_purpose::STANDARD
            .decode(data)
            .map_err(Malformed::InvalidBase64)?;
        Ok(raw)
    }
}

/// All machine-state fields from one successful status poll.
///
/// Rebuilt whole on every poll; never merged with earlier state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StatusSnapshot {
    fields: BTreeMap<String, String>,
}

impl StatusSnapshot {
    /// Look up a field by wire name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `printerStatus` field.
    pub fn printer_status(&self) -> Option<&str> {
        self.get("printerStatus")
    }

    /// The printer's serial number.
    pub fn serial_number(&self) -> Option<&str> {
        self.get("serialNumber")
    }

    /// Whether a print job is running, when the printer reported it.
    pub fn printing_in_progress(&self) -> Option<bool> {
        self.get("printingInProgress")
            .map(|value| matches!(value, "1" | "true" | "True"))
    }

    /// Free storage in bytes.
    pub fn storage_bytes_free(&self) -> Option<u64> {
        self.get("storageBytesFree").and_then(|value| value.parse().ok())
    }

    /// Total storage in bytes.
    pub fn storage_bytes_total(&self) -> Option<u64> {
        self.get("storageBytesTotal").and_then(|value| value.parse().ok())
    }

    /// Number of fields reported.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the printer reported no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the raw name/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
