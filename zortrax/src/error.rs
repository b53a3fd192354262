//! Error taxonomy for printer exchanges.

use thiserror::Error;

/// Why a connection attempt or socket exchange failed.
///
/// An unreachable printer is a routine condition, not a fault; callers log
/// these at debug level and surface the entity as unavailable until the
/// next poll.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The connect or read deadline elapsed.
    #[error("timed out waiting for the printer")]
    Timeout,

    /// The printer actively refused the connection.
    #[error("connection refused")]
    Refused,

    /// The socket was closed abnormally mid-exchange.
    #[error("connection reset by peer")]
    Reset,

    /// Any other socket-level failure.
    #[error("socket error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for ConnectError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::Refused,
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe => Self::Reset,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Self::Timeout,
            _ => Self::Io(err),
        }
    }
}

/// Ways a parsed reply can violate the expected shape.
#[derive(Debug, Error)]
pub enum Malformed {
    /// The `responses` array was absent or empty.
    #[error("reply carries no responses")]
    NoResponses,

    /// The first response answered a different command than the one sent.
    #[error("expected a `{expected}` response, got `{got}`")]
    UnexpectedType {
        /// The response type the sent command calls for.
        expected: &'static str,
        /// The type the printer actually reported.
        got: String,
    },

    /// The printer reported a non-success status.
    #[error("printer reported status {status:?}")]
    CommandFailed {
        /// The raw status marker from the reply.
        status: String,
    },

    /// A status field entry was missing its name or its value.
    #[error("status field entry is missing a name or value")]
    IncompleteField,

    /// The camera response carried no preview payload.
    #[error("camera response carries no `cameraPreviewData`")]
    MissingCameraData,

    /// The camera payload was not valid base64.
    #[error("camera payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The peer kept writing past the reply sanity cap.
    #[error("reply exceeded {0} bytes before the peer closed the connection")]
    OversizedReply(usize),
}

/// Errors returned by printer exchanges and decoders.
#[derive(Debug, Error)]
pub enum Error {
    /// The printer could not be reached, or the socket failed mid-exchange.
    #[error("printer unavailable: {0}")]
    Unavailable(#[from] ConnectError),

    /// The reply was not parseable JSON; the whole exchange is
    /// untrustworthy, possibly a firmware protocol change.
    #[error("reply is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The reply parsed, but does not conform to the protocol.
    #[error("malformed reply: {0}")]
    Malformed(#[from] Malformed),

    /// The camera payload decoded, but is not a decodable image.
    #[error("camera frame is not a decodable image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// A request payload outgrew the 2-byte length prefix.
    #[error("request payload of {0} bytes exceeds the 16-bit frame limit")]
    FrameOverflow(usize),
}

impl Error {
    /// True when the failure means the printer is unreachable rather than
    /// misbehaving.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}
