//! The one-shot exchange client.

use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use crate::{
    command::{Command, Request},
    error::{ConnectError, Error, Malformed},
    frame,
    message::{Envelope, StatusSnapshot},
    preview,
};

/// TCP port the printer listens on unless reconfigured.
pub const DEFAULT_PORT: u16 = 8002;

/// Bound on the connect phase and on the write/read phase of one exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Refuse replies past this size rather than buffering without bound.
const MAX_REPLY_BYTES: usize = 16 * 1024 * 1024;

const READ_CHUNK: usize = 4096;

/// A client for one printer endpoint.
///
/// Holds no connection: every call opens its own socket, performs a single
/// request/response exchange, and closes it. Clones share nothing.
#[derive(Debug, Clone)]
pub struct Client {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Client {
    /// Create a client for `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the exchange timeout. Mostly useful in tests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Perform one framed request/response exchange.
    ///
    /// The printer sends no length prefix on the reply path; the reply is
    /// complete only once the peer closes the connection. The read loop
    /// therefore drains the socket to end-of-stream and never trusts a
    /// single read to return the whole payload.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] when the printer cannot be reached or the
    /// socket fails mid-exchange; [`Error::Json`] when the reply is not
    /// parseable JSON.
    pub async fn send(&self, request: &Request) -> Result<Envelope, Error> {
        let payload = serde_json::to_vec(request).map_err(Error::Json)?;
        let framed = frame::encode(&payload)?;

        tracing::debug!(
            host = %self.host,
            port = self.port,
            len = payload.len(),
            "connecting to printer"
        );
        let stream = match tokio::time::timeout(
            self.timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => return Err(Error::Unavailable(err.into())),
            Err(_) => return Err(Error::Unavailable(ConnectError::Timeout)),
        };

        let raw = match tokio::time::timeout(self.timeout, exchange(stream, &framed)).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Unavailable(ConnectError::Timeout)),
        };
        tracing::debug!(len = raw.len(), "received reply from printer");

        serde_json::from_slice(&raw).map_err(Error::Json)
    }

    /// Query the standard status fields and decode the snapshot.
    pub async fn status(&self) -> Result<StatusSnapshot, Error> {
        let envelope = self.send(&Request::single(Command::status())).await?;
        envelope.status_snapshot()
    }

    /// Capture a camera frame, flipped right side up and encoded as JPEG.
    pub async fn camera_preview(&self, quality: u8) -> Result<Vec<u8>, Error> {
        let envelope = self
            .send(&Request::single(Command::camera_preview(quality)))
            .await?;
        let raw = envelope.camera_data()?;
        preview::render_jpeg(&raw)
    }
}

/// Write the framed request, then drain the socket until the peer closes
/// it.
async fn exchange(mut stream: TcpStream, framed: &[u8]) -> Result<Vec<u8>, Error> {
    stream
        .write_all(framed)
        .await
        .map_err(|err| Error::Unavailable(err.into()))?;

    let mut reply = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|err| Error::Unavailable(err.into()))?;
        if n == 0 {
            break;
        }
        reply.extend_from_slice(&chunk[..n]);
        if reply.len() > MAX_REPLY_BYTES {
            return Err(Malformed::OversizedReply(MAX_REPLY_BYTES).into());
        }
    }
    Ok(reply)
}
