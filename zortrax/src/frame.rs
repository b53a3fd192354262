//! Request framing: a 2-byte big-endian length prefix ahead of the JSON
//! text.
//!
//! Only the request path is framed. The printer terminates its reply by
//! closing the connection instead of sending a length, so there is nothing
//! to decode on the read path beyond draining the socket.

use crate::error::Error;

/// Size of the length prefix in bytes.
pub const PREFIX_LEN: usize = 2;

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// Prefix `payload` with its big-endian 16-bit length.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>, Error> {
    if payload.len() > MAX_PAYLOAD {
        return Err(Error::FrameOverflow(payload.len()));
    }
    let mut frame = Vec::with_capacity(PREFIX_LEN + payload.len());
    frame.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Split one frame off the front of `bytes`, returning the payload and any
/// trailing remainder, or `None` when the frame is truncated.
///
/// The inverse of [`encode`], used when acting as the printer side of an
/// exchange.
pub fn split(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    if bytes.len() < PREFIX_LEN {
        return None;
    }
    let len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let rest = &bytes[PREFIX_LEN..];
    if rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}
