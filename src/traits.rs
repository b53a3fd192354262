//! Common traits for the host-facing printer entities.

use std::{error::Error, future::Future};

/// An `Entity` is one host-visible face of a printer: the camera, the
/// status sensor, or the power switch.
///
/// The host polls [`Entity::update`] on its own schedule and reads cached
/// state between polls. One poll performs at most one protocol exchange;
/// there is no retry inside a poll, the next poll is the retry.
pub trait Entity {
    /// Error type returned by this trait.
    type Error: Error;

    /// Stable display name for the entity.
    fn name(&self) -> &str;

    /// True only while the most recent poll succeeded. Never left true
    /// after a failed attempt.
    fn available(&self) -> bool;

    /// Refresh cached state from the printer.
    ///
    /// Failures are folded into availability and logged; the returned
    /// error is for callers that want to inspect the cause, and never
    /// needs to be propagated for correctness.
    fn update(&mut self) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Log one failed poll with the severity the cause deserves: an offline
/// printer is routine, a reply we cannot trust is not.
pub(crate) fn note_poll_failure(entity: &str, err: &zortrax::error::Error) {
    if err.is_unavailable() {
        tracing::debug!(entity, error = %err, "printer unreachable");
    } else {
        tracing::warn!(entity, error = %err, "ignoring untrustworthy reply");
    }
}
