//! Port for handing registration events to an outbound message channel.
//!
//! Publishing is best effort. Callers treat every error from this port as a
//! dropped notification and never propagate it to the registering client.

use async_trait::async_trait;

use crate::domain::VolunteerRegisteredEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised while publishing a registration event.
    pub enum VolunteerEventPublishError {
        /// The channel could not be reached.
        Unavailable { message: String } => "event channel unavailable: {message}",
        /// The event could not be encoded.
        Serialization { message: String } => "event serialisation failed: {message}",
        /// The channel refused the write.
        Rejected { message: String } => "event channel rejected the event: {message}",
        /// The attempt did not finish within the allotted time.
        Timeout { millis: u64 } => "event publish timed out after {millis} ms",
    }
}

/// Append-only event channel keyed for consumer-side partitioning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerEventPublisher: Send + Sync {
    /// Publish `event` on `channel` under `key`.
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: &VolunteerRegisteredEvent,
    ) -> Result<(), VolunteerEventPublishError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_includes_duration() {
        let err = VolunteerEventPublishError::timeout(250_u64);
        assert_eq!(err.to_string(), "event publish timed out after 250 ms");
    }
}
