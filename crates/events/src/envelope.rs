use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for an event, carrying stream metadata.
///
/// Notes:
/// - `stream_id` names the stream the event belongs to (one stream per stocked item).
/// - `sequence_number` is 1-based and gap-free per stream; it reflects the
///   order in which the mutations actually took effect, regardless of the
///   order in which envelopes are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    stream_id: String,
    stream_type: String,

    /// Monotonically increasing position in the stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        stream_id: impl Into<String>,
        stream_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            stream_id: stream_id.into(),
            stream_type: stream_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn stream_type(&self) -> &str {
        &self.stream_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
