use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::common::{EventEnvelope, EventSink};

/// Publishes event envelopes to the tracing subscriber. The stock sink in
/// the scenario-runner binary.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn publish(&self, events: Vec<EventEnvelope>) -> Result<(), String> {
        for envelope in events {
            info!(
                aggregate = %envelope.aggregate_type,
                aggregate_id = %envelope.aggregate_id,
                event = %envelope.event_type,
                "{}",
                envelope.event_data
            );
        }
        Ok(())
    }
}

/// Buffers envelopes in memory; used by tests to assert on the published
/// stream.
#[derive(Default)]
pub struct InMemoryEventSink {
    published: Mutex<Vec<EventEnvelope>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drained(&self) -> Vec<EventEnvelope> {
        self.published
            .lock()
            .map(|mut guard| guard.drain(..).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, events: Vec<EventEnvelope>) -> Result<(), String> {
        let mut guard = self
            .published
            .lock()
            .map_err(|_| "event buffer poisoned".to_string())?;
        guard.extend(events);
        Ok(())
    }
}
