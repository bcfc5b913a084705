use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogsPublisher writes every domain event as one structured log line.
#[derive(Debug, Default)]
pub struct LogsPublisher {}

impl LogsPublisher {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EventPublisher for LogsPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        info!(event_id = %event.event_id, name = %event.name, group = %event.group,
            key = %event.key, kind = ?event.kind, metadata = ?event.metadata,
            data = %event.json_data, "domain event");
        Ok(())
    }
}
