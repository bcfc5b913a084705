use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// MemoryPublisher keeps published events so callers can inspect what was emitted.
#[derive(Debug, Default, Clone)]
pub struct MemoryPublisher {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn event_names(&self) -> Vec<String> {
        self.events.lock().await.iter().map(|e| e.name.to_string()).collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[tokio::test]
    async fn test_should_keep_published_events() {
        let publisher = MemoryPublisher::new();
        let handle = publisher.clone();
        let event = DomainEvent::added("member_added", "members", "M0001", &HashMap::new(), &"Alice").expect("build event");
        publisher.publish(&event).await.expect("should publish");
        assert_eq!(vec!["member_added".to_string()], handle.event_names().await);
    }
}
