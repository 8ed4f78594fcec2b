// Events module
// Session state changes are published on a broadcast channel for the UI layer

use log::{debug, error};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::errors::AppError;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    TimeUpdated { time: f64 },
    /// `index` is `None` when no caption has started yet.
    ActiveCaptionChanged { index: Option<usize> },
    CaptionsReplaced { count: usize },
    LoadingChanged { loading: bool },
    Error {
        message: String,
        #[serde(rename = "type")]
        kind: String,
    },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::TimeUpdated { .. } => "time-updated",
            SessionEvent::ActiveCaptionChanged { .. } => "active-caption-changed",
            SessionEvent::CaptionsReplaced { .. } => "captions-replaced",
            SessionEvent::LoadingChanged { .. } => "loading-changed",
            SessionEvent::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to every subscriber
    pub fn emit(&self, event: SessionEvent) {
        let name = event.name();
        // Having no subscriber is normal for the CLI
        match self.sender.send(event) {
            Ok(receivers) => debug!("Emitted event {} to {} receivers", name, receivers),
            Err(_) => debug!("No receivers for event {}", name),
        }
    }

    pub fn emit_error(&self, err: &AppError) {
        error!("{}", err);
        self.emit(SessionEvent::Error {
            message: err.to_string(),
            kind: err.kind().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(SessionEvent::LoadingChanged { loading: true });
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::LoadingChanged { loading: true });
    }

    #[test]
    fn test_emit_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.emit(SessionEvent::TimeUpdated { time: 1.0 });
    }

    #[tokio::test]
    async fn test_error_event_payload() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit_error(&AppError::ValidationError("Please enter a YouTube URL".to_string()));

        let event = rx.recv().await.unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Please enter a YouTube URL");
        assert_eq!(value["type"], "validation");
    }
}
