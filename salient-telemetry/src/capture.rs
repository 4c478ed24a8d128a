//! In-memory event capture for asserting on emitted logs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedEvent {
    /// Level name, e.g. `INFO`.
    pub level: String,
    /// Module path that emitted the event.
    pub target: String,
    /// The event's message, if it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured fields other than the message.
    pub fields: HashMap<String, serde_json::Value>,
}

impl CapturedEvent {
    /// A field value, if present.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }
}

/// Shared, cloneable storage of captured events.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<CapturedEvent>>>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured event, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Events whose message equals `message`.
    pub fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.message.as_deref() == Some(message)).collect()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.events.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, event: CapturedEvent) {
        self.events.write().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

/// A layer that records every event it sees into an [`EventStore`].
pub struct CaptureLayer {
    store: EventStore,
}

impl CaptureLayer {
    /// Record into `store`.
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        let mut fields = visitor.0;
        let message = match fields.remove("message") {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
            None => None,
        };

        let metadata = event.metadata();
        self.store.push(CapturedEvent {
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message,
            fields,
        });
    }
}

/// Run `f` with a thread-local subscriber that captures every event, and
/// return its result together with the captured events.
///
/// ```rust
/// let (value, events) = salient_telemetry::capture(|| {
///     tracing::info!(answer = 42, "computed");
///     7
/// });
/// assert_eq!(value, 7);
/// assert_eq!(events.with_message("computed")[0].field("answer"), Some(&serde_json::json!(42)));
/// ```
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, EventStore) {
    let store = EventStore::new();
    let subscriber = Registry::default().with(CaptureLayer::new(store.clone()));
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, store)
}

#[derive(Default)]
struct JsonVisitor(HashMap<String, serde_json::Value>);

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), serde_json::Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }
}
