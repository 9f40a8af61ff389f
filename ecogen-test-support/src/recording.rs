//! A `tracing` layer that records closed spans and emitted events.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
};

/// A closed span with the fields recorded against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the metadata.
    pub name: String,
    /// Field values rendered as strings.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Value of `field`, if it was recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// An emitted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Field values rendered as strings; the message lives under `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// The event's message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }

    /// Value of `field`, if it was recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

#[derive(Default)]
struct Captured {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// Records spans in closing order and events in emission order.
///
/// Clones share one buffer, so a test keeps a clone to inspect after
/// installing the layer.
///
/// # Examples
/// ```
/// use ecogen_test_support::recording::capture;
///
/// let ((), layer) = capture(|| {
///     let _span = tracing::info_span!("work", items = 3).entered();
///     tracing::info!("started");
/// });
/// assert_eq!(layer.span("work").and_then(|s| s.field("items").map(str::to_owned)), Some("3".to_owned()));
/// assert_eq!(layer.events_with_message("started").len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    captured: Arc<Mutex<Captured>>,
}

impl RecordingLayer {
    fn lock(&self) -> MutexGuard<'_, Captured> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the closed spans.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.lock().spans.clone()
    }

    /// Snapshot of the emitted events.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.lock().events.clone()
    }

    /// The first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        self.lock().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Events whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }

    /// Events emitted at `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

/// Runs `work` under a registry carrying a fresh [`RecordingLayer`] and
/// returns its output with the layer.
pub fn capture<T>(work: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let output = tracing::subscriber::with_default(subscriber, work);
    (output, layer)
}

struct OpenSpan(SpanRecord);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut Fields(&mut fields));
        span.extensions_mut().insert(OpenSpan(SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields,
        }));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(OpenSpan(record)) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut Fields(&mut record.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let closed = span.extensions_mut().remove::<OpenSpan>();
        if let Some(OpenSpan(record)) = closed {
            self.lock().spans.push(record);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut Fields(&mut fields));
        self.lock().events.push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }
}

struct Fields<'a>(&'a mut HashMap<String, String>);

impl Fields<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Fields<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn spans_are_recorded_on_close_with_late_fields() {
        let ((), layer) = capture(|| {
            let span = tracing::info_span!("outer", size = 4_u64, label = tracing::field::Empty);
            span.record("label", "late");
            drop(span.entered());
        });
        let outer = layer.span("outer").expect("outer span closed");
        assert_eq!(outer.field("size"), Some("4"));
        assert_eq!(outer.field("label"), Some("late"));
    }

    #[rstest]
    #[case(Level::INFO, 1)]
    #[case(Level::DEBUG, 2)]
    #[case(Level::WARN, 0)]
    fn events_filter_by_level(#[case] level: Level, #[case] expected: usize) {
        let ((), layer) = capture(|| {
            tracing::debug!(step = 1, "stepping");
            tracing::debug!(step = 2, "stepping");
            tracing::info!(ratio = 0.5, "done");
        });
        assert_eq!(layer.events_at(level).len(), expected);
        assert_eq!(layer.events().len(), 3);
    }

    #[test]
    fn event_fields_keep_their_values() {
        let ((), layer) = capture(|| tracing::info!(ratio = 0.5, ok = true, "done"));
        let done = layer.events_with_message("done");
        let event = done.first().expect("event recorded");
        assert_eq!(event.field("ratio"), Some("0.5"));
        assert_eq!(event.field("ok"), Some("true"));
    }

    #[test]
    fn uninstalled_layer_stays_empty() {
        let layer = RecordingLayer::default();
        tracing::info!("ignored");
        assert!(layer.spans().is_empty());
        assert!(layer.events().is_empty());
    }
}
