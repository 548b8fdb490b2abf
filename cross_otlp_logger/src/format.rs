use std::fmt::{self, Debug};

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Field whose value is a JSON object to splice into the top level of the line.
pub const PAYLOAD_FIELD: &str = "payload";

/// Writes each event as one JSON object: `level`, `message`, then the event's fields.
///
/// A `payload` field holding a JSON object is merged in key by key rather than
/// written as an escaped string, so the backend can query into it.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLines;

impl<S, N> FormatEvent<S, N> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MakeJsonLine::default();
        event.record(&mut visitor);

        let mut line = Map::new();
        line.insert("level".to_string(), Value::String(event.metadata().level().to_string()));
        if let Some(message) = visitor.message {
            line.insert("message".to_string(), Value::String(message));
        }
        line.extend(visitor.fields);

        let encoded = serde_json::to_string(&line).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", encoded)
    }
}

#[derive(Debug, Default)]
struct MakeJsonLine {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl MakeJsonLine {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for MakeJsonLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == PAYLOAD_FIELD {
            if let Ok(Value::Object(payload)) = serde_json::from_str(value) {
                self.fields.extend(payload);
                return;
            }
        }
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.insert(field, Value::String(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}
