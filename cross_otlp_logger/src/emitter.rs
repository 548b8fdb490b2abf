use serde_json::Value;
use tracing::Level;

/// Sink for the structured entries the processor produces.
///
/// Built once in `main` and borrowed by every invocation.
pub trait Emitter: Send + Sync {
    fn emit(&self, level: Level, message: &str, fields: Value);
}

/// Writes entries as `tracing` events tagged with the service name.
///
/// `fields` travels as the `payload` field; under `JsonLines` it lands as nested
/// JSON at the top level of the line.
#[derive(Debug, Clone)]
pub struct TracingEmitter {
    service: String,
}

impl TracingEmitter {
    pub fn new<T: Into<String>>(service: T) -> TracingEmitter {
        Self {
            service: service.into(),
        }
    }
}

impl Emitter for TracingEmitter {
    fn emit(&self, level: Level, message: &str, fields: Value) {
        let service = self.service.as_str();
        let payload = fields.to_string();
        let payload = payload.as_str();
        // tracing levels must be known at compile time.
        match level {
            Level::ERROR => tracing::error!(service, payload, "{}", message),
            Level::WARN => tracing::warn!(service, payload, "{}", message),
            Level::INFO => tracing::info!(service, payload, "{}", message),
            Level::DEBUG => tracing::debug!(service, payload, "{}", message),
            _ => tracing::trace!(service, payload, "{}", message),
        }
    }
}
