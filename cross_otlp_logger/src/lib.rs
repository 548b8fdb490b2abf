pub mod config;
pub mod decode;
pub mod emitter;
pub mod error;
pub mod format;
pub mod model;
pub mod processor;
pub mod transform;

pub use emitter::{Emitter, TracingEmitter};
pub use format::JsonLines;
pub use model::{HandlerResponse, KinesisStreamEvent};
pub use processor::{function_handler, process_records, BatchSummary};
