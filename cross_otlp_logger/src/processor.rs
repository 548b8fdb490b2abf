use lambda_runtime::{Error, LambdaEvent};
use serde_json::json;
use snafu::ResultExt;
use tracing::{debug, Level};

use crate::decode::decode_record;
use crate::emitter::Emitter;
use crate::error::{DecodeSnafu, RecordError, TransformSnafu};
use crate::model::{EnrichedLogsData, HandlerResponse, KinesisEventRecord, KinesisStreamEvent};
use crate::transform::enrich;

pub const RECEIVED_EVENT: &str = "Received Kinesis event";
pub const PROCESSED_RECORD: &str = "Processed CloudWatch Logs data";
pub const FAILED_RECORD: &str = "Error processing Kinesis record";

#[derive(Debug)]
pub enum RecordOutcome {
    Processed(EnrichedLogsData),
    Failed(RecordError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(mut self, outcome: &RecordOutcome) -> Self {
        match outcome {
            RecordOutcome::Processed(_) => self.processed += 1,
            RecordOutcome::Failed(_) => self.failed += 1,
        }
        self
    }
}

pub fn process_record(record: &KinesisEventRecord) -> RecordOutcome {
    let result = decode_record(&record.kinesis.data)
        .context(DecodeSnafu)
        .and_then(|batch| enrich(batch).context(TransformSnafu));
    match result {
        Ok(enriched) => RecordOutcome::Processed(enriched),
        Err(e) => RecordOutcome::Failed(e),
    }
}

/// Runs every record through decode and enrich, emitting one entry per record.
///
/// A failing record is logged together with its raw form and skipped; it never stops
/// the rest of the batch. Kinesis would otherwise redeliver the whole batch forever,
/// since a payload that fails to decode once will fail every time.
pub fn process_records(emitter: &dyn Emitter, records: &[KinesisEventRecord]) -> BatchSummary {
    emitter.emit(Level::INFO, RECEIVED_EVENT, json!({ "recordCount": records.len() }));

    records.iter().fold(BatchSummary::default(), |summary, record| {
        let outcome = process_record(record);
        match &outcome {
            RecordOutcome::Processed(enriched) => emitter.emit(
                Level::INFO,
                PROCESSED_RECORD,
                json!({ "cloudWatchLogsData": enriched }),
            ),
            RecordOutcome::Failed(e) => emitter.emit(
                Level::ERROR,
                FAILED_RECORD,
                json!({
                    "error": e.to_string(),
                    "kind": e.kind(),
                    "record": record,
                }),
            ),
        }
        summary.record(&outcome)
    })
}

pub async fn function_handler(
    emitter: &dyn Emitter,
    event: LambdaEvent<KinesisStreamEvent>,
) -> Result<HandlerResponse, Error> {
    let summary = process_records(emitter, &event.payload.records);
    debug!(
        request_id = %event.context.request_id,
        processed = summary.processed,
        failed = summary.failed,
        "finished kinesis batch"
    );
    Ok(HandlerResponse::success()?)
}
