use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SUCCESS_MESSAGE: &str = "Successfully processed Kinesis records";

/// The event Lambda hands us for a Kinesis event source mapping.
///
/// `aws_lambda_events` decodes `kinesis.data` from base64 while deserializing, which
/// would turn one bad record into a failed invocation. We keep the raw text instead and
/// let the decoder deal with it per record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KinesisStreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<KinesisEventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisEventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_version: Option<String>,
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoke_identity_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(rename = "eventSourceARN", default, skip_serializing_if = "Option::is_none")]
    pub event_source_arn: Option<String>,
    pub kinesis: KinesisRecord,
    /// Anything else Lambda sent, kept so failed records are logged as delivered.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinesis_schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    /// Base64 text of the gzipped CloudWatch Logs payload.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_arrival_timestamp: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a CloudWatch Logs subscription writes into the stream, once unwrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsData {
    pub owner: String,
    pub log_group: String,
    pub log_stream: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_filters: Option<Vec<String>>,
    pub message_type: String,
    pub log_events: Vec<LogEntry>,
    /// Set to `ACCOUNT_LEVEL_POLICY` on account-level subscription deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    /// Top-level fields we don't model; they pass through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// Milliseconds since the epoch.
    pub timestamp: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLogsData {
    pub owner: String,
    pub log_group: String,
    pub log_stream: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_filters: Option<Vec<String>>,
    pub message_type: String,
    pub log_events: Vec<EnrichedLogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub number_of_log_events: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLogEntry {
    pub event_number: usize,
    pub id: String,
    pub timestamp: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    message: &'a str,
}

impl HandlerResponse {
    pub fn success() -> Result<HandlerResponse, serde_json::Error> {
        Ok(HandlerResponse {
            status_code: 200,
            body: serde_json::to_string(&SuccessBody { message: SUCCESS_MESSAGE })?,
        })
    }
}
