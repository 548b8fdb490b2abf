use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("Could not base64 decode record data: {}", source))]
    Encoding { source: base64::DecodeError },
    #[snafu(display("Could not decompress record data as gzip: {}", source))]
    Compression { source: std::io::Error },
    #[snafu(display("Could not parse CloudWatch Logs data: {}", source))]
    Parse { source: serde_json::Error },
}

impl DecodeError {
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::Encoding { .. } => "encoding",
            DecodeError::Compression { .. } => "compression",
            DecodeError::Parse { .. } => "parse",
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransformError {
    #[snafu(display(
        "Log event {} has timestamp {} which is not a representable date",
        id,
        timestamp
    ))]
    TimestampOutOfRange { id: String, timestamp: u64 },
}

/// Everything that can go wrong with a single Kinesis record.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RecordError {
    #[snafu(display("{}", source))]
    Decode { source: DecodeError },
    #[snafu(display("{}", source))]
    Transform { source: TransformError },
}

impl RecordError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Decode { source } => match source {
                DecodeError::Encoding { .. } => "EncodingError",
                DecodeError::Compression { .. } => "CompressionError",
                DecodeError::Parse { .. } => "ShapeError",
            },
            RecordError::Transform { .. } => "UnexpectedFault",
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("Invalid log level {:?} in {}", value, variable))]
    InvalidLogLevel { variable: String, value: String },
    #[snafu(display("Invalid log format {:?} in {}, expected json or text", value, variable))]
    InvalidLogFormat { variable: String, value: String },
}
