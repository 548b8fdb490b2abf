use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::MultiGzDecoder;
use snafu::ResultExt;

use crate::error::{CompressionSnafu, DecodeError, EncodingSnafu, ParseSnafu};
use crate::model::LogsData;

/// Unwraps one Kinesis record payload: base64, then gzip, then JSON.
pub fn decode_record(data: &str) -> Result<LogsData, DecodeError> {
    let buf = STANDARD.decode(data.as_bytes()).context(EncodingSnafu)?;
    let decompressed = decode_gzip(&buf).context(CompressionSnafu)?;
    serde_json::from_slice(&decompressed).context(ParseSnafu)
}

fn decode_gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    if data.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "record data is empty",
        ));
    }

    let mut decoded = Vec::new();
    let mut gz = MultiGzDecoder::new(data);
    gz.read_to_end(&mut decoded)?;

    Ok(decoded)
}
