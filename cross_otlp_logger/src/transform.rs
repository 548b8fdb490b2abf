use chrono::{DateTime, Datelike};
use snafu::OptionExt;

use crate::error::{TimestampOutOfRangeSnafu, TransformError};
use crate::model::{EnrichedLogEntry, EnrichedLogsData, LogEntry, LogsData};

/// Numbers the log events from 1 and swaps each millisecond timestamp for its
/// ISO 8601 rendering. The numeric timestamp is not kept.
pub fn enrich(mut batch: LogsData) -> Result<EnrichedLogsData, TransformError> {
    batch.extra.remove("numberOfLogEvents");
    let number_of_log_events = batch.log_events.len();
    let log_events = batch
        .log_events
        .into_iter()
        .enumerate()
        .map(|(index, entry)| enrich_entry(index + 1, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EnrichedLogsData {
        owner: batch.owner,
        log_group: batch.log_group,
        log_stream: batch.log_stream,
        subscription_filters: batch.subscription_filters,
        message_type: batch.message_type,
        log_events,
        policy_level: batch.policy_level,
        extra: batch.extra,
        number_of_log_events,
    })
}

fn enrich_entry(event_number: usize, entry: LogEntry) -> Result<EnrichedLogEntry, TransformError> {
    let timestamp = render_timestamp(entry.timestamp).context(TimestampOutOfRangeSnafu {
        id: entry.id.as_str(),
        timestamp: entry.timestamp,
    })?;
    Ok(EnrichedLogEntry {
        event_number,
        id: entry.id,
        timestamp,
        message: entry.message,
    })
}

/// Latest instant a JavaScript `Date` can hold, in epoch milliseconds.
pub const MAX_TIMESTAMP_MILLIS: u64 = 8_640_000_000_000_000;

/// Renders epoch milliseconds as e.g. `1970-01-01T00:00:00.000Z`.
///
/// Years past 9999 use the expanded `+YYYYYY` form, as `Date.toISOString` does.
/// chrono stops at year 262143, so the last stretch below `MAX_TIMESTAMP_MILLIS`
/// is not renderable either.
pub fn render_timestamp(millis: u64) -> Option<String> {
    if millis > MAX_TIMESTAMP_MILLIS {
        return None;
    }
    let t = DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)?;
    let rest = t.format("%m-%dT%H:%M:%S%.3fZ");
    Some(if t.year() > 9999 {
        format!("+{:06}-{}", t.year(), rest)
    } else {
        format!("{:04}-{}", t.year(), rest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn entry(id: &str, timestamp: u64, message: &str) -> LogEntry {
        LogEntry {
            id: id.to_string(),
            timestamp,
            message: message.to_string(),
        }
    }

    fn batch(log_events: Vec<LogEntry>) -> LogsData {
        LogsData {
            owner: "111111111111".to_string(),
            log_group: "/test".to_string(),
            log_stream: "s1".to_string(),
            subscription_filters: None,
            message_type: "DATA_MESSAGE".to_string(),
            log_events,
            policy_level: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_render_epoch() {
        assert_eq!(render_timestamp(0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(render_timestamp(86_400_000).unwrap(), "1970-01-02T00:00:00.000Z");
        assert_eq!(render_timestamp(1735689600123).unwrap(), "2025-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_render_expanded_years() {
        assert_eq!(render_timestamp(253402300799999).unwrap(), "9999-12-31T23:59:59.999Z");
        assert_eq!(render_timestamp(253402300800000).unwrap(), "+010000-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_render_out_of_range() {
        assert!(render_timestamp(MAX_TIMESTAMP_MILLIS + 1).is_none());
        assert!(render_timestamp(u64::MAX).is_none());
        assert!(render_timestamp(i64::MAX as u64).is_none());
    }

    #[test]
    fn test_event_numbers_follow_input_order() {
        let enriched = enrich(batch(vec![
            entry("c", 30, "third"),
            entry("a", 10, "first"),
            entry("b", 20, "second"),
        ]))
        .unwrap();
        assert_eq!(enriched.number_of_log_events, 3);
        let numbered: Vec<(usize, &str)> = enriched
            .log_events
            .iter()
            .map(|e| (e.event_number, e.id.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "c"), (2, "a"), (3, "b")]);
    }

    #[test]
    fn test_empty_batch() {
        let enriched = enrich(batch(vec![])).unwrap();
        assert_eq!(enriched.number_of_log_events, 0);
        assert!(enriched.log_events.is_empty());
    }

    #[test]
    fn test_passes_fields_through() {
        let mut input = batch(vec![entry("1", 0, "  {\"nested\": true}\r\n")]);
        input.subscription_filters = Some(vec!["f1".to_string()]);
        input.policy_level = Some("ACCOUNT_LEVEL_POLICY".to_string());
        input.extra.insert("region".to_string(), json!("eu-west-1"));
        input.extra.insert("tags".to_string(), json!({"team": "obs"}));
        let enriched = enrich(input).unwrap();
        assert_eq!(enriched.extra["region"], "eu-west-1");
        assert_eq!(enriched.extra["tags"], json!({"team": "obs"}));
        assert_eq!(enriched.owner, "111111111111");
        assert_eq!(enriched.log_group, "/test");
        assert_eq!(enriched.log_stream, "s1");
        assert_eq!(enriched.subscription_filters, Some(vec!["f1".to_string()]));
        assert_eq!(enriched.policy_level.as_deref(), Some("ACCOUNT_LEVEL_POLICY"));
        assert_eq!(enriched.log_events[0].message, "  {\"nested\": true}\r\n");
    }

    #[test]
    fn test_absent_optional_fields_stay_absent() {
        let enriched = enrich(batch(vec![entry("1", 0, "hello")])).unwrap();
        assert_eq!(
            serde_json::to_value(&enriched).unwrap(),
            json!({
                "owner": "111111111111",
                "logGroup": "/test",
                "logStream": "s1",
                "messageType": "DATA_MESSAGE",
                "logEvents": [{
                    "eventNumber": 1,
                    "id": "1",
                    "timestamp": "1970-01-01T00:00:00.000Z",
                    "message": "hello"
                }],
                "numberOfLogEvents": 1
            })
        );
    }

    #[test]
    fn test_stale_event_count_is_replaced() {
        let mut input = batch(vec![entry("1", 0, "hello")]);
        input.extra.insert("numberOfLogEvents".to_string(), json!(99));
        let value = serde_json::to_value(enrich(input).unwrap()).unwrap();
        assert_eq!(value["numberOfLogEvents"], 1);
    }

    #[test]
    fn test_out_of_range_timestamp_fails() {
        let err = enrich(batch(vec![entry("1", 0, "ok"), entry("2", u64::MAX, "bad")])).unwrap_err();
        match err {
            TransformError::TimestampOutOfRange { id, timestamp } => {
                assert_eq!(id, "2");
                assert_eq!(timestamp, u64::MAX);
            }
        }
    }
}
