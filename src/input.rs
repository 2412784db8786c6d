//! Loading engine inputs from disk
//!
//! Cadences and item snapshots arrive as the JSON documents the platform
//! stores. A cadence is validated on load, so a zero frequency is rejected
//! here instead of exhausting the engine's iteration bound.

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::error::{Error, InputKind, Result};
use crate::scheduler::{parse_timestamp, PublishingCadence, ScheduledItemSnapshot};

/// Read and validate a cadence document
pub fn load_cadence(path: &Path) -> Result<PublishingCadence> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::read(InputKind::Cadence, path, e))?;
    let cadence: PublishingCadence = serde_json::from_str(&content)
        .map_err(|e| Error::parse(InputKind::Cadence, path, e))?;

    cadence.validate()?;
    Ok(cadence)
}

/// Read item snapshots; no file means no existing items
pub fn load_items(path: Option<&Path>) -> Result<Vec<ScheduledItemSnapshot>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| Error::read(InputKind::Items, path, e))?;
    let items: Vec<ScheduledItemSnapshot> =
        serde_json::from_str(&content).map_err(|e| Error::parse(InputKind::Items, path, e))?;

    tracing::debug!(path = %path.display(), count = items.len(), "Loaded item snapshots");
    Ok(items)
}

/// Parse an explicit reference time
pub fn parse_reference_time(value: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(value).ok_or_else(|| Error::InvalidTimestamp {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{CadencePeriod, PublishDay, SchedulerError};
    use std::io::Write;

    fn json_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_cadence() {
        let file = json_file(r#"{"period":"weekly","frequency":3,"allowedDays":["mon","wed"]}"#);
        let cadence = load_cadence(file.path()).unwrap();

        assert_eq!(cadence.period, CadencePeriod::Weekly);
        assert_eq!(cadence.frequency, 3);
        assert!(cadence.allowed_days.contains(&PublishDay::Wed));
    }

    #[test]
    fn test_load_cadence_rejects_zero_frequency() {
        let file = json_file(r#"{"period":"daily","frequency":0,"allowedDays":["mon"]}"#);
        let err = load_cadence(file.path()).unwrap_err();

        assert!(matches!(
            err,
            Error::Scheduler(SchedulerError::InvalidCadence { .. })
        ));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_load_cadence_missing_file() {
        let err = load_cadence(Path::new("no/such/cadence.json")).unwrap_err();
        assert!(matches!(
            err,
            Error::Read {
                kind: InputKind::Cadence,
                ..
            }
        ));
    }

    #[test]
    fn test_load_items_bad_json() {
        let file = json_file(r#"{"status":"scheduled"}"#);
        let err = load_items(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                kind: InputKind::Items,
                ..
            }
        ));
    }

    #[test]
    fn test_load_items_keeps_dirty_rows() {
        let file = json_file(
            r#"[{"status":"scheduled","scheduledFor":"2026-01-05T09:00:00.000Z"},
                {"status":"queued"},
                {"status":"published","scheduledFor":"not a date"}]"#,
        );
        let items = load_items(Some(file.path())).unwrap();
        assert_eq!(items.len(), 3);
        assert!(load_items(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_reference_time() {
        let now = parse_reference_time("2026-01-05T08:00:00Z").unwrap();
        assert_eq!(now.to_rfc3339(), "2026-01-05T08:00:00+00:00");

        let err = parse_reference_time("next tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { .. }));
    }
}
