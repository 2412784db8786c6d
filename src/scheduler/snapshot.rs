//! Snapshots of already-scheduled items and the capacity they consume
//!
//! Snapshots are read-only views handed in by the caller. Entries whose
//! `scheduledFor` is missing or unparseable are skipped rather than rejected,
//! so dirty historical rows never block scheduling.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::cadence::CadencePeriod;
use super::period::{parse_timestamp, PeriodKey};

// ============================================================================
// Item Status
// ============================================================================

/// Lifecycle status of a scheduled content item
///
/// Unknown statuses are kept verbatim in `Other`; they still occupy capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    Queued,
    Scheduled,
    Published,
    Other(String),
}

impl ItemStatus {
    pub fn id(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for ItemStatus {
    fn from(value: &str) -> Self {
        match value {
            "queued" => Self::Queued,
            "scheduled" => Self::Scheduled,
            "published" => Self::Published,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ItemStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" | "scheduled" | "published" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Other(raw) => raw,
            known => known.id().to_string(),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Scheduled Item Snapshot
// ============================================================================

/// Point-in-time view of one item already on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItemSnapshot {
    pub status: ItemStatus,

    /// ISO-8601 timestamp; may be null or malformed in stored data
    #[serde(default)]
    pub scheduled_for: Option<String>,
}

impl ScheduledItemSnapshot {
    pub fn new(status: ItemStatus, scheduled_for: impl Into<String>) -> Self {
        Self {
            status,
            scheduled_for: Some(scheduled_for.into()),
        }
    }

    /// Snapshot with no scheduled time
    pub fn unscheduled(status: ItemStatus) -> Self {
        Self {
            status,
            scheduled_for: None,
        }
    }

    /// Parsed `scheduled_for`, if present and valid
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for.as_deref().and_then(parse_timestamp)
    }
}

// ============================================================================
// Capacity Ledger
// ============================================================================

/// Item counts per calendar date and per period bucket
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    period: CadencePeriod,
    by_date: HashMap<NaiveDate, u32>,
    by_period: HashMap<PeriodKey, u32>,
    ignored: usize,
}

impl CapacityLedger {
    /// Create an empty ledger bucketing by `period`
    pub fn new(period: CadencePeriod) -> Self {
        Self {
            period,
            by_date: HashMap::new(),
            by_period: HashMap::new(),
            ignored: 0,
        }
    }

    /// Build a ledger from snapshots, skipping unparseable entries
    pub fn from_snapshots(items: &[ScheduledItemSnapshot], period: CadencePeriod) -> Self {
        let mut ledger = Self::new(period);

        for item in items {
            match item.scheduled_at() {
                Some(at) => ledger.record(at),
                None => {
                    ledger.ignored += 1;
                    tracing::debug!(
                        status = %item.status,
                        scheduled_for = ?item.scheduled_for,
                        "Ignoring snapshot without a parseable schedule time"
                    );
                }
            }
        }

        ledger
    }

    /// Count one item at `at`
    pub fn record(&mut self, at: DateTime<Utc>) {
        self.record_on(at.date_naive());
    }

    /// Count one item against `date`
    pub fn record_on(&mut self, date: NaiveDate) {
        *self.by_date.entry(date).or_insert(0) += 1;
        *self
            .by_period
            .entry(PeriodKey::for_date(date, self.period))
            .or_insert(0) += 1;
    }

    /// Items already on `date`
    pub fn used_on(&self, date: NaiveDate) -> u32 {
        self.by_date.get(&date).copied().unwrap_or(0)
    }

    /// Items already in the period bucket `key`
    pub fn used_in(&self, key: &PeriodKey) -> u32 {
        self.by_period.get(key).copied().unwrap_or(0)
    }

    /// Number of snapshots skipped for a missing or invalid time
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Number of snapshots counted
    pub fn total(&self) -> u32 {
        self.by_date.values().sum()
    }

    pub fn period(&self) -> CadencePeriod {
        self.period
    }
}

// ============================================================================
// Tests
// ============================================================================
