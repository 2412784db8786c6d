//! Common test utilities

use cadence_engine::scheduler::{
    CadencePeriod, ItemStatus, PublishDay, PublishingCadence, ScheduledItemSnapshot,
};
use chrono::{DateTime, TimeZone, Utc};

/// UTC timestamp on the hour
#[allow(dead_code)]
pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Cadence from a period, frequency and day codes
#[allow(dead_code)]
pub fn cadence(period: CadencePeriod, frequency: u32, days: &[&str]) -> PublishingCadence {
    PublishingCadence::new(period, frequency).with_days(
        days.iter()
            .map(|d| PublishDay::from_id(d).expect("valid day code")),
    )
}

/// Scheduled snapshot at the given timestamp string
#[allow(dead_code)]
pub fn scheduled(ts: &str) -> ScheduledItemSnapshot {
    ScheduledItemSnapshot::new(ItemStatus::Scheduled, ts)
}

/// Snapshots at `09:00 + 2h * i` on the given date
#[allow(dead_code)]
pub fn day_items(y: i32, m: u32, d: u32, count: u32) -> Vec<ScheduledItemSnapshot> {
    (0..count)
        .map(|i| {
            let at = utc(y, m, d, 9 + 2 * i);
            ScheduledItemSnapshot::new(
                ItemStatus::Published,
                cadence_engine::scheduler::format_timestamp(at),
            )
        })
        .collect()
}
