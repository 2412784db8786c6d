//! Next-slot allocation for a single new item
//!
//! The allocator walks forward day by day from a starting cursor and returns
//! the first slot that respects both caps:
//!
//! - the **period cap**: at most `frequency` items per period bucket
//! - the **per-day cap**: the period's frequency spread over its allowed days
//!
//! | period  | per-day cap                                   |
//! |---------|-----------------------------------------------|
//! | daily   | `frequency`                                   |
//! | weekly  | `ceil(frequency / allowed_days)`              |
//! | monthly | `ceil(frequency / (allowed_days * 4))`        |
//!
//! Slots on a day are handed out at 09:00, 11:00, 13:00, ... UTC. A date is
//! full once the next slot would fall at or after 24:00, whatever the cadence
//! allows, so a slot always lands on the date that granted it.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::cadence::{CadencePeriod, PublishingCadence};
use super::error::{SchedulerError, SchedulerResult};
use super::period::{days_from, format_timestamp, midnight, PeriodKey};
use super::snapshot::{CapacityLedger, ScheduledItemSnapshot};
use crate::config::EngineSettings;

/// Maximum items a single calendar date may hold
pub fn per_day_capacity(cadence: &PublishingCadence, settings: &EngineSettings) -> u32 {
    let days = cadence.num_allowed_days() as u32;

    match cadence.period {
        CadencePeriod::Daily => cadence.frequency,
        CadencePeriod::Weekly => cadence.frequency.div_ceil(days.max(1)),
        CadencePeriod::Monthly => cadence
            .frequency
            .div_ceil(days.saturating_mul(settings.monthly_weeks_divisor).max(1)),
    }
}

/// A slot picked by the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Calendar date whose capacity the slot consumes
    date: NaiveDate,
    at: DateTime<Utc>,
}

/// Finds the next open publish slot under a cadence
#[derive(Debug, Clone, Default)]
pub struct SlotAllocator {
    settings: EngineSettings,
}

impl SlotAllocator {
    /// Create an allocator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with custom settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Earliest slot for one new item
    ///
    /// Returns `Ok(None)` when the cadence allows no weekday, and
    /// [`SchedulerError::IterationLimitExceeded`] when no slot turns up within
    /// `max_iterations` days.
    pub fn next_available_slot(
        &self,
        cadence: &PublishingCadence,
        items: &[ScheduledItemSnapshot],
        now: DateTime<Utc>,
    ) -> SchedulerResult<Option<DateTime<Utc>>> {
        if !cadence.is_schedulable() {
            tracing::debug!(cadence = %cadence, "Cadence allows no weekday, no slot possible");
            return Ok(None);
        }

        let ledger = CapacityLedger::from_snapshots(items, cadence.period);
        let slot = self.find_slot(cadence, &ledger, now)?;
        Ok(Some(slot.at))
    }

    /// Greedily allocate `count` new items one after another
    ///
    /// Each allocated slot is counted before the next lookup, so the result
    /// matches `count` calls to [`Self::next_available_slot`] with every
    /// returned slot persisted in between.
    pub fn allocate_sequence(
        &self,
        cadence: &PublishingCadence,
        items: &[ScheduledItemSnapshot],
        now: DateTime<Utc>,
        count: usize,
    ) -> SchedulerResult<Vec<DateTime<Utc>>> {
        if !cadence.is_schedulable() {
            return Ok(Vec::new());
        }

        let mut ledger = CapacityLedger::from_snapshots(items, cadence.period);
        let mut slots = Vec::with_capacity(count);

        for _ in 0..count {
            let slot = self.find_slot(cadence, &ledger, now)?;
            ledger.record_on(slot.date);
            slots.push(slot.at);
        }

        Ok(slots)
    }

    /// Slot time for the `used`-th item on `date`
    fn slot_time(&self, date: NaiveDate, used: u32) -> DateTime<Utc> {
        let hours = i64::from(self.settings.first_slot_hour)
            + i64::from(used) * i64::from(self.settings.slot_spacing_hours);
        midnight(date) + Duration::hours(hours)
    }

    /// Today while its first slot is still ahead, tomorrow otherwise
    fn first_candidate_day(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        let today = now.date_naive();
        if now < self.slot_time(today, 0) {
            Some(today)
        } else {
            today.succ_opt()
        }
    }

    fn find_slot(
        &self,
        cadence: &PublishingCadence,
        ledger: &CapacityLedger,
        now: DateTime<Utc>,
    ) -> SchedulerResult<Slot> {
        let limit = self.settings.max_iterations;
        let day_capacity =
            per_day_capacity(cadence, &self.settings).min(self.settings.slots_per_day());

        let start = self
            .first_candidate_day(now)
            .ok_or_else(|| SchedulerError::calendar_exhausted("next_available_slot"))?;

        let mut walked = 0u32;
        for day in days_from(start).take(limit as usize) {
            walked += 1;
            if !cadence.allows(day) {
                continue;
            }

            let key = PeriodKey::for_date(day, cadence.period);
            if ledger.used_in(&key) >= cadence.frequency {
                continue;
            }

            let used_on_date = ledger.used_on(day);
            if used_on_date < day_capacity {
                let at = self.slot_time(day, used_on_date);
                tracing::debug!(
                    period = %key,
                    used_on_date,
                    day_capacity,
                    slot = %format_timestamp(at),
                    "Allocated publish slot"
                );
                return Ok(Slot { date: day, at });
            }
        }

        if walked < limit {
            return Err(SchedulerError::calendar_exhausted("next_available_slot"));
        }

        tracing::warn!(
            cadence = %cadence,
            limit,
            "No publish slot found within iteration limit"
        );
        Err(SchedulerError::iteration_limit("next_available_slot", limit))
    }
}

/// Next open slot using the default engine settings
pub fn compute_next_available_slot(
    cadence: &PublishingCadence,
    items: &[ScheduledItemSnapshot],
    now: DateTime<Utc>,
) -> SchedulerResult<Option<DateTime<Utc>>> {
    SlotAllocator::new().next_available_slot(cadence, items, now)
}

// ============================================================================
// Tests
// ============================================================================
