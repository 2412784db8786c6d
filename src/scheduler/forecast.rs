//! Completion forecasting for content strategy phases
//!
//! The forecaster answers "by when will this batch be placed?". It is a coarse
//! throughput model: a single day may absorb everything left in its period,
//! so only the period-level `frequency` cap applies. This intentionally
//! differs from [`SlotAllocator`](super::allocator::SlotAllocator), which
//! spreads items across allowed days.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use super::cadence::{PublishDay, PublishingCadence};
use super::error::{SchedulerError, SchedulerResult};
use super::period::{days_from, midnight, PeriodKey};
use crate::config::EngineSettings;

// ============================================================================
// Phase Status
// ============================================================================

/// Lifecycle status of a strategy phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Suggestion,
    Planned,
    InProgress,
    Observing,
    Completed,
    Dismissed,
}

impl PhaseStatus {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Observing => "observing",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }

    /// Suggestions are not committed to a schedule yet
    pub fn is_committed(&self) -> bool {
        !matches!(self, Self::Suggestion)
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PhaseStatus {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "suggestion" => Ok(Self::Suggestion),
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "observing" => Ok(Self::Observing),
            "completed" => Ok(Self::Completed),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(SchedulerError::invalid_phase_status(s)),
        }
    }
}

// ============================================================================
// Creation Forecast
// ============================================================================

/// Items absorbed on one day of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlacement {
    pub date: NaiveDate,
    pub placed: u32,
}

/// Result of simulating bulk placement of new items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationForecast {
    /// Items that were simulated
    pub article_count: u32,

    /// Days that absorbed at least one item, in order
    pub placements: Vec<DailyPlacement>,
}

impl CreationForecast {
    /// Day the last item lands on
    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.placements.last().map(|p| p.date)
    }

    /// UTC midnight of [`completion_date`](Self::completion_date)
    pub fn completion_at(&self) -> Option<DateTime<Utc>> {
        self.completion_date().map(midnight)
    }

    /// Total items placed
    pub fn placed(&self) -> u32 {
        self.placements.iter().map(|p| p.placed).sum()
    }
}

// ============================================================================
// Creation Schedule Simulator
// ============================================================================

/// Greedy whole-period packing of a batch of new items
#[derive(Debug, Clone, Default)]
pub struct CreationScheduleSimulator {
    settings: EngineSettings,
}

impl CreationScheduleSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Simulate placing `article_count` items starting tomorrow
    ///
    /// A cadence without allowed days falls back to the configured default
    /// days (Monday to Friday). Fails with
    /// [`SchedulerError::IterationLimitExceeded`] when the batch cannot be
    /// placed within `max_iterations` days.
    pub fn simulate(
        &self,
        article_count: u32,
        cadence: &PublishingCadence,
        now: DateTime<Utc>,
    ) -> SchedulerResult<CreationForecast> {
        let mut forecast = CreationForecast {
            article_count,
            placements: Vec::new(),
        };
        if article_count == 0 {
            return Ok(forecast);
        }

        let allowed: BTreeSet<PublishDay> = if cadence.is_schedulable() {
            cadence.allowed_days.clone()
        } else {
            self.settings.fallback_days.iter().copied().collect()
        };

        let limit = self.settings.max_iterations;
        let mut remaining = article_count;
        let mut used_by_period: HashMap<PeriodKey, u32> = HashMap::new();

        let start = now
            .date_naive()
            .succ_opt()
            .ok_or_else(|| SchedulerError::calendar_exhausted("simulate_creations"))?;

        let mut walked = 0u32;
        for day in days_from(start).take(limit as usize) {
            walked += 1;
            if !allowed.contains(&PublishDay::of(day)) {
                continue;
            }

            let key = PeriodKey::for_date(day, cadence.period);
            let used = used_by_period.entry(key).or_insert(0);
            let available = cadence.frequency.saturating_sub(*used);

            if available > 0 {
                let placed = available.min(remaining);
                remaining -= placed;
                *used += placed;
                forecast.placements.push(DailyPlacement { date: day, placed });
            }

            if remaining == 0 {
                tracing::debug!(
                    article_count,
                    completion = %day,
                    days_used = forecast.placements.len(),
                    "Simulated creation schedule"
                );
                return Ok(forecast);
            }
        }

        if walked < limit {
            return Err(SchedulerError::calendar_exhausted("simulate_creations"));
        }

        tracing::warn!(
            cadence = %cadence,
            article_count,
            remaining,
            limit,
            "Creation schedule did not complete within iteration limit"
        );
        Err(SchedulerError::iteration_limit("simulate_creations", limit))
    }
}

// ============================================================================
// Completion Forecaster
// ============================================================================

/// Estimates when a strategy phase's planned work will be placed
#[derive(Debug, Clone, Default)]
pub struct CompletionForecaster {
    simulator: CreationScheduleSimulator,
}

impl CompletionForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            simulator: CreationScheduleSimulator::with_settings(settings),
        }
    }

    /// Target completion date for a phase
    ///
    /// - suggestions never get an estimate
    /// - new creations are simulated against the cadence (result is UTC midnight)
    /// - updates only: `now` plus the update SLA
    /// - nothing planned: no estimate
    pub fn target_completion_date(
        &self,
        phase_status: PhaseStatus,
        cadence: &PublishingCadence,
        creations_count: u32,
        updates_count: u32,
        now: DateTime<Utc>,
    ) -> SchedulerResult<Option<DateTime<Utc>>> {
        if !phase_status.is_committed() {
            return Ok(None);
        }

        if creations_count > 0 {
            let forecast = self.simulator.simulate(creations_count, cadence, now)?;
            return Ok(forecast.completion_at());
        }

        if updates_count > 0 {
            let sla = i64::from(self.simulator.settings.update_sla_days);
            return Ok(Some(now + Duration::days(sla)));
        }

        Ok(None)
    }
}

/// Target completion date using the default engine settings
pub fn compute_phase_target_completion_date(
    phase_status: PhaseStatus,
    cadence: &PublishingCadence,
    creations_count: u32,
    updates_count: u32,
    now: DateTime<Utc>,
) -> SchedulerResult<Option<DateTime<Utc>>> {
    CompletionForecaster::new().target_completion_date(
        phase_status,
        cadence,
        creations_count,
        updates_count,
        now,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::cadence::CadencePeriod;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mon_wed_weekly(frequency: u32) -> PublishingCadence {
        PublishingCadence::new(CadencePeriod::Weekly, frequency)
            .with_days([PublishDay::Mon, PublishDay::Wed])
    }

    #[test]
    fn test_phase_status_parse() {
        assert_eq!("in_progress".parse::<PhaseStatus>().unwrap(), PhaseStatus::InProgress);
        assert_eq!("In-Progress".parse::<PhaseStatus>().unwrap(), PhaseStatus::InProgress);
        assert!("archived".parse::<PhaseStatus>().is_err());
    }

    #[test]
    fn test_phase_status_serde() {
        let status: PhaseStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, PhaseStatus::InProgress);
        assert_eq!(serde_json::to_string(&PhaseStatus::Observing).unwrap(), "\"observing\"");
    }

    #[test]
    fn test_simulation_packs_whole_period_into_one_day() {
        let forecast = CreationScheduleSimulator::new()
            .simulate(3, &mon_wed_weekly(2), at(2026, 1, 5, 10))
            .unwrap();

        assert_eq!(
            forecast.placements,
            vec![
                DailyPlacement { date: date(2026, 1, 7), placed: 2 },
                DailyPlacement { date: date(2026, 1, 12), placed: 1 },
            ]
        );
        assert_eq!(forecast.placed(), 3);
        assert_eq!(forecast.completion_at(), Some(at(2026, 1, 12, 0)));
    }

    #[test]
    fn test_simulation_always_starts_tomorrow() {
        // Early morning "now" still skips today
        let cadence = PublishingCadence::new(CadencePeriod::Daily, 5)
            .with_days(PublishDay::all());
        let forecast = CreationScheduleSimulator::new()
            .simulate(1, &cadence, at(2026, 1, 5, 0))
            .unwrap();
        assert_eq!(forecast.completion_date(), Some(date(2026, 1, 6)));
    }

    #[test]
    fn test_simulation_falls_back_to_weekdays() {
        // Friday now; the weekend is skipped under the Monday-Friday fallback
        let cadence = PublishingCadence::new(CadencePeriod::Daily, 1);
        let forecast = CreationScheduleSimulator::new()
            .simulate(2, &cadence, at(2026, 1, 9, 12))
            .unwrap();
        assert_eq!(forecast.completion_date(), Some(date(2026, 1, 13)));
    }

    #[test]
    fn test_simulation_monthly_crosses_year() {
        let cadence = PublishingCadence::new(CadencePeriod::Monthly, 2)
            .with_days([PublishDay::Mon]);
        let forecast = CreationScheduleSimulator::new()
            .simulate(3, &cadence, at(2025, 12, 20, 12))
            .unwrap();

        // 2 land on Monday 2025-12-22, the third on the first January Monday
        assert_eq!(forecast.placements.len(), 2);
        assert_eq!(forecast.completion_date(), Some(date(2026, 1, 5)));
    }

    #[test]
    fn test_simulation_zero_articles_is_empty() {
        let forecast = CreationScheduleSimulator::new()
            .simulate(0, &mon_wed_weekly(2), at(2026, 1, 5, 10))
            .unwrap();
        assert!(forecast.completion_date().is_none());
    }

    #[test]
    fn test_simulation_zero_frequency_errors() {
        let simulator = CreationScheduleSimulator::with_settings(EngineSettings {
            max_iterations: 30,
            ..EngineSettings::default()
        });
        let err = simulator
            .simulate(1, &mon_wed_weekly(0), at(2026, 1, 5, 10))
            .unwrap_err();
        assert_eq!(err, SchedulerError::iteration_limit("simulate_creations", 30));
    }

    #[test]
    fn test_simulation_end_of_calendar_is_reported() {
        let now = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let err = CreationScheduleSimulator::new()
            .simulate(1, &mon_wed_weekly(2), now)
            .unwrap_err();
        assert_eq!(err, SchedulerError::calendar_exhausted("simulate_creations"));

        // The walk runs out of dates before the iteration bound
        let now = (NaiveDate::MAX - Duration::days(3))
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        let err = CreationScheduleSimulator::new()
            .simulate(1, &mon_wed_weekly(0), now)
            .unwrap_err();
        assert_eq!(err, SchedulerError::calendar_exhausted("simulate_creations"));
    }

    #[test]
    fn test_suggestion_has_no_estimate() {
        let result = compute_phase_target_completion_date(
            PhaseStatus::Suggestion,
            &mon_wed_weekly(2),
            10,
            4,
            at(2026, 1, 5, 10),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_creations_take_precedence_over_updates() {
        let result = compute_phase_target_completion_date(
            PhaseStatus::Planned,
            &mon_wed_weekly(2),
            3,
            5,
            at(2026, 1, 5, 10),
        )
        .unwrap();
        assert_eq!(result, Some(at(2026, 1, 12, 0)));
    }

    #[test]
    fn test_updates_only_is_one_week_out() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 10, 30, 15).unwrap();
        let result = compute_phase_target_completion_date(
            PhaseStatus::InProgress,
            &mon_wed_weekly(2),
            0,
            3,
            now,
        )
        .unwrap();
        assert_eq!(result, Some(now + Duration::days(7)));
    }

    #[test]
    fn test_nothing_planned_has_no_estimate() {
        let result = compute_phase_target_completion_date(
            PhaseStatus::Completed,
            &mon_wed_weekly(2),
            0,
            0,
            at(2026, 1, 5, 10),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_custom_update_sla() {
        let forecaster = CompletionForecaster::with_settings(EngineSettings {
            update_sla_days: 14,
            ..EngineSettings::default()
        });
        let now = at(2026, 1, 5, 10);
        let result = forecaster
            .target_completion_date(PhaseStatus::Observing, &mon_wed_weekly(2), 0, 1, now)
            .unwrap();
        assert_eq!(result, Some(at(2026, 1, 19, 10)));
    }
}
