//! Publishing cadence data model
//!
//! A cadence is the (period, frequency, allowed days) triple attached to a
//! campaign. It says how often content may publish and on which weekdays.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::{SchedulerError, SchedulerResult};

// ============================================================================
// Publish Day
// ============================================================================

/// Weekday eligible for publication, serialized as a three-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl PublishDay {
    /// Get all days, Monday first
    pub fn all() -> Vec<Self> {
        vec![
            Self::Mon,
            Self::Tue,
            Self::Wed,
            Self::Thu,
            Self::Fri,
            Self::Sat,
            Self::Sun,
        ]
    }

    /// Monday through Friday
    pub fn weekdays() -> Vec<Self> {
        vec![Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri]
    }

    /// Get the three-letter code
    pub fn id(&self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Parse from a code or a full English day name
    pub fn from_id(id: &str) -> SchedulerResult<Self> {
        match id.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Mon),
            "tue" | "tuesday" => Ok(Self::Tue),
            "wed" | "wednesday" => Ok(Self::Wed),
            "thu" | "thursday" => Ok(Self::Thu),
            "fri" | "friday" => Ok(Self::Fri),
            "sat" | "saturday" => Ok(Self::Sat),
            "sun" | "sunday" => Ok(Self::Sun),
            _ => Err(SchedulerError::invalid_day(id)),
        }
    }

    /// Day of the given calendar date
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for PublishDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }
}

impl From<PublishDay> for Weekday {
    fn from(day: PublishDay) -> Self {
        match day {
            PublishDay::Mon => Weekday::Mon,
            PublishDay::Tue => Weekday::Tue,
            PublishDay::Wed => Weekday::Wed,
            PublishDay::Thu => Weekday::Thu,
            PublishDay::Fri => Weekday::Fri,
            PublishDay::Sat => Weekday::Sat,
            PublishDay::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for PublishDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PublishDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

// ============================================================================
// Cadence Period
// ============================================================================

/// Capacity-reset granularity of a cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadencePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl CadencePeriod {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for CadencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for CadencePeriod {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(SchedulerError::invalid_period(s)),
        }
    }
}

// ============================================================================
// Publishing Cadence
// ============================================================================

/// How often a campaign may publish
///
/// Deserializes from the wire shape
/// `{ "period": "weekly", "frequency": 3, "allowedDays": ["mon", "wed"] }`.
/// Duplicate days collapse into the set; an empty set is legal and means no
/// day is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingCadence {
    /// Capacity-reset window
    pub period: CadencePeriod,

    /// Maximum items per period
    pub frequency: u32,

    /// Weekdays eligible for publication
    #[serde(default)]
    pub allowed_days: BTreeSet<PublishDay>,
}

impl PublishingCadence {
    /// Create a cadence with no allowed days
    pub fn new(period: CadencePeriod, frequency: u32) -> Self {
        Self {
            period,
            frequency,
            allowed_days: BTreeSet::new(),
        }
    }

    /// Replace the allowed days
    pub fn with_days(mut self, days: impl IntoIterator<Item = PublishDay>) -> Self {
        self.allowed_days = days.into_iter().collect();
        self
    }

    /// Whether the given date falls on an allowed weekday
    pub fn allows(&self, date: NaiveDate) -> bool {
        self.allowed_days.contains(&PublishDay::of(date))
    }

    /// Count of distinct allowed weekdays
    pub fn num_allowed_days(&self) -> usize {
        self.allowed_days.len()
    }

    /// False when no weekday is eligible
    pub fn is_schedulable(&self) -> bool {
        !self.allowed_days.is_empty()
    }

    /// Validate the cadence
    ///
    /// The engine never calls this itself; callers that accept cadences from
    /// untrusted sources can use it before handing them over.
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.frequency == 0 {
            return Err(SchedulerError::invalid_cadence(
                "frequency",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> SchedulerResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

impl fmt::Display for PublishingCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<_> = self.allowed_days.iter().map(|d| d.id()).collect();
        write!(
            f,
            "{} per {} on [{}]",
            self.frequency,
            match self.period {
                CadencePeriod::Daily => "day",
                CadencePeriod::Weekly => "week",
                CadencePeriod::Monthly => "month",
            },
            days.join(", ")
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_day_from_id() {
        assert_eq!(PublishDay::from_id("mon").unwrap(), PublishDay::Mon);
        assert_eq!(PublishDay::from_id("WED").unwrap(), PublishDay::Wed);
        assert_eq!(PublishDay::from_id("sunday").unwrap(), PublishDay::Sun);
        assert!(PublishDay::from_id("funday").is_err());
    }

    #[test]
    fn test_publish_day_of_date() {
        // 2026-01-05 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(PublishDay::of(monday), PublishDay::Mon);
        assert_eq!(PublishDay::of(monday.succ_opt().unwrap()), PublishDay::Tue);

        let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        assert_eq!(PublishDay::of(sunday), PublishDay::Sun);
    }

    #[test]
    fn test_weekday_conversion() {
        for day in PublishDay::all() {
            let weekday: Weekday = day.into();
            assert_eq!(PublishDay::from(weekday), day);
        }
    }

    #[test]
    fn test_cadence_deserialize_wire_shape() {
        let cadence = PublishingCadence::from_json(
            r#"{"period":"weekly","frequency":3,"allowedDays":["wed","mon","mon"]}"#,
        )
        .unwrap();

        assert_eq!(cadence.period, CadencePeriod::Weekly);
        assert_eq!(cadence.frequency, 3);
        assert_eq!(cadence.num_allowed_days(), 2);
        assert!(cadence.allowed_days.contains(&PublishDay::Mon));
        assert!(cadence.allowed_days.contains(&PublishDay::Wed));
    }

    #[test]
    fn test_cadence_missing_days_is_empty() {
        let cadence =
            PublishingCadence::from_json(r#"{"period":"daily","frequency":1}"#).unwrap();
        assert!(!cadence.is_schedulable());
    }

    #[test]
    fn test_cadence_rejects_unknown_day() {
        let result = PublishingCadence::from_json(
            r#"{"period":"daily","frequency":1,"allowedDays":["xyz"]}"#,
        );
        assert!(matches!(
            result,
            Err(SchedulerError::SerializationError { .. })
        ));
    }

    #[test]
    fn test_cadence_allows() {
        let cadence = PublishingCadence::new(CadencePeriod::Weekly, 2)
            .with_days([PublishDay::Mon, PublishDay::Wed]);

        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert!(cadence.allows(monday));
        assert!(!cadence.allows(tuesday));
    }

    #[test]
    fn test_cadence_validate() {
        assert!(PublishingCadence::new(CadencePeriod::Daily, 1).validate().is_ok());
        assert!(PublishingCadence::new(CadencePeriod::Daily, 0).validate().is_err());
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Weekly".parse::<CadencePeriod>().unwrap(), CadencePeriod::Weekly);
        assert!("yearly".parse::<CadencePeriod>().is_err());
    }

    #[test]
    fn test_cadence_display() {
        let cadence = PublishingCadence::new(CadencePeriod::Monthly, 8)
            .with_days([PublishDay::Fri, PublishDay::Tue]);
        assert_eq!(cadence.to_string(), "8 per month on [tue, fri]");
    }
}
