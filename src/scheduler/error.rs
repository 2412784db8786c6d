//! Error types for the scheduler module

use std::fmt;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Day iteration ran past the configured bound without finding a result
    IterationLimitExceeded {
        operation: String,
        limit: u32,
    },

    /// Day iteration reached the end of the representable calendar
    CalendarExhausted {
        operation: String,
    },

    /// Cadence failed validation
    InvalidCadence {
        field: String,
        reason: String,
    },

    /// Unknown weekday code
    InvalidDay {
        code: String,
    },

    /// Unknown cadence period
    InvalidPeriod {
        value: String,
    },

    /// Unknown phase status
    InvalidPhaseStatus {
        value: String,
    },

    /// Serialization/deserialization error
    SerializationError {
        reason: String,
    },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationLimitExceeded { operation, limit } => {
                write!(
                    f,
                    "{} exceeded {} day iterations; cadence configuration is degenerate",
                    operation, limit
                )
            }
            Self::CalendarExhausted { operation } => {
                write!(f, "{} ran past the last representable date", operation)
            }
            Self::InvalidCadence { field, reason } => {
                write!(f, "Invalid cadence field '{}': {}", field, reason)
            }
            Self::InvalidDay { code } => {
                write!(
                    f,
                    "Invalid weekday code '{}'. Valid options: mon, tue, wed, thu, fri, sat, sun",
                    code
                )
            }
            Self::InvalidPeriod { value } => {
                write!(
                    f,
                    "Invalid cadence period '{}'. Valid options: daily, weekly, monthly",
                    value
                )
            }
            Self::InvalidPhaseStatus { value } => {
                write!(f, "Invalid phase status '{}'", value)
            }
            Self::SerializationError { reason } => {
                write!(f, "Serialization error: {}", reason)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl SchedulerError {
    /// Create an iteration limit error
    pub fn iteration_limit(operation: impl Into<String>, limit: u32) -> Self {
        Self::IterationLimitExceeded {
            operation: operation.into(),
            limit,
        }
    }

    /// Create a calendar exhausted error
    pub fn calendar_exhausted(operation: impl Into<String>) -> Self {
        Self::CalendarExhausted {
            operation: operation.into(),
        }
    }

    /// Create an invalid cadence error
    pub fn invalid_cadence(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCadence {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid weekday error
    pub fn invalid_day(code: impl Into<String>) -> Self {
        Self::InvalidDay { code: code.into() }
    }

    /// Create an invalid period error
    pub fn invalid_period(value: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
        }
    }

    /// Create an invalid phase status error
    pub fn invalid_phase_status(value: impl Into<String>) -> Self {
        Self::InvalidPhaseStatus {
            value: value.into(),
        }
    }

    /// Check if the error is recoverable
    ///
    /// Always false: the same inputs fail the same way.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Whether the error points at a misconfigured cadence rather than bad input syntax
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::IterationLimitExceeded { .. } | Self::InvalidCadence { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_limit_error() {
        let err = SchedulerError::iteration_limit("next_available_slot", 5000);
        assert!(err.to_string().contains("next_available_slot"));
        assert!(err.to_string().contains("5000"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_calendar_exhausted_error() {
        let err = SchedulerError::calendar_exhausted("simulate_creations");
        assert!(err.to_string().contains("simulate_creations"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_invalid_day_error() {
        let err = SchedulerError::invalid_day("funday");
        assert!(err.to_string().contains("funday"));
        assert!(err.to_string().contains("mon"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_invalid_period_error() {
        let err = SchedulerError::invalid_period("yearly");
        assert!(err.to_string().contains("yearly"));
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(!SchedulerError::invalid_cadence("frequency", "must be >= 1").is_recoverable());
        assert!(!SchedulerError::iteration_limit("simulate", 10).is_recoverable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let scheduler_err: SchedulerError = json_err.into();
        assert!(matches!(scheduler_err, SchedulerError::SerializationError { .. }));
    }
}
