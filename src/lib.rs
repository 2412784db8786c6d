//! cadence-engine - Publishing cadence scheduling
//!
//! Deterministic scheduling primitives for a content-production platform:
//! next-slot allocation for new items and completion forecasting for planned
//! batches, both governed by a campaign's publishing cadence.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Engine settings and logging configuration
//! - [`scheduler`] - Cadence model, slot allocator and completion forecaster
//! - [`input`] - Loading cadence and item documents
//! - [`error`] - Input loading errors
//!
//! # Example
//!
//! ```
//! use cadence_engine::scheduler::{
//!     compute_phase_target_completion_date, CadencePeriod, PhaseStatus, PublishDay,
//!     PublishingCadence,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! let cadence = PublishingCadence::new(CadencePeriod::Weekly, 2)
//!     .with_days([PublishDay::Mon, PublishDay::Wed]);
//! let now = Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap();
//!
//! let done =
//!     compute_phase_target_completion_date(PhaseStatus::Planned, &cadence, 3, 0, now).unwrap();
//! assert_eq!(done, Some(Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap()));
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod scheduler;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, EngineSettings};
    pub use crate::error::{Error, Result};
    pub use crate::scheduler::{
        compute_next_available_slot, compute_phase_target_completion_date, CadencePeriod,
        CompletionForecaster, ItemStatus, PhaseStatus, PublishDay, PublishingCadence,
        ScheduledItemSnapshot, SlotAllocator,
    };
}

// Direct re-exports for convenience
pub use scheduler::{PublishingCadence, ScheduledItemSnapshot};
