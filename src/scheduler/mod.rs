//! Cadence-aware publishing scheduler
//!
//! This module answers two questions about a campaign's publishing cadence,
//! deterministically and without touching the wall clock:
//!
//! - **Where does the next item go?** [`SlotAllocator`] returns the next open
//!   UTC slot for one new item, spreading items evenly across allowed weekdays
//!   and never exceeding the period frequency.
//! - **When will this batch be placed?** [`CompletionForecaster`] estimates
//!   the date by which a strategy phase's planned items are all absorbed,
//!   using a coarser whole-period packing model.
//!
//! Both are pure functions of `(cadence, inputs, now)`. `now` is always passed
//! in by the caller.
//!
//! # Modules
//!
//! - [`cadence`] - Cadence data model (period, frequency, allowed days)
//! - [`period`] - Period keys, day arithmetic and timestamp parsing
//! - [`snapshot`] - Snapshots of already-scheduled items and capacity ledger
//! - [`allocator`] - Next-slot allocation
//! - [`forecast`] - Phase completion forecasting
//! - [`error`] - Scheduler errors
//!
//! # Quick Start
//!
//! ```
//! use cadence_engine::scheduler::{
//!     compute_next_available_slot, CadencePeriod, ItemStatus, PublishDay,
//!     PublishingCadence, ScheduledItemSnapshot,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! let cadence = PublishingCadence::new(CadencePeriod::Weekly, 3)
//!     .with_days([PublishDay::Mon, PublishDay::Wed]);
//! let items = vec![ScheduledItemSnapshot::new(
//!     ItemStatus::Scheduled,
//!     "2026-01-05T09:00:00.000Z",
//! )];
//! let now = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
//!
//! let slot = compute_next_available_slot(&cadence, &items, now).unwrap();
//! assert_eq!(slot, Some(Utc.with_ymd_and_hms(2026, 1, 5, 11, 0, 0).unwrap()));
//! ```
//!
//! # Capacity Models
//!
//! | | Allocator | Forecaster |
//! |---|---|---|
//! | Start day | today if before 09:00 UTC, else tomorrow | always tomorrow |
//! | Per-day cap | frequency spread over allowed days | none |
//! | Period cap | `frequency` | `frequency` |
//! | Empty allowed days | no slot | Monday-Friday |
//!
//! The two models answer different questions and are kept separate.

pub mod allocator;
pub mod cadence;
pub mod error;
pub mod forecast;
pub mod period;
pub mod snapshot;

// Re-export main types
pub use allocator::{compute_next_available_slot, per_day_capacity, SlotAllocator};
pub use cadence::{CadencePeriod, PublishDay, PublishingCadence};
pub use error::{SchedulerError, SchedulerResult};
pub use forecast::{
    compute_phase_target_completion_date, CompletionForecaster, CreationForecast,
    CreationScheduleSimulator, DailyPlacement, PhaseStatus,
};
pub use period::{format_timestamp, parse_timestamp, PeriodKey};
pub use snapshot::{CapacityLedger, ItemStatus, ScheduledItemSnapshot};
