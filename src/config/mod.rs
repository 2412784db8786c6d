//! Configuration management for the cadence engine
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Defaults reproduce the engine's documented
//! scheduling constants, so an empty configuration behaves exactly like the
//! built-in one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scheduler::cadence::PublishDay;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scheduling engine settings
    #[serde(default)]
    pub engine: EngineSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables shared by the slot allocator and the completion forecaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum days either engine walks before giving up
    pub max_iterations: u32,

    /// Hour (UTC) of the first slot of a day
    pub first_slot_hour: u32,

    /// Hours between consecutive slots on the same day
    pub slot_spacing_hours: u32,

    /// Weekday occurrences assumed per month for the monthly per-day cap
    pub monthly_weeks_divisor: u32,

    /// Days after `now` at which an updates-only phase is expected to finish
    pub update_sla_days: u32,

    /// Days the forecaster uses when a cadence has none
    pub fallback_days: Vec<PublishDay>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            first_slot_hour: 9,
            slot_spacing_hours: 2,
            monthly_weeks_divisor: 4,
            update_sla_days: 7,
            fallback_days: PublishDay::weekdays(),
        }
    }
}

impl EngineSettings {
    /// Slots that fit on one calendar date before the clock reaches 24:00
    ///
    /// With the defaults that is 09:00, 11:00, ... 23:00, eight slots.
    pub fn slots_per_day(&self) -> u32 {
        let hours_left = 24u32.saturating_sub(self.first_slot_hour);
        hours_left.div_ceil(self.slot_spacing_hours.max(1))
    }

    /// Validate engine settings
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            anyhow::bail!("max_iterations must be greater than 0");
        }

        if self.first_slot_hour > 23 {
            anyhow::bail!("first_slot_hour must be 0-23");
        }

        if self.slot_spacing_hours == 0 {
            anyhow::bail!("slot_spacing_hours must be greater than 0");
        }

        if self.monthly_weeks_divisor == 0 {
            anyhow::bail!("monthly_weeks_divisor must be greater than 0");
        }

        if self.fallback_days.is_empty() {
            anyhow::bail!("fallback_days must name at least one day");
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = EngineSettings::default();

        let fallback_days = match std::env::var("CADENCE_FALLBACK_DAYS") {
            Ok(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(PublishDay::from_id)
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to parse CADENCE_FALLBACK_DAYS")?,
            Err(_) => defaults.fallback_days.clone(),
        };

        let engine = EngineSettings {
            max_iterations: env_u32("CADENCE_MAX_ITERATIONS", defaults.max_iterations),
            first_slot_hour: env_u32("CADENCE_FIRST_SLOT_HOUR", defaults.first_slot_hour),
            slot_spacing_hours: env_u32("CADENCE_SLOT_SPACING_HOURS", defaults.slot_spacing_hours),
            monthly_weeks_divisor: env_u32(
                "CADENCE_MONTHLY_WEEKS_DIVISOR",
                defaults.monthly_weeks_divisor,
            ),
            update_sla_days: env_u32("CADENCE_UPDATE_SLA_DAYS", defaults.update_sla_days),
            fallback_days,
        };

        let log_level = std::env::var("CADENCE_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format =
            std::env::var("CADENCE_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            engine,
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }
}
