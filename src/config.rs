use crate::aggregate::{MinuteAggregator, SliceAggregator, DAY_END, DAY_START, MAX_OVERLAP, SLICE};
use crate::clock::{parse_clock, parse_date};
use crate::normalize::{Normalizer, Semester};
use crate::time::{Minute, TimeRange, MINUTES_PER_DAY};
use core::str::FromStr;
use std::env;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const VARIANT_KEY: &str = "STUNDENPLAN_VARIANT";
pub const DAY_START_KEY: &str = "STUNDENPLAN_DAY_START";
pub const DAY_END_KEY: &str = "STUNDENPLAN_DAY_END";
pub const SLICE_KEY: &str = "STUNDENPLAN_SLICE_MINUTES";
pub const MAX_OVERLAP_KEY: &str = "STUNDENPLAN_MAX_OVERLAP";
pub const SEMESTER_START_KEY: &str = "STUNDENPLAN_SEMESTER_START";
pub const SEMESTER_END_KEY: &str = "STUNDENPLAN_SEMESTER_END";

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Day window {start}..{end} must be non-empty and end by midnight")]
    InvalidWindow { start: Minute, end: Minute },
    #[error("Slice width must be at least one minute")]
    ZeroSlice,
    #[error("Overlap cap must be at least 1")]
    ZeroOverlapCap,
    #[error("Semester start and end must be set together")]
    IncompleteSemester,
    #[error("Semester ends before it starts")]
    InvertedSemester,
    #[error("Semester expansion needs the exact variant, the coarse one counts every occurrence")]
    SemesterWithCoarseVariant,
}

/// Which aggregation the calendar query uses. The two are never mixed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Variant {
    /// Fixed window sampled per slice, capped counts. See [`SliceAggregator`].
    #[default]
    Coarse,
    /// Exact minutes with a representative user. See [`MinuteAggregator`].
    Exact,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coarse" | "slice" => Ok(Variant::Coarse),
            "exact" | "minute" => Ok(Variant::Exact),
            _ => Err(invalid(VARIANT_KEY, s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub variant: Variant,
    /// Only used by the coarse variant
    pub window: TimeRange<Minute>,
    pub slice: Minute,
    pub max_overlap: usize,
    /// Repeat each row weekly across this range. `None` keeps one event per row.
    pub semester: Option<Semester>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            variant: Variant::Coarse,
            window: TimeRange::new(DAY_START, DAY_END),
            slice: SLICE,
            max_overlap: MAX_OVERLAP,
            semester: None,
        }
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

/// Whole minutes (`"480"`) or a clock time (`"08:00 AM"`)
fn parse_minute(key: &'static str, value: &str) -> Result<Minute, ConfigError> {
    value
        .trim()
        .parse::<Minute>()
        .or_else(|_| parse_clock(value))
        .map_err(|_| invalid(key, value))
}

impl Config {
    /// Reads overrides from the `STUNDENPLAN_*` environment variables
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Unset keys keep their defaults.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use stundenplan_libs::config::{Config, Variant};
    ///
    /// let vars: HashMap<&str, &str> = vec![
    ///     ("STUNDENPLAN_VARIANT", "exact"),
    ///     ("STUNDENPLAN_DAY_START", "07:30 AM"),
    ///     ("STUNDENPLAN_SLICE_MINUTES", "15"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    ///
    /// assert_eq!(config.variant, Variant::Exact);
    /// assert_eq!(config.window.start(), 450);
    /// assert_eq!(config.window.end(), 1200);
    /// assert_eq!(config.slice, 15);
    /// assert_eq!(config.semester, None);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(VARIANT_KEY) {
            config.variant = value.parse()?;
        }

        let start = match lookup(DAY_START_KEY) {
            Some(value) => parse_minute(DAY_START_KEY, &value)?,
            None => config.window.start(),
        };
        let end = match lookup(DAY_END_KEY) {
            Some(value) => parse_minute(DAY_END_KEY, &value)?,
            None => config.window.end(),
        };
        config.window = TimeRange::new(start, end);

        if let Some(value) = lookup(SLICE_KEY) {
            config.slice = value
                .trim()
                .parse()
                .map_err(|_| invalid(SLICE_KEY, &value))?;
        }

        if let Some(value) = lookup(MAX_OVERLAP_KEY) {
            config.max_overlap = value
                .trim()
                .parse()
                .map_err(|_| invalid(MAX_OVERLAP_KEY, &value))?;
        }

        config.semester = match (lookup(SEMESTER_START_KEY), lookup(SEMESTER_END_KEY)) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                let start =
                    parse_date(&start).map_err(|_| invalid(SEMESTER_START_KEY, &start))?;
                let end = parse_date(&end).map_err(|_| invalid(SEMESTER_END_KEY, &end))?;
                Some(Semester::new(start, end).ok_or(ConfigError::InvertedSemester)?)
            }
            _ => return Err(ConfigError::IncompleteSemester),
        };

        config.validate()?;

        Ok(config)
    }

    /// Slices must fit the window, and semester expansion is only paired with
    /// the exact variant, which counts users instead of events.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slice == 0 {
            Err(ConfigError::ZeroSlice)
        } else if self.window.is_empty() || self.window.end() > MINUTES_PER_DAY {
            Err(ConfigError::InvalidWindow {
                start: self.window.start(),
                end: self.window.end(),
            })
        } else if self.slice > self.window.duration() {
            Err(invalid(SLICE_KEY, &self.slice.to_string()))
        } else if self.max_overlap == 0 {
            Err(ConfigError::ZeroOverlapCap)
        } else if self.semester.is_some() && self.variant == Variant::Coarse {
            Err(ConfigError::SemesterWithCoarseVariant)
        } else {
            Ok(())
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.semester)
    }

    pub fn slice_aggregator(&self) -> SliceAggregator {
        SliceAggregator::new(self.window, self.slice, self.max_overlap)
    }

    pub fn minute_aggregator(&self) -> MinuteAggregator {
        MinuteAggregator
    }
}
