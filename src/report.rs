use crate::aggregate::{BusyBlock, SliceBlock};
use crate::clock::{format_hhmm, format_hhmmss};
use crate::day::Day;
use core::fmt::{self, Display};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, Serialize, Serializer};

pub const NOTHING_UPLOADED: &str = "No schedules uploaded yet.";

pub type Calendar<B> = BTreeMap<Day, Vec<B>>;

/// Result of a calendar query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report<B> {
    /// The store holds no schedules. Distinct from a calendar with no busy blocks.
    NothingUploaded,
    Busy(Calendar<B>),
}

impl<B> Report<B> {
    pub fn is_nothing_uploaded(&self) -> bool {
        matches!(self, Report::NothingUploaded)
    }

    pub fn calendar(&self) -> Option<&Calendar<B>> {
        match self {
            Report::NothingUploaded => None,
            Report::Busy(calendar) => Some(calendar),
        }
    }

    pub fn into_calendar(self) -> Option<Calendar<B>> {
        match self {
            Report::NothingUploaded => None,
            Report::Busy(calendar) => Some(calendar),
        }
    }

    /// Blocks for `day`, empty when nothing was uploaded
    pub fn blocks(&self, day: Day) -> &[B] {
        self.calendar()
            .and_then(|calendar| calendar.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Display for SliceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} x{}",
            format_hhmm(self.time.start()),
            format_hhmm(self.time.end()),
            self.overlap
        )
    }
}

impl Display for BusyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} x{} (user {})",
            format_hhmmss(self.time.start()),
            format_hhmmss(self.time.end()),
            self.overlap,
            self.representative
        )
    }
}

/// `["HH:MM", "HH:MM", overlap]`
#[cfg(feature = "serde")]
impl Serialize for SliceBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            format_hhmm(self.time.start()),
            format_hhmm(self.time.end()),
            self.overlap,
        )
            .serialize(serializer)
    }
}

/// `["HH:MM:SS", "HH:MM:SS", overlap, representative]`
#[cfg(feature = "serde")]
impl Serialize for BusyBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            format_hhmmss(self.time.start()),
            format_hhmmss(self.time.end()),
            self.overlap,
            self.representative,
        )
            .serialize(serializer)
    }
}

/// `{"message": ...}` when nothing was uploaded, `{"busy": {day: [block, ...]}}` otherwise
#[cfg(feature = "serde")]
impl<B> Serialize for Report<B>
where
    B: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Report::NothingUploaded => map.serialize_entry("message", NOTHING_UPLOADED)?,
            Report::Busy(calendar) => map.serialize_entry("busy", calendar)?,
        }
        map.end()
    }
}
