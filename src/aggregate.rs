use crate::day::Day;
use crate::event::{Event, UserId, UserSchedule};
use crate::report::Report;
use crate::time::{Minute, RunMerge, Sliced, TimeRange};
use itertools::Itertools;
use log::debug;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// 08:00
pub const DAY_START: Minute = 8 * 60;
/// 20:00
pub const DAY_END: Minute = 20 * 60;
pub const SLICE: Minute = 5;
pub const MAX_OVERLAP: usize = 5;

/// Builds the per-weekday busy timeline from every uploaded schedule.
/// Results are recomputed from scratch on every call.
pub trait Aggregate: Sync {
    type Block: Send;

    /// `events` holds every event of every user that falls on `day`
    fn aggregate_day(&self, day: Day, events: &[&Event]) -> Vec<Self::Block>;

    /// Returns `Report::NothingUploaded` if there are no schedules at all,
    /// otherwise an entry for each of the five weekdays.
    fn aggregate<S>(&self, schedules: &[S]) -> Report<Self::Block>
    where
        S: Borrow<UserSchedule>,
    {
        if schedules.is_empty() {
            return Report::NothingUploaded;
        }

        let days = Day::ALL
            .iter()
            .map(|&day| {
                let events = schedules
                    .iter()
                    .flat_map(|schedule| {
                        let schedule: &UserSchedule = schedule.borrow();
                        schedule.events_on(day)
                    })
                    .collect_vec();
                (day, events)
            })
            .collect_vec();

        #[cfg(feature = "rayon")]
        let days = days.into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let days = days.into_iter();

        Report::Busy(
            days.map(|(day, events)| {
                let blocks = self.aggregate_day(day, &events);
                debug!(
                    "{}: {} events merged into {} blocks",
                    day,
                    events.len(),
                    blocks.len()
                );
                (day, blocks)
            })
            .collect(),
        )
    }
}

/// Coarse block: constant event count across a run of slices
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SliceBlock {
    pub time: TimeRange<Minute>,
    /// Capped at the aggregator's `max_overlap`
    pub overlap: usize,
}

/// Exact block: constant set of active users across a run of minutes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BusyBlock {
    pub time: TimeRange<Minute>,
    pub overlap: usize,
    /// Smallest user id of the active set
    pub representative: UserId,
}

/// Samples a fixed day window at the left edge of every slice.
///
/// An event counts toward a slice when the slice start lies inside the
/// event's [start, end). Events shorter than a slice, or not aligned to the
/// slice grid, can be missed or under-counted. Each event counts separately,
/// so one user with two overlapping events counts twice.
///
/// Runs split wherever the uncapped count changes; `max_overlap` only caps
/// the reported value. The last slice is not clipped to the window end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SliceAggregator {
    window: TimeRange<Minute>,
    slice: Minute,
    max_overlap: usize,
}

impl Default for SliceAggregator {
    fn default() -> Self {
        SliceAggregator {
            window: TimeRange::new(DAY_START, DAY_END),
            slice: SLICE,
            max_overlap: MAX_OVERLAP,
        }
    }
}

impl SliceAggregator {
    pub fn new(window: TimeRange<Minute>, slice: Minute, max_overlap: usize) -> SliceAggregator {
        SliceAggregator {
            window,
            slice,
            max_overlap,
        }
    }

    pub fn window(&self) -> TimeRange<Minute> {
        self.window
    }

    pub fn slice(&self) -> Minute {
        self.slice
    }

    pub fn max_overlap(&self) -> usize {
        self.max_overlap
    }
}

impl Aggregate for SliceAggregator {
    type Block = SliceBlock;

    fn aggregate_day(&self, _day: Day, events: &[&Event]) -> Vec<SliceBlock> {
        [self.window]
            .iter()
            .sliced(self.slice)
            .into_iter()
            .map(|slice| {
                let count = events
                    .iter()
                    .filter(|event| event.time().contains(slice.start()))
                    .count();
                (slice, count)
            })
            .run_merge()
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(time, count)| SliceBlock {
                time,
                overlap: count.min(self.max_overlap),
            })
            .collect()
    }
}

/// Tracks the exact set of active users for every covered minute.
/// No outer window is applied and overlap counts are not capped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MinuteAggregator;

impl Aggregate for MinuteAggregator {
    type Block = BusyBlock;

    fn aggregate_day(&self, _day: Day, events: &[&Event]) -> Vec<BusyBlock> {
        let mut active: BTreeMap<Minute, BTreeSet<UserId>> = BTreeMap::new();
        for event in events {
            for minute in event.time().minutes() {
                active.entry(minute).or_default().insert(event.user_id());
            }
        }

        active
            .into_iter()
            .map(|(minute, users)| (TimeRange::new(minute, minute + 1), users))
            .run_merge()
            .into_iter()
            .filter_map(|(time, users)| {
                users.iter().next().map(|&representative| BusyBlock {
                    time,
                    overlap: users.len(),
                    representative,
                })
            })
            .collect()
    }
}
