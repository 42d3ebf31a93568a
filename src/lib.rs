pub mod aggregate;
pub mod clock;
pub mod config;
pub mod day;
pub mod event;
pub mod normalize;
pub mod records;
pub mod report;
pub mod store;
pub mod time;

pub use aggregate::{Aggregate, BusyBlock, MinuteAggregator, SliceAggregator, SliceBlock};
pub use config::{Config, ConfigError, Variant};
pub use day::Day;
pub use event::{Event, UserId, UserSchedule};
pub use normalize::{NormalizeError, Normalizer, Semester};
pub use records::{read_records, ScheduleRecord};
pub use report::{Calendar, Report};
pub use store::ScheduleStore;
pub use time::{Minute, TimeRange};
