use crate::clock::{parse_clock, parse_date};
use crate::day::Day;
use crate::event::{Event, UserId, UserSchedule};
use crate::records::ScheduleRecord;
use crate::time::{Minute, TimeRange};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::{debug, trace};
use std::iter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Malformed time {value:?}, expected \"HH:MM AM/PM\"")]
    MalformedTime { value: String },
    #[error("Malformed date {value:?}, expected \"MM/DD/YYYY\"")]
    MalformedDate { value: String },
    #[error("Missing column {0:?}")]
    MissingColumn(String),
    #[error("{subject:?} must start before it ends, found {start}..{end}")]
    InvertedTimeRange {
        subject: String,
        start: Minute,
        end: Minute,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Inclusive [start, end] range of dates that weekly meetings repeat over
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Semester {
    start: NaiveDate,
    end: NaiveDate,
}

impl Semester {
    /// `None` if the semester would end before it starts
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Semester> {
        if start <= end {
            Some(Semester { start, end })
        } else {
            None
        }
    }

    pub fn start(self) -> NaiveDate {
        self.start
    }

    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Every date falling on `weekday`, beginning with the first one on or
    /// after the semester start and stepping a week at a time.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, Weekday};
    /// use stundenplan_libs::normalize::Semester;
    ///
    /// let semester = Semester::new(
    ///     NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),  // a Wednesday
    ///     NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(), // a Monday
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(
    ///     semester.occurrences(Weekday::Mon).collect::<Vec<_>>(),
    ///     vec![
    ///         NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
    ///         NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
    ///         NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
    ///     ]
    /// );
    /// ```
    pub fn occurrences(self, weekday: Weekday) -> impl Iterator<Item = NaiveDate> {
        let offset = (7 + weekday.num_days_from_monday()
            - self.start.weekday().num_days_from_monday())
            % 7;
        let end = self.end;

        iter::successors(
            self.start.checked_add_days(Days::new(offset.into())),
            |date| date.checked_add_days(Days::new(7)),
        )
        .take_while(move |date| *date <= end)
    }
}

/// Turns textual schedule rows into minute-based events
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    semester: Option<Semester>,
}

impl Normalizer {
    /// Without a semester every row becomes a single event on its start date.
    /// With one, each row is repeated on every matching weekday of the semester.
    pub fn new(semester: Option<Semester>) -> Normalizer {
        Normalizer { semester }
    }

    pub fn semester(&self) -> Option<Semester> {
        self.semester
    }

    /// Weekend rows produce no events.
    pub fn normalize_record(
        &self,
        record: &ScheduleRecord,
        user_id: UserId,
        username: &str,
    ) -> Result<Vec<Event>, NormalizeError> {
        let start = parse_clock(&record.start_time)?;
        let end = parse_clock(&record.end_time)?;
        let date = parse_date(&record.start_date)?;

        if start >= end {
            return Err(NormalizeError::InvertedTimeRange {
                subject: record.subject.clone(),
                start,
                end,
            });
        }

        let day = match Day::from_weekday(date.weekday()) {
            Some(day) => day,
            None => {
                debug!("Skipping {:?} on {}, not a weekday", record.subject, date);
                return Ok(vec![]);
            }
        };

        let time = TimeRange::new(start, end);
        let event =
            |date: NaiveDate| Event::new(user_id, username, &record.subject, day, date, time);

        Ok(match self.semester {
            None => vec![event(date)?],
            Some(semester) => {
                let events = semester
                    .occurrences(day.weekday())
                    .map(event)
                    .collect::<Result<Vec<_>, _>>()?;
                trace!(
                    "Repeated {:?} on {} {} times",
                    record.subject,
                    day,
                    events.len()
                );
                events
            }
        })
    }

    /// All-or-nothing: the first record that fails aborts the whole schedule.
    pub fn normalize<'a, I>(
        &self,
        records: I,
        user_id: UserId,
        username: &str,
    ) -> Result<UserSchedule, NormalizeError>
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        let mut events = Vec::new();
        for record in records {
            events.extend(self.normalize_record(record, user_id, username)?);
        }

        Ok(UserSchedule::new(user_id, username, events))
    }
}
