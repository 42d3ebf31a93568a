use crate::day::Day;
use crate::normalize::NormalizeError;
use crate::time::{Minute, TimeRange};
use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a schedule in the store, assigned in upload order
pub type UserId = usize;

/// One busy occurrence of one user on one weekday.
/// Always starts before it ends, whether built or deserialized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EventFields"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    #[cfg_attr(feature = "serde", serde(rename = "userId"))]
    user_id: UserId,
    username: String,
    subject: String,
    day: Day,
    /// Calendar date of this occurrence
    date: NaiveDate,
    time: TimeRange<Minute>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct EventFields {
    #[serde(rename = "userId")]
    user_id: UserId,
    username: String,
    subject: String,
    day: Day,
    date: NaiveDate,
    time: TimeRange<Minute>,
}

#[cfg(feature = "serde")]
impl TryFrom<EventFields> for Event {
    type Error = NormalizeError;

    fn try_from(fields: EventFields) -> Result<Self, Self::Error> {
        Event::new(
            fields.user_id,
            &fields.username,
            &fields.subject,
            fields.day,
            fields.date,
            fields.time,
        )
    }
}

impl Event {
    /// Fails with [`NormalizeError::InvertedTimeRange`] unless `time` starts before it ends.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use stundenplan_libs::{Day, Event, TimeRange};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    ///
    /// let event = Event::new(0, "ada", "Algebra", Day::Monday, date, TimeRange::new(540, 600));
    /// assert_eq!(event.unwrap().end(), 600);
    ///
    /// assert!(Event::new(0, "ada", "Algebra", Day::Monday, date, TimeRange::new(600, 540)).is_err());
    /// ```
    pub fn new(
        user_id: UserId,
        username: &str,
        subject: &str,
        day: Day,
        date: NaiveDate,
        time: TimeRange<Minute>,
    ) -> Result<Event, NormalizeError> {
        if time.is_empty() {
            return Err(NormalizeError::InvertedTimeRange {
                subject: subject.to_string(),
                start: time.start(),
                end: time.end(),
            });
        }

        Ok(Event {
            user_id,
            username: username.to_string(),
            subject: subject.to_string(),
            day,
            date,
            time,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> TimeRange<Minute> {
        self.time
    }

    pub fn start(&self) -> Minute {
        self.time.start()
    }

    pub fn end(&self) -> Minute {
        self.time.end()
    }
}

/// All events from a single upload
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSchedule {
    #[cfg_attr(feature = "serde", serde(rename = "userId"))]
    pub user_id: UserId,
    pub username: String,
    pub events: Vec<Event>,
}

impl UserSchedule {
    pub fn new(user_id: UserId, username: &str, events: Vec<Event>) -> UserSchedule {
        UserSchedule {
            user_id,
            username: username.to_string(),
            events,
        }
    }

    pub fn events_on(&self, day: Day) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.day == day)
    }
}
