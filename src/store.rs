use crate::aggregate::Aggregate;
use crate::event::{UserId, UserSchedule};
use crate::normalize::{NormalizeError, Normalizer};
use crate::records::read_records;
use crate::report::Report;
use log::info;
use parking_lot::Mutex;
use std::io::Read;
use std::sync::Arc;

/// Every uploaded schedule, indexed by upload order.
///
/// Appends, clears and snapshots all go through one lock, so an aggregation
/// never observes a half-applied upload.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    schedules: Mutex<Vec<Arc<UserSchedule>>>,
}

impl ScheduleStore {
    pub fn new() -> ScheduleStore {
        ScheduleStore::default()
    }

    /// Builds a schedule for the next free id and appends it.
    /// If `build` fails the store is left untouched.
    ///
    /// # Examples
    /// ```
    /// use stundenplan_libs::{event::UserSchedule, store::ScheduleStore};
    ///
    /// let store = ScheduleStore::new();
    ///
    /// let first = store.append_with(|id| Ok::<_, ()>(UserSchedule::new(id, "ada", vec![])));
    /// let failed = store.append_with(|_| Err::<UserSchedule, _>("bad upload"));
    /// let second = store.append_with(|id| Ok::<_, ()>(UserSchedule::new(id, "bob", vec![])));
    ///
    /// assert_eq!(first, Ok(0));
    /// assert_eq!(failed, Err("bad upload"));
    /// assert_eq!(second, Ok(1));
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn append_with<F, E>(&self, build: F) -> Result<UserId, E>
    where
        F: FnOnce(UserId) -> Result<UserSchedule, E>,
    {
        let mut schedules = self.schedules.lock();
        let user_id = schedules.len();
        let schedule = build(user_id)?;

        info!(
            user_id = user_id, events = schedule.events.len();
            "Stored schedule of {:?}", schedule.username
        );
        schedules.push(Arc::new(schedule));

        Ok(user_id)
    }

    /// Reads a schedule CSV and stores it under the next free id.
    /// Any malformed row fails the whole upload.
    pub fn upload<R: Read>(
        &self,
        reader: R,
        username: &str,
        normalizer: &Normalizer,
    ) -> Result<UserId, NormalizeError> {
        let records = read_records(reader)?;

        self.append_with(|user_id| normalizer.normalize(&records, user_id, username))
    }

    /// Drops every schedule; ids start over at 0.
    pub fn clear(&self) {
        let mut schedules = self.schedules.lock();
        if !schedules.is_empty() {
            info!("Cleared {} schedules", schedules.len());
        }
        schedules.clear();
    }

    pub fn snapshot(&self) -> Vec<Arc<UserSchedule>> {
        self.schedules.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.schedules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.lock().is_empty()
    }

    /// The id the next successful upload will receive
    pub fn next_user_id(&self) -> UserId {
        self.len()
    }

    pub fn report<A: Aggregate>(&self, aggregator: &A) -> Report<A::Block> {
        aggregator.aggregate(self.snapshot().as_slice())
    }
}
