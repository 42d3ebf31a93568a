use crate::normalize::NormalizeError;
use std::io::Read;

pub const SUBJECT: &str = "Subject";
pub const START_DATE: &str = "Start Date";
pub const START_TIME: &str = "Start Time";
pub const END_DATE: &str = "End Date";
pub const END_TIME: &str = "End Time";
pub const LOCATION: &str = "Location";
pub const DESCRIPTION: &str = "Description";

/// One row of an uploaded schedule, still in its textual form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub subject: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
}

impl ScheduleRecord {
    pub fn new(subject: &str, start_date: &str, start_time: &str, end_time: &str) -> Self {
        ScheduleRecord {
            subject: subject.to_string(),
            start_date: start_date.to_string(),
            start_time: start_time.to_string(),
            end_date: start_date.to_string(),
            end_time: end_time.to_string(),
            ..Default::default()
        }
    }
}

/// Reads every row of a schedule CSV.
///
/// Columns are looked up by header name. `Subject`, `Start Date`, `Start Time` and
/// `End Time` must be present, the remaining columns default to empty strings.
/// Nothing is returned unless every row could be read.
///
/// # Examples
/// ```
/// use stundenplan_libs::records::read_records;
///
/// let csv = "Subject,Start Date,Start Time,End Date,End Time,Location,Description\n\
///            Algebra,09/01/2025,09:00 AM,09/01/2025,10:00 AM,Room 1,\n";
///
/// let records = read_records(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].subject, "Algebra");
/// assert_eq!(records[0].location, "Room 1");
/// ```
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, NormalizeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
    };
    let required =
        |name: &str| column(name).ok_or_else(|| NormalizeError::MissingColumn(name.to_string()));

    let subject = required(SUBJECT)?;
    let start_date = required(START_DATE)?;
    let start_time = required(START_TIME)?;
    let end_time = required(END_TIME)?;
    let end_date = column(END_DATE);
    let location = column(LOCATION);
    let description = column(DESCRIPTION);

    reader
        .records()
        .map(|row| -> Result<ScheduleRecord, NormalizeError> {
            let row = row?;
            let cell = |index: Option<usize>| {
                index
                    .and_then(|index| row.get(index))
                    .unwrap_or_default()
                    .to_string()
            };

            Ok(ScheduleRecord {
                subject: cell(Some(subject)),
                start_date: cell(Some(start_date)),
                start_time: cell(Some(start_time)),
                end_date: cell(end_date),
                end_time: cell(Some(end_time)),
                location: cell(location),
                description: cell(description),
            })
        })
        .collect()
}
