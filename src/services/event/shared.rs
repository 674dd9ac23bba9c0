//! Row-level CSV encoding for the event list.
//!
//! The format is a plain comma split with no quoting, so a comma inside a
//! free-text field shifts every later column.
//!
//! The time column is parsed into a [`TimeSlot`], so a load/save cycle
//! rewrites it in canonical case and turns unknown text into `none`.

use std::path::Path;

use thiserror::Error;

use crate::models::event::EventRecord;
use crate::models::time_slot::TimeSlot;
use crate::services::dialogue::paths::{dialogue_fragment, DialoguePaths, PathError};

pub(crate) const HEADER: &str = "id,month,day,date,time,location,conditions,dialogue,desc";
pub(crate) const FIELD_COUNT: usize = 9;

/// Why a CSV row was left out of a load.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("expected 9 fields, found {0}")]
    TooFewFields(usize),
    #[error("{field} is not an integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("month {0} is out of range")]
    InvalidMonth(u32),
    #[error("dialogue column has no file name")]
    EmptyDialogue,
}

/// Parse one data row. `Ok(None)` means the row is valid but filtered out.
pub(crate) fn parse_row(
    line: &str,
    root: &Path,
    month_filter: Option<u32>,
) -> Result<Option<EventRecord>, RowError> {
    let cols: Vec<&str> = line.split(',').collect();
    if cols.len() < FIELD_COUNT {
        return Err(RowError::TooFewFields(cols.len()));
    }

    let id: i64 = parse_number("id", cols[0])?;
    let month: u32 = parse_number("month", cols[1])?;
    let day: u32 = parse_number("day", cols[2])?;

    if month_filter.is_some_and(|filter| filter != month) {
        return Ok(None);
    }

    let file_base = cols[7].rsplit('/').next().unwrap_or_default().trim();
    if file_base.is_empty() {
        return Err(RowError::EmptyDialogue);
    }

    let paths = DialoguePaths::resolve(root, month, day, file_base).map_err(|e| match e {
        PathError::InvalidMonth(month) => RowError::InvalidMonth(month),
        PathError::EmptyFileBase => RowError::EmptyDialogue,
    })?;

    Ok(Some(EventRecord {
        id,
        month,
        day,
        weekday_label: cols[3].to_string(),
        time_slot: TimeSlot::parse(cols[4]),
        location: cols[5].to_string(),
        conditions: cols[6].to_string(),
        kr_dialogue: paths.kr,
        en_dialogue: paths.en,
        description: cols[8].to_string(),
    }))
}

/// Encode one record. The dialogue column is rebuilt from the KR file stem.
pub(crate) fn format_row(record: &EventRecord) -> anyhow::Result<String> {
    let fragment = dialogue_fragment(record.month, record.day, &record.file_base())?;
    Ok(format!(
        "{},{},{},{},{},{},{},{},{}",
        record.id,
        record.month,
        record.day,
        record.weekday_label,
        record.time_slot,
        record.location,
        record.conditions,
        fragment,
        record.description,
    ))
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    value.trim().parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const ROOT: &str = "/w";

    #[test]
    fn test_parse_row_rebuilds_paths() {
        let line = "4,3,12,Monday,Evening,Plaza,rain,Mar/12/festival,Opening night";
        let record = parse_row(line, Path::new(ROOT), None).unwrap().unwrap();

        assert_eq!(record.id, 4);
        assert_eq!(record.time_slot, TimeSlot::Evening);
        assert_eq!(record.kr_dialogue, PathBuf::from("/w/KR/Mar/12/festival.json"));
        assert_eq!(record.en_dialogue, PathBuf::from("/w/EN/Mar/12/festival.json"));
        assert_eq!(record.description, "Opening night");
    }

    #[test]
    fn test_parse_row_ignores_stale_fragment_directories() {
        // The fragment's month/day are not trusted, only its file name.
        let line = "1,5,2,Friday,Noon,Room,,Jan/9/letter,";
        let record = parse_row(line, Path::new(ROOT), None).unwrap().unwrap();
        assert_eq!(record.kr_dialogue, PathBuf::from("/w/KR/May/2/letter.json"));
    }

    #[test]
    fn test_parse_row_errors() {
        let root = Path::new(ROOT);
        assert_eq!(parse_row("1,3,5", root, None), Err(RowError::TooFewFields(3)));
        assert!(matches!(
            parse_row("x,3,5,a,b,c,d,Mar/5/f,e", root, None),
            Err(RowError::InvalidNumber { field: "id", .. })
        ));
        assert_eq!(
            parse_row("1,13,5,a,b,c,d,Mar/5/f,e", root, None),
            Err(RowError::InvalidMonth(13))
        );
        assert_eq!(
            parse_row("1,3,5,a,b,c,d,Mar/5/,e", root, None),
            Err(RowError::EmptyDialogue)
        );
    }

    #[test]
    fn test_parse_row_month_filter() {
        let line = "1,3,5,a,Morning,c,d,Mar/5/f,e";
        assert!(parse_row(line, Path::new(ROOT), Some(4)).unwrap().is_none());
        assert!(parse_row(line, Path::new(ROOT), Some(3)).unwrap().is_some());
    }

    #[test]
    fn test_embedded_comma_shifts_columns() {
        // No quoting support: every column after the comma shifts right by one.
        let line = "1,3,5,Sunday,Morning,Hall, east wing,none,Mar/5/f,desc";
        let record = parse_row(line, Path::new(ROOT), None).unwrap().unwrap();
        assert_eq!(record.location, "Hall");
        assert_eq!(record.conditions, " east wing");
        assert_eq!(record.file_base(), "none");
        assert_eq!(record.description, "Mar/5/f");
    }

    #[test]
    fn test_time_column_is_canonicalized_on_rewrite() {
        let root = Path::new(ROOT);
        let lower = parse_row("1,3,5,Sunday,morning,Hall,,Mar/5/f,", root, None)
            .unwrap()
            .unwrap();
        assert_eq!(format_row(&lower).unwrap(), "1,3,5,Sunday,Morning,Hall,,Mar/5/f,");

        let unknown = parse_row("2,3,5,Sunday,teatime,Hall,,Mar/5/g,", root, None)
            .unwrap()
            .unwrap();
        assert_eq!(unknown.time_slot, TimeSlot::Unspecified);
        assert_eq!(format_row(&unknown).unwrap(), "2,3,5,Sunday,none,Hall,,Mar/5/g,");
    }

    #[test]
    fn test_format_row() {
        let record = EventRecord::builder()
            .id(2)
            .date(3, 12)
            .weekday_label("Monday")
            .time_slot(TimeSlot::Unspecified)
            .location("Room")
            .dialogue("/w/KR/Mar/12/intro.json", "/w/EN/Mar/12/intro.json")
            .build()
            .unwrap();

        assert_eq!(format_row(&record).unwrap(), "2,3,12,Monday,none,Room,,Mar/12/intro,");
    }
}
