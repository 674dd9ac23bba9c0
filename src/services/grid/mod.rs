//! Month grid generation.
//!
//! Produces the ordered cells a month view renders: leading blanks so the 1st
//! lands under the configured first weekday, then one cell per day carrying
//! that day's events.

use anyhow::{anyhow, Result};
use chrono::Weekday;

use crate::models::event::EventRecord;
use crate::utils::date::days_in_month;

/// One cell of a month grid. Padding cells have `day_number == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day_number: u32,
    pub is_current_month: bool,
    pub events: Vec<EventRecord>,
}

impl DayCell {
    fn padding() -> Self {
        Self {
            day_number: 0,
            is_current_month: false,
            events: Vec::new(),
        }
    }
}

/// Build the grid for `month` of `year`.
///
/// Records for other months, or for days the month does not have, are left
/// out. Event order within a day follows the input order.
pub fn generate(
    month: u32,
    year: i32,
    events: &[EventRecord],
    first_weekday: Weekday,
) -> Result<Vec<DayCell>> {
    let days = days_in_month(year, month)
        .ok_or_else(|| anyhow!("Cannot build a grid for month {} of {}", month, year))?;
    let leading = first_weekday.num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat_with(DayCell::padding).take(leading));

    for day in 1..=days {
        cells.push(DayCell {
            day_number: day,
            is_current_month: true,
            events: events
                .iter()
                .filter(|event| event.falls_on(month, day))
                .cloned()
                .collect(),
        });
    }

    Ok(cells)
}

/// Split a grid into rows of seven for display.
pub fn weeks(cells: &[DayCell]) -> impl Iterator<Item = &[DayCell]> {
    cells.chunks(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_slot::TimeSlot;
    use crate::services::dialogue::DialoguePaths;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use test_case::test_case;

    fn event(id: i64, month: u32, day: u32) -> EventRecord {
        let paths = DialoguePaths::resolve(Path::new("/w"), month, day, "scene").unwrap();
        EventRecord::builder()
            .id(id)
            .date(month, day)
            .time_slot(TimeSlot::Morning)
            .dialogue(paths.kr, paths.en)
            .build()
            .unwrap()
    }

    #[test_case(2, 2024, Weekday::Thu, 33; "leap february starting thursday")]
    #[test_case(2, 2025, Weekday::Sun, 28; "february without padding")]
    #[test_case(12, 2025, Weekday::Sat, 37; "december starting saturday")]
    fn test_cell_count(month: u32, year: i32, first: Weekday, expected: usize) {
        let cells = generate(month, year, &[], first).unwrap();
        assert_eq!(cells.len(), expected);
    }

    #[test]
    fn test_padding_then_contiguous_days() {
        let cells = generate(4, 2025, &[], Weekday::Tue).unwrap();

        assert!(cells[..2].iter().all(|c| c.day_number == 0 && !c.is_current_month));
        let days: Vec<u32> = cells[2..].iter().map(|c| c.day_number).collect();
        assert_eq!(days, (1..=30).collect::<Vec<u32>>());
        assert!(cells[2..].iter().all(|c| c.is_current_month));
    }

    #[test]
    fn test_events_placed_in_order() {
        let events = vec![event(3, 3, 5), event(1, 3, 5), event(2, 4, 5), event(4, 3, 6)];
        let cells = generate(3, 2025, &events, Weekday::Sun).unwrap();

        let fifth: Vec<i64> = cells[4].events.iter().map(|e| e.id).collect();
        assert_eq!(cells[4].day_number, 5);
        assert_eq!(fifth, vec![3, 1]);
        assert_eq!(cells[5].events.len(), 1);
    }

    #[test]
    fn test_impossible_day_is_not_placed() {
        let events = vec![event(1, 4, 31)];
        let cells = generate(4, 2025, &events, Weekday::Sun).unwrap();
        assert!(cells.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        assert!(generate(13, 2025, &[], Weekday::Sun).is_err());
        assert!(generate(0, 2025, &[], Weekday::Sun).is_err());
    }

    #[test]
    fn test_weeks_chunks_by_seven() {
        let cells = generate(2, 2026, &[], Weekday::Sun).unwrap();
        let rows: Vec<usize> = weeks(&cells).map(|row| row.len()).collect();
        assert_eq!(rows, vec![7, 7, 7, 7]);
    }
}
