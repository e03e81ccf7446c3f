//! Attendance calendar: month cursor, day grid, monthly totals.

use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{AttendanceRecord, DATE_KEY_FORMAT};

/// Fixed first row of every month grid
pub const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Attended days as `YYYY-MM-DD` keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSet(BTreeSet<String>);

impl AttendanceSet {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut skipped = 0;
        let keys = records
            .iter()
            .filter_map(|record| {
                let key = record.date_key();
                if key.is_none() {
                    skipped += 1;
                }
                key
            })
            .collect();

        if skipped > 0 {
            tracing::warn!("Skipped {} attendance records without a readable date", skipped);
        }

        Self(keys)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(&date.format(DATE_KEY_FORMAT).to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// "Total this month": attended days falling in the cursor's month
    pub fn count_in(&self, cursor: CalendarCursor) -> usize {
        let prefix = format!("{:04}-{:02}-", cursor.year(), cursor.month());
        self.0.iter().filter(|key| key.starts_with(&prefix)).count()
    }
}

impl FromIterator<NaiveDate> for AttendanceSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|d| d.format(DATE_KEY_FORMAT).to_string())
                .collect(),
        )
    }
}

/// Month shown by the calendar.
///
/// Stored as a single month index (`year * 12 + month0`) so stepping never lands on an
/// invalid day and always rolls over year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarCursor {
    index: i32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Self {
        let month0 = month.clamp(1, 12) as i32 - 1;
        Self {
            index: year * 12 + month0,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.index.div_euclid(12)
    }

    /// 1-based month
    pub fn month(&self) -> u32 {
        self.index.rem_euclid(12) as u32 + 1
    }

    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
        }
    }

    pub fn prev(self) -> Self {
        Self {
            index: self.index - 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// e.g. `October 2026`
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date_key: String,
    pub attended: bool,
    pub today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

/// One rendered month: header row, leading blanks, then one cell per day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: CalendarCursor,
    pub header: [&'static str; 7],
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(cursor: CalendarCursor, attended: &AttendanceSet, today: NaiveDate) -> Self {
        let first = cursor.first_day();
        let leading_blanks = first.weekday().num_days_from_sunday() as usize;

        let days = (1..=cursor.days_in_month())
            .map(|day| {
                let date_key = format!("{:04}-{:02}-{:02}", cursor.year(), cursor.month(), day);
                DayCell {
                    day,
                    attended: attended.contains(&date_key),
                    today: cursor.contains(today) && today.day() == day,
                    date_key,
                }
            })
            .collect();

        Self {
            cursor,
            header: WEEKDAY_HEADER,
            leading_blanks,
            days,
        }
    }

    /// Body cells in display order, header excluded
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        std::iter::repeat(GridCell::Blank)
            .take(self.leading_blanks)
            .chain(self.days.iter().cloned().map(GridCell::Day))
    }

    /// Body cells chunked into Sunday-first weeks
    pub fn weeks(&self) -> Vec<Vec<GridCell>> {
        let cells: Vec<GridCell> = self.cells().collect();
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn attended_days(&self) -> usize {
        self.days.iter().filter(|d| d.attended).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_layout_for_known_month() {
        // 1 June 2025 is a Sunday, 1 October 2026 a Thursday
        let june = MonthGrid::build(CalendarCursor::new(2025, 6), &AttendanceSet::default(), date(2000, 1, 1));
        assert_eq!(june.header, WEEKDAY_HEADER);
        assert_eq!(june.leading_blanks, 0);
        assert_eq!(june.days.len(), 30);

        let october = MonthGrid::build(CalendarCursor::new(2026, 10), &AttendanceSet::default(), date(2000, 1, 1));
        assert_eq!(october.leading_blanks, 4);
        assert_eq!(october.days.len(), 31);
        assert_eq!(october.cells().count(), 35);
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(CalendarCursor::new(2024, 2).days_in_month(), 29);
        assert_eq!(CalendarCursor::new(2025, 2).days_in_month(), 28);
    }

    #[test]
    fn test_year_rollover() {
        let december = CalendarCursor::new(2025, 12);
        assert_eq!(december.next(), CalendarCursor::new(2026, 1));
        assert_eq!(CalendarCursor::new(2026, 1).prev(), december);
        assert_eq!(december.title(), "December 2025");
    }

    #[test]
    fn test_today_flag_only_in_its_month() {
        let today = date(2026, 10, 16);
        let grid = MonthGrid::build(CalendarCursor::from_date(today), &AttendanceSet::default(), today);
        let flagged: Vec<u32> = grid.days.iter().filter(|d| d.today).map(|d| d.day).collect();
        assert_eq!(flagged, vec![16]);

        let grid = MonthGrid::build(CalendarCursor::new(2026, 9), &AttendanceSet::default(), today);
        assert!(grid.days.iter().all(|d| !d.today));
    }

    #[test]
    fn test_records_bucket_into_keys_and_month_total() {
        let records: Vec<AttendanceRecord> = serde_json::from_value(serde_json::json!([
            {"id": 1, "checkInTime": "2026-10-02T07:15:00"},
            {"id": 2, "checkInTime": [2026, 10, 2, 18, 0]},
            {"id": 3, "checkInTime": {"year": 2026, "monthValue": 10, "dayOfMonth": 9}},
            {"id": 4, "checkInTime": "2026-09-30"},
            {"id": 5, "checkInTime": null}
        ]))
        .unwrap();

        let set = AttendanceSet::from_records(&records);
        assert_eq!(set.len(), 3);
        assert_eq!(set.count_in(CalendarCursor::new(2026, 10)), 2);
        assert_eq!(set.count_in(CalendarCursor::new(2026, 9)), 1);

        let grid = MonthGrid::build(CalendarCursor::new(2026, 10), &set, date(2026, 10, 16));
        assert_eq!(grid.attended_days(), 2);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..=12, 1u32..=31).prop_filter_map("valid date", |(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        })
    }

    proptest! {
        #[test]
        fn prop_attended_date_marks_exactly_its_cell(day in any_date()) {
            let set: AttendanceSet = std::iter::once(day).collect();
            let grid = MonthGrid::build(CalendarCursor::from_date(day), &set, date(1900, 1, 1));

            let marked: Vec<u32> = grid.days.iter().filter(|c| c.attended).map(|c| c.day).collect();
            prop_assert_eq!(marked, vec![day.day()]);
            prop_assert_eq!(
                grid.leading_blanks,
                CalendarCursor::from_date(day).first_day().weekday().num_days_from_sunday() as usize
            );
        }

        #[test]
        fn prop_next_then_prev_is_identity(day in any_date(), steps in 0usize..40) {
            let start = CalendarCursor::from_date(day);
            let mut cursor = start;
            for _ in 0..steps {
                cursor = cursor.next();
            }
            for _ in 0..steps {
                cursor = cursor.prev();
            }
            prop_assert_eq!(cursor, start);
            prop_assert_eq!(start.next().prev(), start);
            prop_assert_eq!(start.prev().next(), start);
        }
    }
}
