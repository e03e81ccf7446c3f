use chrono::NaiveDate;
use serde::Deserialize;

use super::date::deserialize_opt_date;

/// Format of the keys the membership calendar looks up
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// One gym check-in
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub check_in_time: Option<NaiveDate>,
}

impl AttendanceRecord {
    /// `YYYY-MM-DD` key of the check-in day, if the check-in time could be read
    pub fn date_key(&self) -> Option<String> {
        self.check_in_time
            .map(|d| d.format(DATE_KEY_FORMAT).to_string())
    }
}
