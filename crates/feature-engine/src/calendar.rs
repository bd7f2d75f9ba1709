//! Calendar helpers

use chrono::{Datelike, Local};

/// Current year of the local system date
pub fn current_year() -> i64 {
    i64::from(Local::now().year())
}
