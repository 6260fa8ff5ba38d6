use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// e.g. "Friday, March 15, 2024, 2:22 PM +01:00". chrono's `Local` knows
/// only the numeric UTC offset, not the zone abbreviation.
const DATE_FORMAT: &str = "%A, %B %d, %Y, %-I:%M %p %Z";

/// Last-modified time of `path` in local time.
pub fn modified_at(path: &Path) -> Result<DateTime<Local>> {
    let stat_err = |source: std::io::Error| Error::Stat {
        path: path.to_path_buf(),
        source,
    };
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(stat_err)?;
    Ok(DateTime::from(modified))
}

pub fn format_date(t: &DateTime<Local>) -> String {
    t.format(DATE_FORMAT).to_string()
}

/// Human-readable modification date of one file.
pub fn file_date(path: &Path) -> Result<String> {
    modified_at(path).map(|t| format_date(&t))
}
