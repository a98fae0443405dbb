use crate::error::AppError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DUE_DATE_INPUT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month padding:none]-[day padding:none]");
const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Stand-in for a missing due date when ordering tasks.
pub const DUE_DATE_SENTINEL: &str = "9999-12-31";

/// Normalizes user input into a `YYYY-MM-DD` due date.
///
/// Month and day may omit their leading zero. Blank input and anything that
/// is not a real calendar date yield `None`.
pub fn parse_due_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Date::parse(trimmed, DUE_DATE_INPUT)
        .ok()
        .and_then(|date| date.format(DUE_DATE_FORMAT).ok())
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp_now() -> Result<String, AppError> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc()
        .to_offset(offset)
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
