use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid date format, expected YYYY-MM-DD")]
    InvalidDateFormat,
}

// chrono accepts unpadded fields, so the shape is checked byte by byte first.
fn is_zero_padded_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses a `YYYY-MM-DD` calendar date. The result carries no time zone;
/// callers that need an instant treat it as midnight UTC.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    if !is_zero_padded_date(value) {
        return Err(DateParseError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DateParseError::InvalidDateFormat)
}
