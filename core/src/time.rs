//! Time related utils.

use crate::Result;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime in UTC, the only timezone used while signing.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: "20220313"
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601 basic format: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse time from ISO 8601 basic format: "20220313T072004Z"
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    Ok(NaiveDateTime::parse_from_str(s, ISO8601)?.and_utc())
}

/// Parse time from RFC 2822, which covers HTTP dates like
/// "Sun, 13 Mar 2022 07:20:04 GMT".
pub fn parse_rfc2822(s: &str) -> Result<DateTime> {
    Ok(chrono::DateTime::parse_from_rfc2822(s)?.with_timezone(&Utc))
}
