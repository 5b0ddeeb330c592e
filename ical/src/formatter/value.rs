// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Value formatting for the iCalendar value types the writer emits.

use std::io::{self, Write};

use horario_core::Weekdays;
use jiff::civil::Weekday;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::formatter::Formatter;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_FREQ, KW_RRULE_FREQ_WEEKLY, KW_RRULE_UNTIL,
};

/// Format a local date-time value as `YYYYMMDDTHHMMSS`, the form paired with `TZID`.
pub fn write_local_date_time<W: Write>(f: &mut Formatter<W>, zoned: &Zoned) -> io::Result<()> {
    write!(f, "{}", zoned.strftime("%Y%m%dT%H%M%S"))
}

/// Format an instant as a UTC date-time value `YYYYMMDDTHHMMSSZ`.
pub fn write_utc_date_time<W: Write>(f: &mut Formatter<W>, timestamp: Timestamp) -> io::Result<()> {
    let utc = timestamp.to_zoned(TimeZone::UTC);
    write!(f, "{}", utc.strftime("%Y%m%dT%H%M%SZ"))
}

/// Format a weekly recurrence rule (RFC 5545 Section 3.3.10).
pub fn write_weekly_rule<W: Write>(
    f: &mut Formatter<W>,
    weekdays: &Weekdays,
    until: &Zoned,
) -> io::Result<()> {
    write!(f, "{KW_RRULE_FREQ}={KW_RRULE_FREQ_WEEKLY};{KW_RRULE_BYDAY}=")?;
    for (i, day) in weekdays.sorted().into_iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", weekday_code(day))?;
    }

    // UNTIL must be UTC when DTSTART carries a TZID.
    write!(f, ";{KW_RRULE_UNTIL}=")?;
    write_utc_date_time(f, until.timestamp())
}

/// The two-letter RFC 5545 code of a weekday.
#[must_use]
pub fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => KW_DAY_MO,
        Weekday::Tuesday => KW_DAY_TU,
        Weekday::Wednesday => KW_DAY_WE,
        Weekday::Thursday => KW_DAY_TH,
        Weekday::Friday => KW_DAY_FR,
        Weekday::Saturday => KW_DAY_SA,
        Weekday::Sunday => KW_DAY_SU,
    }
}

/// Escape text for an iCalendar TEXT value.
///
/// Backslash, semicolon, comma and newline are escaped; carriage returns are dropped.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {} // Skip CR characters
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::formatter::FormatOptions;

    fn render(write: impl FnOnce(&mut Formatter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        let mut f = Formatter::new(&mut buffer, FormatOptions::default());
        write(&mut f).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text("López, Ana; Dr.\r\nC:\\"),
            "López\\, Ana\\; Dr.\\nC:\\\\"
        );
    }

    #[test]
    fn test_format_local_and_utc() {
        let zoned = date(2025, 2, 10)
            .at(7, 0, 0, 0)
            .in_tz("America/Mexico_City")
            .unwrap();
        assert_eq!(
            render(|f| write_local_date_time(f, &zoned)),
            "20250210T070000"
        );
        assert_eq!(
            render(|f| write_utc_date_time(f, zoned.timestamp())),
            "20250210T130000Z"
        );
    }

    #[test]
    fn test_format_weekly_rule() {
        let weekdays = Weekdays::new([Weekday::Wednesday, Weekday::Monday]).unwrap();
        let until = date(2025, 3, 17).in_tz("America/Mexico_City").unwrap();
        assert_eq!(
            render(|f| write_weekly_rule(f, &weekdays, &until)),
            "FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250317T060000Z"
        );
    }
}
