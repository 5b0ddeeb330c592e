// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Line classifiers for the institutional schedule export.

use std::sync::OnceLock;

use jiff::civil::{Date, Time, Weekday};
use regex::Regex;

use crate::{DeliveryFormat, weekday_from_token};

/// Literal that opens every subject-unit block.
pub const SUBJECT_MARKER: &str = "Unidad de formación:";

/// Marker of the sub-period/CRN line, singular or plural.
pub const SUB_PERIOD_MARKER: &str = "Sub-período";

pub const CRN_LABEL: &str = "CRN";

pub const FIELD_SEPARATOR: char = '|';

/// Markers on a location line meaning the class is delivered to the national campus.
pub const REMOTE_DOMESTIC_MARKERS: [&str; 2] = ["NAL", "Campus Nacional"];

pub const ENGLISH_LABEL: &str = "Inglés";

const WEEKDAY_ALTERNATION: &str = "lun|mar|mié|jue|vie|sáb|dom";

/// A time-of-day token as printed, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToken<'a> {
    pub text: &'a str,
    pub hour: i8,
    pub minute: i8,
}

impl TimeToken<'_> {
    pub fn to_time(self) -> Option<Time> {
        Time::new(self.hour, self.minute, 0, 0).ok()
    }
}

/// A weekday/time line: its weekdays in order and every time token on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLine<'a> {
    pub weekdays: Vec<Weekday>,
    pub times: Vec<TimeToken<'a>>,
}

/// Whether the line begins with a weekday token.
pub fn starts_with_weekday(line: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?i)^(?:{WEEKDAY_ALTERNATION})\b")).unwrap()
    });
    re.is_match(line)
}

/// Parses a schedule-pattern line: starts with a weekday and carries at least one time.
pub fn schedule_line(line: &str) -> Option<ScheduleLine<'_>> {
    static WEEKDAYS: OnceLock<Regex> = OnceLock::new();
    static TIMES: OnceLock<Regex> = OnceLock::new();

    if !starts_with_weekday(line) {
        return None;
    }

    let times_re = TIMES.get_or_init(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());
    let times: Vec<TimeToken<'_>> = times_re
        .captures_iter(line)
        .filter_map(|c| {
            Some(TimeToken {
                text: c.get(0)?.as_str(),
                hour: c[1].parse().ok()?,
                minute: c[2].parse().ok()?,
            })
        })
        .collect();
    if times.is_empty() {
        return None;
    }

    let weekdays_re = WEEKDAYS.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b(?:{WEEKDAY_ALTERNATION})\b")).unwrap()
    });
    let weekdays = weekdays_re
        .find_iter(line)
        .filter_map(|m| weekday_from_token(m.as_str()))
        .collect();

    Some(ScheduleLine { weekdays, times })
}

/// Result of matching a `DD[./]MM[./]YYYY - DD[./]MM[./]YYYY` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermDates {
    Valid(Date, Date),
    /// The line has the shape but names an impossible calendar date.
    Invalid,
}

/// Matches a term window line, accepting both `.` and `/` as separators.
pub fn term_dates(line: &str) -> Option<TermDates> {
    const RE: &str = r"(\d{2})[./](\d{2})[./](\d{4})\s*-\s*(\d{2})[./](\d{2})[./](\d{4})";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let c = re.captures(line)?;
    let date_at = |i: usize| -> Option<Date> {
        let day = c[i].parse().ok()?;
        let month = c[i + 1].parse().ok()?;
        let year = c[i + 2].parse().ok()?;
        Date::new(year, month, day).ok()
    };

    Some(match (date_at(1), date_at(4)) {
        (Some(start), Some(end)) => TermDates::Valid(start, end),
        _ => TermDates::Invalid,
    })
}

pub fn is_sub_period_line(line: &str) -> bool {
    line.contains(SUB_PERIOD_MARKER)
}

/// Extracts `(label, crn)` from a `Sub-período(s) <label> CRN <digits>` line.
pub fn sub_period_and_crn(line: &str) -> (Option<String>, Option<String>) {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    static CRN: OnceLock<Regex> = OnceLock::new();

    let label_re = LABEL
        .get_or_init(|| Regex::new(r"Sub-períodos?\s+(.+?)(?:\s+CRN\b|$)").unwrap());
    let crn_re = CRN.get_or_init(|| Regex::new(r"\bCRN\s+(\d+)").unwrap());

    let label = label_re
        .captures(line)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());
    let crn = crn_re.captures(line).map(|c| c[1].to_string());
    (label, crn)
}

/// Whether the line can be the location line.
pub fn is_location_line(line: &str) -> bool {
    line.contains(FIELD_SEPARATOR) && !is_sub_period_line(line) && !line.contains(CRN_LABEL)
}

/// The delivery format a location line implies.
pub fn format_from_location(line: &str) -> DeliveryFormat {
    match REMOTE_DOMESTIC_MARKERS.iter().any(|m| line.contains(m)) {
        true => DeliveryFormat::RemoteDomestic,
        false => DeliveryFormat::OnSite,
    }
}

/// A line that is exactly one of the delivery-format labels.
pub fn format_label(line: &str) -> Option<DeliveryFormat> {
    line.parse().ok()
}

/// The voucher date in the document preamble.
pub fn process_date(line: &str) -> Option<Date> {
    const RE: &str = r"Última hora del comprobante:\s*(\d{2})\.(\d{2})\.(\d{4})";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let c = re.captures(line)?;
    Date::new(c[3].parse().ok()?, c[2].parse().ok()?, c[1].parse().ok()?).ok()
}

/// The `CMP / School / Career` line in the document preamble.
pub fn campus_and_career(line: &str) -> Option<(String, String)> {
    const RE: &str = r"\b([A-Z]{3})\s*/\s*([^/]+?)\s*/\s*([^/]+)$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let c = re.captures(line.trim())?;
    Some((c[1].to_string(), c[3].trim().to_string()))
}
