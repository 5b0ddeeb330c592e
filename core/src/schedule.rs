// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::civil::{Date, Time, Weekday};
use serde::ser::SerializeSeq;

use crate::Error;

/// Weekday tokens as printed by the institution, Monday first.
pub const WEEKDAY_TOKENS: [(&str, Weekday); 7] = [
    ("Lun", Weekday::Monday),
    ("Mar", Weekday::Tuesday),
    ("Mié", Weekday::Wednesday),
    ("Jue", Weekday::Thursday),
    ("Vie", Weekday::Friday),
    ("Sáb", Weekday::Saturday),
    ("Dom", Weekday::Sunday),
];

/// Resolve a weekday token such as `Lun` or `mié`, ignoring case.
pub fn weekday_from_token(token: &str) -> Option<Weekday> {
    let lower = token.to_lowercase();
    WEEKDAY_TOKENS
        .iter()
        .find(|(t, _)| t.to_lowercase() == lower)
        .map(|(_, w)| *w)
}

/// The institutional token of a weekday.
pub fn weekday_token(weekday: Weekday) -> &'static str {
    let offset = weekday.to_monday_zero_offset();
    WEEKDAY_TOKENS
        .iter()
        .find(|(_, w)| w.to_monday_zero_offset() == offset)
        .map_or("?", |(t, _)| t)
}

fn weekday_slug(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "mon",
        Weekday::Tuesday => "tue",
        Weekday::Wednesday => "wed",
        Weekday::Thursday => "thu",
        Weekday::Friday => "fri",
        Weekday::Saturday => "sat",
        Weekday::Sunday => "sun",
    }
}

/// A non-empty set of distinct meeting weekdays, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weekdays(Vec<Weekday>);

impl Weekdays {
    /// Builds the set from the weekdays in the order they were listed, dropping repeats.
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Result<Self, Error> {
        let mut list: Vec<Weekday> = Vec::with_capacity(7);
        for day in days {
            if !list.contains(&day) {
                list.push(day);
            }
        }

        match list.is_empty() {
            true => Err(Error::EmptyWeekdays),
            false => Ok(Self(list)),
        }
    }

    /// Weekdays in document order.
    pub fn as_slice(&self) -> &[Weekday] {
        &self.0
    }

    /// Weekdays sorted by their Monday-based ordinal.
    pub fn sorted(&self) -> Vec<Weekday> {
        let mut days = self.0.clone();
        days.sort_by_key(|w| w.to_monday_zero_offset());
        days
    }

    /// The weekday with the smallest Monday-based ordinal.
    pub fn first_by_ordinal(&self) -> Weekday {
        self.0
            .iter()
            .copied()
            .min_by_key(|w| w.to_monday_zero_offset())
            .unwrap_or(Weekday::Monday) // non-empty by construction
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0.contains(&weekday)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", weekday_token(*day))?;
        }
        Ok(())
    }
}

impl serde::Serialize for Weekdays {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for day in &self.0 {
            seq.serialize_element(weekday_token(*day))?;
        }
        seq.end()
    }
}

/// How a class is delivered. The labels are the ones the document prints.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
pub enum DeliveryFormat {
    /// Attended in a classroom.
    #[default]
    #[strum(serialize = "Presencial")]
    #[serde(rename = "Presencial")]
    OnSite,

    /// Delivered remotely to the national campus network.
    #[strum(serialize = "Remoto nacional")]
    #[serde(rename = "Remoto nacional")]
    RemoteDomestic,

    /// Fully online.
    #[strum(serialize = "En línea")]
    #[serde(rename = "En línea")]
    Online,
}

/// Teaching language of a class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Language {
    /// The institution's default language.
    #[default]
    Default,

    /// Taught in English.
    English,
}

/// One class meeting pattern recovered from a subject-unit block.
///
/// A subject with several weekday/time patterns yields several records that share
/// every block-level field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduleRecord {
    /// Formation-unit identifier.
    pub subject_code: String,

    pub subject_name: String,

    /// Free text, may list several names.
    pub instructors: String,

    pub sub_period: Option<String>,

    pub crn: Option<String>,

    pub weekdays: Weekdays,

    pub start_time: Time,

    pub end_time: Time,

    pub term_start: Date,

    pub term_end: Date,

    pub location: String,

    pub delivery_format: DeliveryFormat,

    pub language: Language,

    /// Whether the class is scheduled as one contiguous window instead of per period.
    pub short_form: bool,
}

impl ScheduleRecord {
    /// Whether the class is scheduled as one contiguous window.
    pub fn is_short_form(&self) -> bool {
        self.short_form
    }

    /// A stable identity for this meeting pattern, independent of period splitting.
    pub fn key(&self) -> String {
        let mut key = String::new();
        for c in self.subject_code.chars() {
            match c.is_ascii_alphanumeric() {
                true => key.push(c.to_ascii_lowercase()),
                false => key.push('_'),
            }
        }

        if let Some(crn) = &self.crn {
            key.push('-');
            key.push_str(crn);
        }

        for day in self.weekdays.sorted() {
            key.push('-');
            key.push_str(weekday_slug(day));
        }

        key.push_str(&self.start_time.strftime("-%H%M").to_string());
        key
    }
}

/// Rules classifying a class as short-form (intensive week, 18th week, ...).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ShortFormRules {
    /// A term spanning at most this many days is short-form.
    pub max_days: i32,

    /// Case-insensitive substrings of the subject name marking a short-form class.
    pub keywords: Vec<String>,
}

impl Default for ShortFormRules {
    fn default() -> Self {
        Self {
            max_days: 7,
            keywords: ["st -", "18 -", "semana 18", "semana tec"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ShortFormRules {
    /// Classifies a class by its term window and subject name.
    pub fn matches(&self, subject_name: &str, term_start: Date, term_end: Date) -> bool {
        let days = (term_end - term_start).get_days();
        if days <= self.max_days {
            return true;
        }

        let name = subject_name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }
}

/// Document-level information found before the first subject unit.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduleHeader {
    /// Date the voucher was issued.
    pub process_date: Option<Date>,

    /// Three-letter campus code.
    pub campus: Option<String>,

    /// Degree program name.
    pub career: Option<String>,
}
