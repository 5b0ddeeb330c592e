// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};

use crate::Error;

/// A holiday on the same month and day every year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FixedHoliday {
    pub month: i8,
    pub day: i8,
    #[serde(default)]
    pub name: String,
}

/// A holiday observed on the k-th Monday of a month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct MondayHoliday {
    pub month: i8,
    pub nth: i8,
    #[serde(default)]
    pub name: String,
}

/// Rule table for the days on which no class takes place.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct HolidayRules {
    pub fixed: Vec<FixedHoliday>,

    pub floating: Vec<MondayHoliday>,

    /// Exclude Palm Sunday through Easter Sunday.
    pub holy_week: bool,
}

impl Default for HolidayRules {
    fn default() -> Self {
        let fixed = |month, day, name: &str| FixedHoliday {
            month,
            day,
            name: name.to_string(),
        };
        let monday = |month, nth, name: &str| MondayHoliday {
            month,
            nth,
            name: name.to_string(),
        };

        Self {
            fixed: vec![
                fixed(5, 1, "Día del Trabajo"),
                fixed(9, 16, "Día de la Independencia"),
            ],
            floating: vec![
                monday(2, 1, "Día de la Constitución"),
                monday(3, 3, "Natalicio de Benito Juárez"),
                monday(11, 3, "Día de la Revolución"),
            ],
            holy_week: true,
        }
    }
}

impl HolidayRules {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        for h in &self.fixed {
            // 2000 is a leap year, so February 29 passes here and is skipped in other years.
            if Date::new(2000, h.month, h.day).is_err() {
                return Err(Error::Config(format!(
                    "fixed holiday '{}' has invalid month/day {}/{}",
                    h.name, h.month, h.day
                )));
            }
        }

        for h in &self.floating {
            if !(1..=12).contains(&h.month) || !(1..=5).contains(&h.nth) {
                return Err(Error::Config(format!(
                    "floating holiday '{}' needs a month in 1..=12 and nth in 1..=5, got {}/{}",
                    h.name, h.month, h.nth
                )));
            }
        }

        Ok(())
    }
}

/// Where a holiday comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display)]
pub enum HolidayKind {
    #[strum(serialize = "fixed")]
    Fixed,

    #[strum(serialize = "monday")]
    Monday,

    #[strum(serialize = "holy week")]
    HolyWeek,
}

/// A concrete excluded date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Holiday {
    pub date: Date,
    pub name: String,
    pub kind: HolidayKind,
}

/// Easter Sunday of the given Gregorian year (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i16) -> Result<Date, Error> {
    let y = i32::from(year);
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = (19 * a + b - b / 4 - (b - (b + 8) / 25 + 1) / 3 + 15) % 30;
    let e = (32 + 2 * (b % 4) + 2 * (c / 4) - d - (c % 4)) % 7;
    let f = d + e - 7 * ((a + 11 * d + 22 * e) / 451) + 114;

    let month = i8::try_from(f / 31).map_err(|_| Error::InvalidDate(format!("easter {year}")))?;
    let day = i8::try_from(f % 31 + 1).map_err(|_| Error::InvalidDate(format!("easter {year}")))?;
    Ok(Date::new(year, month, day)?)
}

/// Palm Sunday through Easter Sunday, both inclusive.
pub fn holy_week(year: i16) -> Result<(Date, Date), Error> {
    let easter = easter_sunday(year)?;
    Ok((easter.checked_sub(7.days())?, easter))
}

/// The `nth` Monday of `month` in `year`, `None` if the month has fewer Mondays.
pub fn nth_monday(year: i16, month: i8, nth: i8) -> Option<Date> {
    Date::new(year, month, 1)
        .and_then(|first| first.nth_weekday_of_month(nth, Weekday::Monday))
        .ok()
}

/// Derives holiday dates from a rule table, one calendar year at a time.
#[derive(Debug, Clone, Copy)]
pub struct HolidayCalendar<'a> {
    rules: &'a HolidayRules,
}

impl<'a> HolidayCalendar<'a> {
    pub fn new(rules: &'a HolidayRules) -> Self {
        Self { rules }
    }

    /// All holidays of a calendar year, in rule order.
    pub fn holidays_in_year(&self, year: i16) -> Vec<Holiday> {
        let mut holidays = Vec::new();

        for h in &self.rules.fixed {
            match Date::new(year, h.month, h.day) {
                Ok(date) => holidays.push(Holiday {
                    date,
                    name: h.name.clone(),
                    kind: HolidayKind::Fixed,
                }),
                Err(_) => tracing::debug!(year, name = %h.name, "fixed holiday absent this year"),
            }
        }

        for h in &self.rules.floating {
            match nth_monday(year, h.month, h.nth) {
                Some(date) => holidays.push(Holiday {
                    date,
                    name: h.name.clone(),
                    kind: HolidayKind::Monday,
                }),
                None => tracing::debug!(year, name = %h.name, "monday holiday absent this year"),
            }
        }

        if self.rules.holy_week {
            match holy_week(year) {
                Ok((start, end)) => {
                    let days = start.series(1.day()).take_while(|d| *d <= end);
                    holidays.extend(days.map(|date| Holiday {
                        date,
                        name: "Semana Santa".to_string(),
                        kind: HolidayKind::HolyWeek,
                    }));
                }
                Err(err) => tracing::warn!(year, %err, "failed to compute holy week"),
            }
        }

        holidays
    }

    /// Holidays within `[start, end]`, sorted by date.
    pub fn holidays_in_range(&self, start: Date, end: Date) -> Vec<Holiday> {
        if start > end {
            return Vec::new();
        }

        let mut holidays: Vec<Holiday> = (start.year()..=end.year())
            .flat_map(|year| self.holidays_in_year(year))
            .filter(|h| start <= h.date && h.date <= end)
            .collect();
        holidays.sort_by_key(|h| h.date);
        holidays
    }

    /// Excluded dates within `[start, end]`, ascending and without duplicates.
    pub fn exclusions_in_range(&self, start: Date, end: Date) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .holidays_in_range(start, end)
            .into_iter()
            .map(|h| h.date)
            .collect();
        dates.dedup();
        dates
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn computes_known_easter_sundays() {
        assert_eq!(easter_sunday(2024).unwrap(), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025).unwrap(), date(2025, 4, 20));
        assert_eq!(easter_sunday(2026).unwrap(), date(2026, 4, 5));
        assert_eq!(easter_sunday(2038).unwrap(), date(2038, 4, 25));
        assert_eq!(easter_sunday(2285).unwrap(), date(2285, 3, 22));
    }

    #[test]
    fn holy_week_ends_on_easter() {
        assert_eq!(
            holy_week(2025).unwrap(),
            (date(2025, 4, 13), date(2025, 4, 20))
        );
    }

    #[test]
    fn finds_nth_monday() {
        assert_eq!(nth_monday(2025, 2, 1), Some(date(2025, 2, 3)));
        assert_eq!(nth_monday(2025, 3, 3), Some(date(2025, 3, 17)));
        assert_eq!(nth_monday(2025, 11, 3), Some(date(2025, 11, 17)));
        assert_eq!(nth_monday(2024, 2, 1), Some(date(2024, 2, 5)));
        assert_eq!(nth_monday(2025, 2, 5), None);
    }

    #[test]
    fn exclusions_cover_all_rule_kinds() {
        let rules = HolidayRules::default();
        let calendar = HolidayCalendar::new(&rules);
        let dates = calendar.exclusions_in_range(date(2025, 1, 1), date(2025, 12, 31));

        let mut expected = vec![
            date(2025, 2, 3),
            date(2025, 3, 17),
            date(2025, 5, 1),
            date(2025, 9, 16),
            date(2025, 11, 17),
        ];
        expected.extend((13..=20).map(|d| date(2025, 4, d)));
        expected.sort();
        assert_eq!(dates, expected);
    }

    #[test]
    fn exclusions_span_year_boundaries() {
        let rules = HolidayRules::default();
        let calendar = HolidayCalendar::new(&rules);
        let dates = calendar.exclusions_in_range(date(2025, 11, 1), date(2026, 2, 28));
        assert_eq!(dates, vec![date(2025, 11, 17), date(2026, 2, 2)]);
    }

    #[test]
    fn overlapping_rules_are_reported_once() {
        // Easter 2025 is April 20; a fixed holiday inside Holy Week must not duplicate.
        let rules = HolidayRules {
            fixed: vec![FixedHoliday {
                month: 4,
                day: 17,
                name: "Jueves Santo".to_string(),
            }],
            ..Default::default()
        };
        let calendar = HolidayCalendar::new(&rules);
        let dates = calendar.exclusions_in_range(date(2025, 4, 14), date(2025, 4, 18));
        assert_eq!(
            dates,
            (14..=18).map(|d| date(2025, 4, d)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn widening_a_range_never_loses_exclusions() {
        let rules = HolidayRules::default();
        let calendar = HolidayCalendar::new(&rules);
        let narrow = calendar.exclusions_in_range(date(2025, 4, 15), date(2025, 5, 1));
        let wide = calendar.exclusions_in_range(date(2025, 1, 1), date(2025, 6, 30));
        assert!(!narrow.is_empty());
        assert!(narrow.iter().all(|d| wide.contains(d)));
    }

    #[test]
    fn inverted_range_is_empty() {
        let rules = HolidayRules::default();
        let calendar = HolidayCalendar::new(&rules);
        assert!(
            calendar
                .exclusions_in_range(date(2025, 5, 2), date(2025, 5, 1))
                .is_empty()
        );
    }

    #[test]
    fn leap_day_holiday_is_skipped_in_common_years() {
        let rules = HolidayRules {
            fixed: vec![FixedHoliday {
                month: 2,
                day: 29,
                name: String::new(),
            }],
            floating: vec![],
            holy_week: false,
        };
        assert!(rules.validate().is_ok());
        let calendar = HolidayCalendar::new(&rules);
        assert_eq!(calendar.holidays_in_year(2025), vec![]);
        assert_eq!(calendar.holidays_in_year(2024).len(), 1);
    }

    #[test]
    fn rejects_invalid_rules() {
        let rules = HolidayRules {
            floating: vec![MondayHoliday {
                month: 3,
                nth: 6,
                name: "bad".to_string(),
            }],
            ..Default::default()
        };
        assert!(matches!(rules.validate(), Err(Error::Config(_))));
    }
}
