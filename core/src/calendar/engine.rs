// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;
use std::sync::OnceLock;

use jiff::civil::{Date, Time, Weekday};
use jiff::tz::TimeZone;
use jiff::Zoned;
use regex::Regex;

use crate::calendar::{AcademicPeriod, HolidayCalendar, compute_periods};
use crate::{Config, Error, Language, ScheduleRecord, Weekdays};

/// A weekly recurrence over a set of weekdays.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Recurrence {
    pub weekdays: Weekdays,

    /// Midnight of the day after the last possible occurrence.
    pub until: Zoned,
}

/// A serializer-neutral recurring calendar event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventDescriptor {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: Zoned,
    pub end: Zoned,

    /// `None` for a single occurrence.
    pub recurrence: Option<Recurrence>,

    /// Occurrence instants to skip, ascending and without duplicates.
    pub exceptions: Vec<Zoned>,

    /// 1-based academic period, `None` for short-form classes.
    pub period: Option<u8>,

    /// Stable identity of the source record.
    pub key: String,
}

/// A record that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecordFailure {
    pub subject_code: String,
    pub key: String,
    pub error: String,
}

/// Counters of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct GenerationReport {
    pub records_in: usize,

    /// Records whose term ended before the cutoff date.
    pub concluded: usize,

    pub failed: Vec<RecordFailure>,

    /// Periods that do not overlap the term or ended before the cutoff date.
    pub periods_skipped: usize,

    /// Windows with no meeting weekday left after the cutoff date.
    pub windows_without_occurrence: usize,

    /// Records that produced at least one event.
    pub records_with_events: usize,

    pub events_out: usize,
}

impl GenerationReport {
    /// Whether some records still running produced no event.
    pub fn has_discrepancy(&self) -> bool {
        self.records_with_events + self.concluded < self.records_in
    }
}

/// Events of one generation run and what happened to each record.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Generation {
    pub events: Vec<EventDescriptor>,
    pub report: GenerationReport,
}

#[derive(Debug, Default)]
struct Tally {
    periods_skipped: usize,
    windows_without_occurrence: usize,
}

/// Turns schedule records into recurring events in the configured zone.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    config: &'a Config,
    tz: TimeZone,
    holidays: HolidayCalendar<'a>,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            tz: config.time_zone()?,
            holidays: HolidayCalendar::new(&config.holidays),
        })
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    pub fn holidays(&self) -> &HolidayCalendar<'a> {
        &self.holidays
    }

    /// The three academic periods of the semester starting on `semester_start`.
    pub fn periods(&self, semester_start: Date) -> Result<[AcademicPeriod; 3], Error> {
        compute_periods(semester_start, &self.config.periods)
    }

    /// The events of one record, as seen on `today`.
    pub fn materialize(
        &self,
        record: &ScheduleRecord,
        periods: &[AcademicPeriod; 3],
        today: Date,
    ) -> Result<Vec<EventDescriptor>, Error> {
        self.materialize_counted(record, periods, today, &mut Tally::default())
    }

    /// Materializes every record; a failing record never aborts the others.
    #[tracing::instrument(skip(self, records), fields(records = records.len()))]
    pub fn generate(
        &self,
        records: &[ScheduleRecord],
        semester_start: Date,
        today: Date,
    ) -> Result<Generation, Error> {
        let periods = self.periods(semester_start)?;
        let mut tally = Tally::default();
        let mut generation = Generation::default();
        generation.report.records_in = records.len();

        for record in records {
            if record.term_end < today {
                tracing::debug!(code = %record.subject_code, "class already concluded");
                generation.report.concluded += 1;
                continue;
            }

            match self.materialize_counted(record, &periods, today, &mut tally) {
                Ok(events) if events.is_empty() => {
                    tracing::warn!(code = %record.subject_code, "record produced no events");
                }
                Ok(events) => {
                    generation.report.records_with_events += 1;
                    generation.events.extend(events);
                }
                Err(err) => {
                    tracing::warn!(code = %record.subject_code, %err, "failed to materialize record");
                    generation.report.failed.push(RecordFailure {
                        subject_code: record.subject_code.clone(),
                        key: record.key(),
                        error: err.to_string(),
                    });
                }
            }
        }

        generation.report.periods_skipped = tally.periods_skipped;
        generation.report.windows_without_occurrence = tally.windows_without_occurrence;
        generation.report.events_out = generation.events.len();
        tracing::debug!(events = generation.report.events_out, "generated events");
        Ok(generation)
    }

    fn materialize_counted(
        &self,
        record: &ScheduleRecord,
        periods: &[AcademicPeriod; 3],
        today: Date,
        tally: &mut Tally,
    ) -> Result<Vec<EventDescriptor>, Error> {
        if record.term_end < today {
            return Ok(Vec::new());
        }

        let mut windows: Vec<(Option<u8>, Date, Date)> = Vec::with_capacity(3);
        if record.is_short_form() {
            windows.push((None, record.term_start, record.term_end));
        } else {
            for (index, period) in (1u8..).zip(periods) {
                match period.intersect(record.term_start, record.term_end) {
                    Some((start, end)) if end >= today => windows.push((Some(index), start, end)),
                    Some(_) => {
                        tracing::debug!(code = %record.subject_code, period = index, "period elapsed");
                        tally.periods_skipped += 1;
                    }
                    None => {
                        tracing::debug!(code = %record.subject_code, period = index, "period outside term");
                        tally.periods_skipped += 1;
                    }
                }
            }
        }

        let mut events = Vec::with_capacity(windows.len());
        for (period, win_start, win_end) in windows {
            match self.emit(record, period, win_start, win_end, today)? {
                Some(event) => events.push(event),
                None => {
                    tracing::warn!(
                        code = %record.subject_code,
                        period,
                        %win_start,
                        %win_end,
                        "no class day left in window"
                    );
                    tally.windows_without_occurrence += 1;
                }
            }
        }
        Ok(events)
    }

    fn emit(
        &self,
        record: &ScheduleRecord,
        period: Option<u8>,
        win_start: Date,
        win_end: Date,
        today: Date,
    ) -> Result<Option<EventDescriptor>, Error> {
        let mut anchor = first_anchor(win_start, record.weekdays.first_by_ordinal())?;
        if anchor < today {
            anchor = next_class_day(today, &record.weekdays)?;
        }
        if anchor > win_end {
            // Another class weekday may still fall inside a short window.
            anchor = next_class_day(win_start.max(today), &record.weekdays)?;
        }
        if anchor > win_end {
            return Ok(None);
        }

        let recurrence = match win_end > anchor {
            true => Some(Recurrence {
                weekdays: record.weekdays.clone(),
                until: win_end.tomorrow()?.to_zoned(self.tz.clone())?,
            }),
            false => None,
        };

        let exceptions = self
            .holidays
            .exclusions_in_range(anchor, win_end)
            .into_iter()
            .map(|date| self.at(date, record.start_time))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(EventDescriptor {
            summary: format!("{} ({})", record.subject_name, record.subject_code),
            location: record.location.clone(),
            description: describe(record, period.map(|p| (p, win_start, win_end))),
            start: self.at(anchor, record.start_time)?,
            end: self.at(anchor, record.end_time)?,
            recurrence,
            exceptions,
            period,
            key: record.key(),
        }))
    }

    fn at(&self, date: Date, time: Time) -> Result<Zoned, Error> {
        Ok(date.to_datetime(time).to_zoned(self.tz.clone())?)
    }
}

/// The earliest date on or after `from` falling on `weekday`.
pub fn first_anchor(from: Date, weekday: Weekday) -> Result<Date, Error> {
    match from.weekday() == weekday {
        true => Ok(from),
        false => Ok(from.nth_weekday(1, weekday)?),
    }
}

/// The earliest date on or after `from` falling on any of `weekdays`.
pub fn next_class_day(from: Date, weekdays: &Weekdays) -> Result<Date, Error> {
    let mut best: Option<Date> = None;
    for weekday in weekdays.as_slice() {
        let date = first_anchor(from, *weekday)?;
        best = Some(best.map_or(date, |b| b.min(date)));
    }
    best.ok_or(Error::EmptyWeekdays)
}

/// Instructor names with punctuation noise removed; letters, accents and commas survive.
pub fn clean_instructors(text: &str) -> String {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(r"[^\w\s,]").unwrap());
    re.replace_all(text, "").trim().to_string()
}

fn describe(record: &ScheduleRecord, window: Option<(u8, Date, Date)>) -> String {
    const DATE: &str = "%d/%m/%Y";

    let mut s = String::new();
    let _ = writeln!(s, "Instructors: {}", clean_instructors(&record.instructors));
    let _ = writeln!(s, "Sub-period: {}", record.sub_period.as_deref().unwrap_or_default());
    let _ = writeln!(s, "CRN: {}", record.crn.as_deref().unwrap_or_default());
    let _ = writeln!(s, "Format: {}", record.delivery_format);
    let _ = writeln!(s, "Location: {}", record.location);
    let _ = writeln!(s, "Days: {}", record.weekdays);
    let _ = writeln!(
        s,
        "Time: {} - {}",
        record.start_time.strftime("%H:%M"),
        record.end_time.strftime("%H:%M")
    );
    if record.language == Language::English {
        let _ = writeln!(s, "Language: English");
    }
    let _ = write!(
        s,
        "Term: {} - {}",
        record.term_start.strftime(DATE),
        record.term_end.strftime(DATE)
    );
    if let Some((period, start, end)) = window {
        let _ = write!(
            s,
            "\nPeriod {period}: {} - {}",
            start.strftime(DATE),
            end.strftime(DATE)
        );
    }
    s
}
