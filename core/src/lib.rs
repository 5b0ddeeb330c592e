// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Turns an enrollment voucher's text into recurring class events.
//!
//! The [`parse`] step recovers [`ScheduleRecord`]s from the extracted lines, and the
//! [`Engine`] splits every record across the academic periods and holiday calendar.

mod calendar;
mod config;
mod error;
mod parser;
mod schedule;

pub use crate::calendar::{
    AcademicPeriod, Engine, EventDescriptor, FixedHoliday, Generation, GenerationReport, Holiday,
    HolidayCalendar, HolidayKind, HolidayRules, MondayHoliday, PeriodRules, RecordFailure,
    Recurrence, clean_instructors, compute_periods, easter_sunday, first_anchor, holy_week,
    next_class_day, nth_monday,
};
pub use crate::config::{APP_NAME, Config, DEFAULT_TIMEZONE};
pub use crate::error::Error;
pub use crate::parser::{
    CursorState, ENGLISH_LABEL, IssueKind, ParseIssue, ParseOutcome, RawLine, SUB_PERIOD_MARKER,
    SUBJECT_MARKER, parse, parse_text,
};
pub use crate::schedule::{
    DeliveryFormat, Language, ScheduleHeader, ScheduleRecord, ShortFormRules, WEEKDAY_TOKENS,
    Weekdays, weekday_from_token, weekday_token,
};
