// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Academic periods, holidays and the event engine built on them.

mod engine;
mod holiday;
mod period;

pub use crate::calendar::engine::{
    Engine, EventDescriptor, Generation, GenerationReport, RecordFailure, Recurrence,
    clean_instructors, first_anchor, next_class_day,
};
pub use crate::calendar::holiday::{
    FixedHoliday, Holiday, HolidayCalendar, HolidayKind, HolidayRules, MondayHoliday,
    easter_sunday, holy_week, nth_monday,
};
pub use crate::calendar::period::{AcademicPeriod, PeriodRules, compute_periods};
