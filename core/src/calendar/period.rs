// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;

use crate::Error;

/// One of the three institution-defined sub-terms of a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AcademicPeriod {
    /// First day of the period.
    pub start: Date,

    /// Last day of the period, inclusive.
    pub end: Date,
}

impl AcademicPeriod {
    /// Intersects the period with `[start, end]`, `None` when they do not overlap.
    pub fn intersect(&self, start: Date, end: Date) -> Option<(Date, Date)> {
        let start = start.max(self.start);
        let end = end.min(self.end);
        (start <= end).then_some((start, end))
    }
}

/// Period layout of a semester, keyed by the month the semester starts in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct PeriodRules {
    /// Semester-start months that use the spring layout.
    pub spring_months: Vec<i8>,

    /// Length in weeks of each period of a spring semester.
    pub spring_weeks: [u8; 3],

    /// Length in weeks of each period of any other semester.
    pub other_weeks: [u8; 3],

    /// Days from the end of one period to the start of the next.
    pub gap_days: u8,
}

impl Default for PeriodRules {
    fn default() -> Self {
        Self {
            spring_months: vec![2],
            spring_weeks: [5, 6, 5],
            other_weeks: [5, 5, 5],
            gap_days: 8,
        }
    }
}

impl PeriodRules {
    /// Weeks per period for a semester starting on `semester_start`.
    pub fn weeks_for(&self, semester_start: Date) -> [u8; 3] {
        match self.spring_months.contains(&semester_start.month()) {
            true => self.spring_weeks,
            false => self.other_weeks,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if let Some(month) = self.spring_months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(Error::Config(format!("spring month {month} is out of range")));
        }

        for weeks in [self.spring_weeks, self.other_weeks] {
            if weeks.contains(&0) {
                return Err(Error::Config(format!(
                    "every period needs at least one week, got {weeks:?}"
                )));
            }
        }

        if self.gap_days == 0 {
            return Err(Error::Config("period gap must be at least one day".into()));
        }

        Ok(())
    }
}

/// Computes the three academic periods of the semester starting on `semester_start`.
///
/// Period 1 starts on `semester_start`; every period lasts its configured number of weeks
/// and the next one starts `gap_days` after the previous end.
pub fn compute_periods(
    semester_start: Date,
    rules: &PeriodRules,
) -> Result<[AcademicPeriod; 3], Error> {
    let weeks = rules.weeks_for(semester_start);
    let gap = i64::from(rules.gap_days);

    let mut periods = [AcademicPeriod {
        start: semester_start,
        end: semester_start,
    }; 3];

    let mut start = semester_start;
    for (period, weeks) in periods.iter_mut().zip(weeks) {
        let end = start
            .checked_add((i64::from(weeks) * 7).days())?
            .yesterday()?;
        *period = AcademicPeriod { start, end };
        start = end.checked_add(gap.days())?;
    }

    Ok(periods)
}
