// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Recovers schedule records from the plain-text lines of an enrollment voucher.

mod cursor;
mod patterns;

use std::fmt;

use jiff::civil::Date;

pub use crate::parser::cursor::{CursorState, RawLine};
pub use crate::parser::patterns::{ENGLISH_LABEL, SUB_PERIOD_MARKER, SUBJECT_MARKER};

use crate::parser::cursor::{Block, Cursor};
use crate::parser::patterns::{ScheduleLine, TermDates};
use crate::{Language, ScheduleHeader, ScheduleRecord, ShortFormRules, Weekdays};

/// Everything recovered from one document.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ParseOutcome {
    pub header: ScheduleHeader,
    pub records: Vec<ScheduleRecord>,

    /// Blocks and schedule lines that yielded no record.
    pub issues: Vec<ParseIssue>,
}

/// Why a block or a schedule line produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    #[strum(serialize = "no schedule lines")]
    NoScheduleLines,

    #[strum(serialize = "no term dates after the last schedule line")]
    NoTermDates,

    #[strum(serialize = "term dates are not valid calendar dates")]
    InvalidTermDates,

    #[strum(serialize = "term ends before it starts")]
    TermEndsBeforeStart,

    #[strum(serialize = "schedule line has no end time")]
    MissingEndTime,

    #[strum(serialize = "schedule line has an invalid time")]
    InvalidTime,

    #[strum(serialize = "class ends before it starts")]
    NonPositiveDuration,
}

/// A block, or a single schedule line within it, that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseIssue {
    /// Zero-based ordinal of the subject-unit block.
    pub block: usize,

    /// Zero-based line the issue points at.
    pub line: usize,

    pub subject_code: String,

    pub kind: IssueKind,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} ({}) at line {}: {}",
            self.block + 1,
            self.subject_code,
            self.line + 1,
            self.kind
        )
    }
}

/// Parses a sequence of lines in document order.
#[tracing::instrument(skip_all)]
pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>, rules: &ShortFormRules) -> ParseOutcome {
    let mut cursor = Cursor::new();
    for (index, text) in lines.into_iter().enumerate() {
        cursor.feed(RawLine { index, text });
    }

    let (header, blocks) = cursor.finish();
    let mut outcome = ParseOutcome {
        header,
        ..Default::default()
    };

    for block in &blocks {
        build_records(block, rules, &mut outcome);
    }

    tracing::debug!(
        blocks = blocks.len(),
        records = outcome.records.len(),
        issues = outcome.issues.len(),
        "parsed schedule"
    );
    outcome
}

/// Parses a whole text, accepting both `\n` and `\r\n` line endings.
pub fn parse_text(text: &str, rules: &ShortFormRules) -> ParseOutcome {
    parse(text.lines(), rules)
}

fn build_records(block: &Block<'_>, rules: &ShortFormRules, outcome: &mut ParseOutcome) {
    let mut report = |line: usize, kind: IssueKind| {
        tracing::warn!(
            block = block.ordinal,
            line,
            code = block.subject_code,
            %kind,
            "skipping schedule"
        );
        outcome.issues.push(ParseIssue {
            block: block.ordinal,
            line,
            subject_code: block.subject_code.to_string(),
            kind,
        });
    };

    let last_line = block.schedules.last().map_or(block.marker_line, |(line, _)| *line);

    let (term_start, term_end) = match (block.final_state, block.term) {
        (CursorState::SeekingBlock | CursorState::InHeader, _) => {
            return report(block.marker_line, IssueKind::NoScheduleLines);
        }
        (_, None) if block.schedules.is_empty() => {
            return report(block.marker_line, IssueKind::NoScheduleLines);
        }
        (_, None) => return report(last_line, IssueKind::NoTermDates),
        (_, Some(TermDates::Invalid)) => return report(last_line, IssueKind::InvalidTermDates),
        (_, Some(TermDates::Valid(start, end))) if end < start => {
            return report(last_line, IssueKind::TermEndsBeforeStart);
        }
        (_, Some(TermDates::Valid(start, end))) => (start, end),
    };

    let mut records = Vec::with_capacity(block.schedules.len());
    for (line, schedule) in &block.schedules {
        match record_from(block, schedule, term_start, term_end, rules) {
            Ok(record) => records.push(record),
            Err(kind) => report(*line, kind),
        }
    }
    outcome.records.extend(records);
}

fn record_from(
    block: &Block<'_>,
    schedule: &ScheduleLine<'_>,
    term_start: Date,
    term_end: Date,
    rules: &ShortFormRules,
) -> Result<ScheduleRecord, IssueKind> {
    let [start, end, ..] = schedule.times[..] else {
        return Err(IssueKind::MissingEndTime);
    };
    let (Some(start_time), Some(end_time)) = (start.to_time(), end.to_time()) else {
        return Err(IssueKind::InvalidTime);
    };
    if end_time <= start_time {
        return Err(IssueKind::NonPositiveDuration);
    }

    // A schedule line always starts with a weekday token.
    let weekdays = Weekdays::new(schedule.weekdays.iter().copied())
        .map_err(|_| IssueKind::NoScheduleLines)?;

    let subject_name = block.subject_name.unwrap_or_default().to_string();
    let short_form = rules.matches(&subject_name, term_start, term_end);

    Ok(ScheduleRecord {
        subject_code: block.subject_code.to_string(),
        subject_name,
        instructors: block.instructors.join(" "),
        sub_period: block.sub_period.clone(),
        crn: block.crn.clone(),
        weekdays,
        start_time,
        end_time,
        term_start,
        term_end,
        location: block.location.unwrap_or_default().to_string(),
        delivery_format: block.delivery_format(),
        language: match block.english {
            true => Language::English,
            false => Language::Default,
        },
        short_form,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::{Weekday, date, time};

    use super::*;
    use crate::DeliveryFormat;

    fn parse_default(text: &str) -> ParseOutcome {
        parse_text(text, &ShortFormRules::default())
    }

    const TWO_PATTERNS: &str = "\
Comprobante de inscripción
Última hora del comprobante: 03.02.2025 10:15
MTY / Escuela de Ingeniería y Ciencias / ITC
Unidad de formación: TC1028
Pensamiento computacional para ingeniería
López Pérez, Ana
Martínez Ruiz, Pedro
Lun Mié 07:00 - 08:30
Vie 10:00 - 11:30
Sub-período 1 CRN 40123
MTY | Aulas 4 | 305
10.02.2025 - 15.06.2025
Presencial
Inglés
";

    #[test]
    fn one_record_per_schedule_line() {
        let outcome = parse_default(TWO_PATTERNS);
        assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
        assert_eq!(outcome.records.len(), 2);

        let first = &outcome.records[0];
        assert_eq!(first.subject_code, "TC1028");
        assert_eq!(first.subject_name, "Pensamiento computacional para ingeniería");
        assert_eq!(first.instructors, "López Pérez, Ana Martínez Ruiz, Pedro");
        assert_eq!(
            first.weekdays.as_slice(),
            &[Weekday::Monday, Weekday::Wednesday]
        );
        assert_eq!(first.start_time, time(7, 0, 0, 0));
        assert_eq!(first.end_time, time(8, 30, 0, 0));
        assert_eq!(first.term_start, date(2025, 2, 10));
        assert_eq!(first.term_end, date(2025, 6, 15));
        assert_eq!(first.sub_period.as_deref(), Some("1"));
        assert_eq!(first.crn.as_deref(), Some("40123"));
        assert_eq!(first.location, "MTY | Aulas 4 | 305");
        assert_eq!(first.delivery_format, DeliveryFormat::OnSite);
        assert_eq!(first.language, Language::English);
        assert!(!first.is_short_form());

        let second = &outcome.records[1];
        assert_eq!(second.weekdays.as_slice(), &[Weekday::Friday]);
        assert_eq!(second.start_time, time(10, 0, 0, 0));
        assert_eq!(second.crn, first.crn);
        assert_eq!(second.term_end, first.term_end);
    }

    #[test]
    fn reads_document_header() {
        let outcome = parse_default(TWO_PATTERNS);
        assert_eq!(outcome.header.process_date, Some(date(2025, 2, 3)));
        assert_eq!(outcome.header.campus.as_deref(), Some("MTY"));
        assert_eq!(outcome.header.career.as_deref(), Some("ITC"));
    }

    #[test]
    fn block_without_term_dates_yields_nothing() {
        let outcome = parse_default(
            "Unidad de formación: MA1001\nÁlgebra\nLun 07:00 - 08:30\nMTY | A4 | 101\n",
        );
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::NoTermDates);
        assert_eq!(outcome.issues[0].subject_code, "MA1001");
    }

    #[test]
    fn block_without_schedule_lines_is_reported() {
        let outcome = parse_default("Unidad de formación: X\nMateria\nProfesor\n");
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::NoScheduleLines);
        assert_eq!(outcome.issues[0].line, 0);
    }

    #[test]
    fn skips_only_the_broken_schedule_line() {
        let outcome = parse_default(
            "\
Unidad de formación: F1001
Física
Mar Jue 09:00
Vie 11:00 - 10:00
Lun 12:00 - 13:30
10.02.2025 - 15.06.2025
",
        );
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].weekdays.as_slice(), &[Weekday::Monday]);
        let kinds: Vec<_> = outcome.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::MissingEndTime, IssueKind::NonPositiveDuration]
        );
        assert_eq!(outcome.issues[0].line, 2);
    }

    #[test]
    fn rejects_impossible_term_dates() {
        let outcome =
            parse_default("Unidad de formación: X\nMateria\nLun 07:00 - 08:00\n30.02.2025 - 15.06.2025\n");
        assert_eq!(outcome.issues[0].kind, IssueKind::InvalidTermDates);

        let outcome =
            parse_default("Unidad de formación: X\nMateria\nLun 07:00 - 08:00\n15.06.2025 - 10.02.2025\n");
        assert_eq!(outcome.issues[0].kind, IssueKind::TermEndsBeforeStart);
    }

    #[test]
    fn detects_remote_and_short_form() {
        let outcome = parse_default(
            "\
Unidad de formación: ST2001
Semana Tec - Liderazgo
Lun Mar Mié Jue Vie 08:00 - 12:00
Sub-períodos 1, 2 y 3 CRN 50001
NAL | Campus Nacional | Virtual
05.05.2025 - 09.05.2025
",
        );
        let record = &outcome.records[0];
        assert_eq!(record.delivery_format, DeliveryFormat::RemoteDomestic);
        assert_eq!(record.location, "NAL | Campus Nacional | Virtual");
        assert_eq!(record.weekdays.len(), 5);
        assert_eq!(record.sub_period.as_deref(), Some("1, 2 y 3"));
        assert!(record.is_short_form());
        assert_eq!(record.language, Language::Default);
    }

    #[test]
    fn missing_optional_fields_stay_absent() {
        let outcome = parse_default(
            "Unidad de formación: X\nMateria\nDom 07:00 - 08:00\n10/02/2025 - 15/06/2025\n",
        );
        let record = &outcome.records[0];
        assert_eq!(record.instructors, "");
        assert_eq!(record.sub_period, None);
        assert_eq!(record.crn, None);
        assert_eq!(record.location, "");
        assert_eq!(record.delivery_format, DeliveryFormat::OnSite);
    }

    #[test]
    fn handles_crlf_and_repeated_weekdays() {
        let outcome = parse_default(
            "Unidad de formación: X\r\nMateria\r\nLun Lun Mié 07:00 - 08:00\r\n10.02.2025 - 15.06.2025\r\n",
        );
        assert_eq!(
            outcome.records[0].weekdays.as_slice(),
            &[Weekday::Monday, Weekday::Wednesday]
        );
    }

    #[test]
    fn every_record_satisfies_the_invariants() {
        let outcome = parse_default(TWO_PATTERNS);
        for r in &outcome.records {
            assert!(!r.weekdays.is_empty());
            assert!(r.end_time > r.start_time);
            assert!(r.term_end >= r.term_start);
        }
    }

    #[test]
    fn issue_display_is_one_based() {
        let issue = ParseIssue {
            block: 0,
            line: 9,
            subject_code: "TC1028".to_string(),
            kind: IssueKind::NoTermDates,
        };
        assert_eq!(
            issue.to_string(),
            "block 1 (TC1028) at line 10: no term dates after the last schedule line"
        );
    }
}
