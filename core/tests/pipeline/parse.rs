// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use horario_core::{
    DeliveryFormat, IssueKind, Language, ShortFormRules, parse, parse_text,
};
use jiff::civil::{Weekday, date, time};

use crate::common::VOUCHER;

#[test]
fn parse_voucher_recovers_every_complete_pattern() {
    let outcome = parse_text(VOUCHER, &ShortFormRules::default());

    let codes: Vec<&str> = outcome
        .records
        .iter()
        .map(|r| r.subject_code.as_str())
        .collect();
    assert_eq!(codes, vec!["TC1028", "TC1028", "TC2001", "H1040"]);

    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].subject_code, "F1001");
    assert_eq!(outcome.issues[0].kind, IssueKind::NoTermDates);
}

#[test]
fn parse_voucher_reads_header() {
    let outcome = parse_text(VOUCHER, &ShortFormRules::default());
    assert_eq!(outcome.header.process_date, Some(date(2025, 2, 3)));
    assert_eq!(outcome.header.campus.as_deref(), Some("MTY"));
    assert_eq!(outcome.header.career.as_deref(), Some("ITC"));
}

#[test]
fn parse_voucher_classifies_formats_and_forms() {
    let outcome = parse_text(VOUCHER, &ShortFormRules::default());
    let records = &outcome.records;

    let intensive = &records[2];
    assert!(intensive.is_short_form());
    assert_eq!(intensive.delivery_format, DeliveryFormat::RemoteDomestic);
    assert_eq!(intensive.sub_period.as_deref(), Some("Semana Tec"));
    assert_eq!(intensive.crn.as_deref(), Some("40201"));
    assert_eq!(intensive.weekdays.len(), 5);

    let english = &records[3];
    assert!(!english.is_short_form());
    assert_eq!(english.delivery_format, DeliveryFormat::Online);
    assert_eq!(english.language, Language::English);
    assert_eq!(english.instructors, "O'Neil, Sarah");
    assert_eq!(english.location, "");
    assert_eq!(english.sub_period.as_deref(), Some("2 y 3"));
    assert_eq!(
        english.weekdays.as_slice(),
        &[Weekday::Tuesday, Weekday::Thursday]
    );
    assert_eq!(english.start_time, time(13, 0, 0, 0));
}

#[test]
fn parse_accepts_any_line_source() {
    let lines: Vec<String> = VOUCHER.lines().map(|l| format!("  {l}  ")).collect();
    let outcome = parse(lines.iter().map(String::as_str), &ShortFormRules::default());
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.records[0].subject_name, "Pensamiento computacional para ingeniería");
}

#[test]
fn parse_text_without_blocks_is_empty() {
    let outcome = parse_text("Comprobante de inscripción\n\n", &ShortFormRules::default());
    assert!(outcome.records.is_empty());
    assert!(outcome.issues.is_empty());
}

#[test]
fn parse_honours_custom_short_form_rules() {
    let rules = ShortFormRules {
        max_days: 0,
        keywords: vec![],
    };
    let outcome = parse_text(VOUCHER, &rules);
    assert!(outcome.records.iter().all(|r| !r.is_short_form()));
}
