// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use horario_core::Engine;
use jiff::civil::{Date, date};

use crate::common::{
    SPRING_2025_START, assert_event_invariants, events_for, exception_dates, spring_config,
    voucher_records,
};

#[test]
fn generate_spring_voucher_from_semester_start() {
    let config = spring_config();
    let engine = Engine::new(&config).unwrap();
    let records = voucher_records();

    let generation = engine
        .generate(&records, SPRING_2025_START, SPRING_2025_START)
        .unwrap();

    let report = &generation.report;
    assert_eq!(report.records_in, 4);
    assert_eq!(report.records_with_events, 4);
    assert_eq!(report.concluded, 0);
    assert_eq!(report.periods_skipped, 1);
    assert_eq!(report.events_out, 9);
    assert!(!report.has_discrepancy());

    for record in &records {
        for event in events_for(&generation.events, &record.key()) {
            assert_event_invariants(event, record);
        }
    }
}

#[test]
fn generate_splits_regular_class_across_periods() {
    let config = spring_config();
    let engine = Engine::new(&config).unwrap();
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, SPRING_2025_START)
        .unwrap();

    let events = events_for(&generation.events, "tc1028-40123-mon-wed-0700");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].start.date(), date(2025, 2, 10));
    assert_eq!(events[1].start.date(), date(2025, 3, 24));
    assert_eq!(events[2].start.date(), date(2025, 5, 12));

    let mut holy_week: Vec<Date> = (13..=20).map(|d| date(2025, 4, d)).collect();
    holy_week.push(date(2025, 5, 1));
    assert_eq!(exception_dates(events[1]), holy_week);

    let friday = events_for(&generation.events, "tc1028-40123-fri-1000");
    assert_eq!(friday[0].start.date(), date(2025, 2, 14));
}

#[test]
fn generate_keeps_intensive_week_whole() {
    let config = spring_config();
    let engine = Engine::new(&config).unwrap();
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, SPRING_2025_START)
        .unwrap();

    let events = events_for(&generation.events, "tc2001-40201-mon-tue-wed-thu-fri-0800");
    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.period, None);
    assert_eq!(event.start.date(), date(2025, 5, 5));
    assert_eq!(
        event.recurrence.as_ref().unwrap().until.date(),
        date(2025, 5, 10)
    );
}

#[test]
fn generate_mid_semester_drops_elapsed_work() {
    let config = spring_config();
    let engine = Engine::new(&config).unwrap();
    let today = date(2025, 5, 6);
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, today)
        .unwrap();

    // Only period 3 remains for regular classes; the intensive week restarts today.
    assert!(
        generation
            .events
            .iter()
            .all(|e| e.period.is_none_or(|p| p == 3))
    );
    assert_eq!(generation.report.events_out, 4);

    let intensive = events_for(&generation.events, "tc2001-40201-mon-tue-wed-thu-fri-0800");
    assert_eq!(intensive[0].start.date(), today);
}

#[test]
fn generate_after_term_reports_everything_concluded() {
    let config = spring_config();
    let engine = Engine::new(&config).unwrap();
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, date(2025, 7, 1))
        .unwrap();

    assert!(generation.events.is_empty());
    assert_eq!(generation.report.concluded, 4);
    assert!(!generation.report.has_discrepancy());
}
