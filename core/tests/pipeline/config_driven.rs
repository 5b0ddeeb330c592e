// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use horario_core::{Config, Engine, Error};
use jiff::civil::date;

use crate::common::{SPRING_2025_START, events_for, exception_dates, voucher_records};

fn config_from(text: &str) -> Config {
    toml::from_str(text).unwrap()
}

#[test]
fn config_without_holy_week_keeps_easter_classes() {
    let config = config_from("[holidays]\nholy_week = false\n");
    let engine = Engine::new(&config).unwrap();
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, SPRING_2025_START)
        .unwrap();

    let events = events_for(&generation.events, "tc1028-40123-mon-wed-0700");
    assert_eq!(exception_dates(events[1]), vec![date(2025, 5, 1)]);
}

#[test]
fn config_period_layout_moves_boundaries() {
    let config = config_from("[periods]\nspring_weeks = [6, 5, 5]\n");
    let engine = Engine::new(&config).unwrap();
    let periods = engine.periods(SPRING_2025_START).unwrap();
    assert_eq!(periods[0].end, date(2025, 3, 23));
    assert_eq!(periods[1].start, date(2025, 3, 31));
}

#[test]
fn config_time_zone_applies_to_every_instant() {
    let config = config_from("timezone = \"America/Tijuana\"\n");
    let engine = Engine::new(&config).unwrap();
    let generation = engine
        .generate(&voucher_records(), SPRING_2025_START, SPRING_2025_START)
        .unwrap();

    for event in &generation.events {
        assert_eq!(event.start.time_zone().iana_name(), Some("America/Tijuana"));
        assert!(
            event
                .exceptions
                .iter()
                .all(|e| e.time_zone().iana_name() == Some("America/Tijuana"))
        );
    }
}

#[test]
fn config_invalid_zone_is_rejected_by_engine() {
    let config = config_from("timezone = \"Nowhere/Special\"\n");
    assert!(matches!(Engine::new(&config), Err(Error::TimeZone { .. })));
}
