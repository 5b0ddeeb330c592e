// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use horario_core::{EventDescriptor, ScheduleRecord};
use jiff::civil::Date;

/// Asserts the properties every generated event must have.
///
/// # Panics
///
/// Panics if the event starts on a non-class day, ends before it starts, or carries
/// exceptions out of order.
pub fn assert_event_invariants(event: &EventDescriptor, record: &ScheduleRecord) {
    assert!(
        record.weekdays.contains(event.start.date().weekday()),
        "event {} starts on a non-class day {}",
        event.key,
        event.start.date()
    );
    assert!(event.end > event.start, "event {} has no duration", event.key);
    assert!(
        event.exceptions.windows(2).all(|w| w[0] < w[1]),
        "exceptions of {} are not strictly ascending",
        event.key
    );
    if let Some(recurrence) = &event.recurrence {
        assert!(recurrence.until > event.start);
        assert!(event.exceptions.iter().all(|e| *e < recurrence.until));
    }
}

/// Events generated from the record with the given key.
pub fn events_for<'a>(events: &'a [EventDescriptor], key: &str) -> Vec<&'a EventDescriptor> {
    events.iter().filter(|e| e.key == key).collect()
}

/// Civil dates of the exception instants of an event.
pub fn exception_dates(event: &EventDescriptor) -> Vec<Date> {
    event.exceptions.iter().map(|z| z.date()).collect()
}
