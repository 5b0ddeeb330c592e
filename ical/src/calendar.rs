// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use horario_core::EventDescriptor;
use jiff::Timestamp;

/// Product identifier written when none is set.
pub const DEFAULT_PROD_ID: &str = "-//Horario//Class Schedule//ES";

/// Right-hand side of every generated UID.
pub const UID_DOMAIN: &str = "horario";

/// A calendar ready to be written: its events and the calendar-level properties.
#[derive(Debug, Clone)]
pub struct Calendar<'a> {
    /// Value of `PRODID`.
    pub prod_id: String,

    /// Display name, written as `X-WR-CALNAME` when present.
    pub name: Option<String>,

    /// IANA zone written as `X-WR-TIMEZONE`.
    pub time_zone: String,

    /// Creation instant written as every event's `DTSTAMP`.
    pub dtstamp: Timestamp,

    /// Events in output order.
    pub events: &'a [EventDescriptor],
}

impl<'a> Calendar<'a> {
    /// Create a calendar with the default product identifier and no name.
    #[must_use]
    pub fn new(
        events: &'a [EventDescriptor],
        time_zone: impl Into<String>,
        dtstamp: Timestamp,
    ) -> Self {
        Self {
            prod_id: DEFAULT_PROD_ID.to_string(),
            name: None,
            time_zone: time_zone.into(),
            dtstamp,
            events,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Deterministic UID of an event: stable across runs for the same record and period.
#[must_use]
pub fn event_uid(event: &EventDescriptor) -> String {
    match event.period {
        Some(period) => format!("{}-p{period}@{UID_DOMAIN}", event.key),
        None => format!("{}@{UID_DOMAIN}", event.key),
    }
}
