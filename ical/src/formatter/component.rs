// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting for the calendar and its events.

use std::io::{self, Write};

use horario_core::EventDescriptor;
use jiff::Zoned;

use crate::calendar::{Calendar, event_uid};
use crate::formatter::Formatter;
use crate::formatter::value::{
    escape_text, write_local_date_time, write_utc_date_time, write_weekly_rule,
};
use crate::keyword::{
    KW_BEGIN, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_END, KW_EXDATE, KW_LOCATION,
    KW_PRODID, KW_RRULE, KW_SUMMARY, KW_TZID, KW_UID, KW_VCALENDAR, KW_VERSION, KW_VERSION_2_0,
    KW_VEVENT, KW_X_WR_CALNAME, KW_X_WR_TIMEZONE,
};

/// Format the `VCALENDAR` with all of its events.
pub fn write_vcalendar<W: Write>(f: &mut Formatter<W>, calendar: &Calendar<'_>) -> io::Result<()> {
    with_block(f, KW_VCALENDAR, |f| {
        // Required properties
        write!(f, "{KW_PRODID}:{}", calendar.prod_id)?;
        f.writeln()?;
        write!(f, "{KW_VERSION}:{KW_VERSION_2_0}")?;
        f.writeln()?;

        // X-properties
        if let Some(name) = &calendar.name {
            write!(f, "{KW_X_WR_CALNAME}:{}", escape_text(name))?;
            f.writeln()?;
        }
        write!(f, "{KW_X_WR_TIMEZONE}:{}", calendar.time_zone)?;
        f.writeln()?;

        for event in calendar.events {
            write_vevent(f, event, calendar)?;
        }
        Ok(())
    })
}

fn write_vevent<W: Write>(
    f: &mut Formatter<W>,
    event: &EventDescriptor,
    calendar: &Calendar<'_>,
) -> io::Result<()> {
    with_block(f, KW_VEVENT, |f| {
        write!(f, "{KW_UID}:{}", event_uid(event))?;
        f.writeln()?;

        write!(f, "{KW_DTSTAMP}:")?;
        write_utc_date_time(f, calendar.dtstamp)?;
        f.writeln()?;

        write_zoned_prop(f, KW_DTSTART, &event.start)?;
        write_zoned_prop(f, KW_DTEND, &event.end)?;

        write!(f, "{KW_SUMMARY}:{}", escape_text(&event.summary))?;
        f.writeln()?;
        if !event.location.is_empty() {
            write!(f, "{KW_LOCATION}:{}", escape_text(&event.location))?;
            f.writeln()?;
        }
        write!(f, "{KW_DESCRIPTION}:{}", escape_text(&event.description))?;
        f.writeln()?;

        if let Some(recurrence) = &event.recurrence {
            write!(f, "{KW_RRULE}:")?;
            write_weekly_rule(f, &recurrence.weekdays, &recurrence.until)?;
            f.writeln()?;
        }

        if let Some(first) = event.exceptions.first() {
            let tzid = first.time_zone().iana_name();
            match tzid {
                Some(tzid) => write!(f, "{KW_EXDATE};{KW_TZID}={tzid}:")?,
                None => write!(f, "{KW_EXDATE}:")?,
            }
            for (i, exception) in event.exceptions.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                match tzid {
                    Some(_) => write_local_date_time(f, exception)?,
                    None => write_utc_date_time(f, exception.timestamp())?,
                }
            }
            f.writeln()?;
        }

        Ok(())
    })
}

/// Write `NAME;TZID=zone:` or, for a zone without an IANA name, `NAME:` followed by UTC.
fn write_zoned_prop<W: Write>(f: &mut Formatter<W>, name: &str, zoned: &Zoned) -> io::Result<()> {
    match zoned.time_zone().iana_name() {
        Some(tzid) => {
            write!(f, "{name};{KW_TZID}={tzid}:")?;
            write_local_date_time(f, zoned)?;
        }
        None => {
            write!(f, "{name}:")?;
            write_utc_date_time(f, zoned.timestamp())?;
        }
    }
    f.writeln()
}

fn with_block<W: Write, F: FnOnce(&mut Formatter<W>) -> io::Result<()>>(
    f: &mut Formatter<W>,
    name: &str,
    write_content: F,
) -> io::Result<()> {
    write!(f, "{KW_BEGIN}:{name}")?;
    f.writeln()?;

    write_content(f)?;

    write!(f, "{KW_END}:{name}")?;
    f.writeln()
}
