// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes a [`Calendar`] of class events as RFC 5545 text to any
//! `std::io::Write` implementer, folding long content lines.
//!
//! # Example
//!
//! ```ignore
//! use horario_ical::{Calendar, format};
//!
//! let calendar = Calendar::new(&events, "America/Mexico_City", jiff::Timestamp::now());
//! let ics = format(&calendar)?;
//! std::fs::write("schedule.ics", ics)?;
//! ```

mod component;
mod value;

use std::io::{self, Write};

use crate::calendar::Calendar;
use crate::formatter::component::write_vcalendar;

pub use crate::formatter::value::escape_text;

/// Convenience function to format a [`Calendar`] to a `String` (uses default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(calendar: &Calendar<'_>) -> io::Result<String> {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a [`Calendar`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, calendar: &Calendar<'_>, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        write_vcalendar(&mut formatter, calendar)?;
        formatter.flush()
    }

    /// Write a [`Calendar`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, calendar: &Calendar<'_>) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(calendar, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    #[must_use]
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// Length of the continuation character after CRLF; SPACE and TAB are both 1 byte.
    const CONTINUATION_LEN: usize = 1;
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// Every byte written through its `Write` implementation counts towards the current
/// content line, which is folded before it would exceed the configured length.
/// Folding never splits a UTF-8 sequence or a backslash escape.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a CRLF line ending.
    pub(crate) fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer
            .write_all(self.options.folding_style.as_bytes())?;
        self.line_length = FoldingStyle::CONTINUATION_LEN;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            return self.writer.write(buf);
        };

        let mut pending = 0;
        let mut pos = 0;
        while let Some(rest) = buf.get(pos..).filter(|rest| !rest.is_empty()) {
            let unit = unit_length(rest);
            if self.line_length + unit > max_len && self.line_length > FoldingStyle::CONTINUATION_LEN
            {
                self.writer.write_all(buf.get(pending..pos).unwrap_or_default())?;
                pending = pos;
                self.insert_fold()?;
            }
            self.line_length += unit;
            pos += unit;
        }
        self.writer.write_all(buf.get(pending..).unwrap_or_default())?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Length of the smallest unit that must stay on one physical line.
///
/// That is a whole UTF-8 sequence, or a backslash together with the character it escapes.
///
/// UTF-8 encoding:
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes
/// - 1110xxxx: 3 bytes
/// - 11110xxx: 4 bytes
/// - 10xxxxxx: continuation byte (not a start byte)
fn unit_length(buf: &[u8]) -> usize {
    let sequence = |start: usize| -> usize {
        let len = match buf.get(start) {
            Some(b) if b & 0xE0 == 0xC0 => 2,
            Some(b) if b & 0xF0 == 0xE0 => 3,
            Some(b) if b & 0xF8 == 0xF0 => 4,
            _ => 1,
        };
        len.min(buf.len().saturating_sub(start)).max(1)
    };

    match buf.first() {
        Some(b'\\') if buf.len() > 1 => 1 + sequence(1),
        _ => sequence(0),
    }
}
