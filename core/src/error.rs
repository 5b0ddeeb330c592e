// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised by the schedule core.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configured time zone could not be resolved.
    #[error("Unknown time zone '{name}': {source}")]
    TimeZone {
        /// The IANA identifier that was requested.
        name: String,
        /// The underlying lookup failure.
        source: jiff::Error,
    },

    /// Civil date or time arithmetic failed.
    #[error("Date arithmetic failed: {0}")]
    DateTime(#[from] jiff::Error),

    /// A time-of-day token could not be interpreted.
    #[error("Invalid time '{0}'")]
    InvalidTime(String),

    /// A calendar date could not be interpreted.
    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    /// A schedule without any meeting weekday.
    #[error("Schedule has no weekdays")]
    EmptyWeekdays,
}
