// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;

use crate::{Error, HolidayRules, PeriodRules, ShortFormRules};

/// The name of the application.
pub const APP_NAME: &str = "horario";

/// Time zone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";

/// Configuration for the schedule core.
///
/// Every field has a default reproducing the institutional calendar, so an empty
/// `[core]` table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA identifier of the zone every event instant is built in.
    pub timezone: String,

    /// Classification of intensive classes.
    pub short_form: ShortFormRules,

    /// Layout of the three academic periods.
    pub periods: PeriodRules,

    /// Days on which no class takes place.
    pub holidays: HolidayRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            short_form: ShortFormRules::default(),
            periods: PeriodRules::default(),
            holidays: HolidayRules::default(),
        }
    }
}

impl Config {
    /// Checks the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        self.time_zone()?;
        self.periods.validate()?;
        self.holidays.validate()?;

        if self.short_form.max_days < 0 {
            return Err(Error::Config(format!(
                "short-form threshold must not be negative, got {}",
                self.short_form.max_days
            )));
        }

        Ok(())
    }

    /// Resolves the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone, Error> {
        TimeZone::get(&self.timezone).map_err(|source| Error::TimeZone {
            name: self.timezone.clone(),
            source,
        })
    }
}
