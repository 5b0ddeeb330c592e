// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, arg};
use colored::Color;
use horario_core::{Config, Engine, Holiday, HolidayKind, weekday_token};
use jiff::civil::Date;

use crate::table::{Column, Table};
use crate::util::{ArgOutputFormat, get_date, parse_date};

#[derive(Debug, Clone)]
pub struct CmdHolidays {
    pub from: Date,
    pub to: Date,
    pub output_format: ArgOutputFormat,
}

impl CmdHolidays {
    pub const NAME: &str = "holidays";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dates on which no class takes place")
            .arg(
                arg!(--from <DATE> "First day of the range")
                    .value_parser(parse_date)
                    .required(true),
            )
            .arg(
                arg!(--to <DATE> "Last day of the range, inclusive")
                    .value_parser(parse_date)
                    .required(true),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            from: get_date(matches, "from")?,
            to: get_date(matches, "to")?,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing holidays...");
        if self.from > self.to {
            return Err(format!("--from {} is after --to {}", self.from, self.to).into());
        }

        let engine = Engine::new(config)?;
        let holidays = engine.holidays().holidays_in_range(self.from, self.to);
        print_holidays(&holidays, self.output_format, &mut io::stdout())
    }
}

fn print_holidays(
    holidays: &[Holiday],
    output_format: ArgOutputFormat,
    w: &mut impl io::Write,
) -> Result<(), Box<dyn Error>> {
    match output_format {
        ArgOutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(holidays)?)?,
        ArgOutputFormat::Table => {
            let columns = vec![
                HolidayColumn::Date,
                HolidayColumn::Weekday,
                HolidayColumn::Kind,
                HolidayColumn::Name,
            ];
            Table::new(columns, holidays).write_to(w)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum HolidayColumn {
    Date,
    Weekday,
    Kind,
    Name,
}

impl Column<Holiday> for HolidayColumn {
    fn format(&self, holiday: &Holiday) -> String {
        match self {
            HolidayColumn::Date => holiday.date.to_string(),
            HolidayColumn::Weekday => weekday_token(holiday.date.weekday()).to_string(),
            HolidayColumn::Kind => holiday.kind.to_string(),
            HolidayColumn::Name => holiday.name.clone(),
        }
    }

    fn get_color(&self, holiday: &Holiday) -> Option<Color> {
        match (self, holiday.kind) {
            (HolidayColumn::Kind, HolidayKind::HolyWeek) => Some(Color::Magenta),
            (HolidayColumn::Kind, HolidayKind::Monday) => Some(Color::Cyan),
            _ => None,
        }
    }
}
