// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command};
use horario_core::{Config, Engine};
use jiff::civil::Date;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{ArgOutputFormat, arg_semester_start, get_date};

#[derive(Debug, Clone)]
pub struct CmdPeriods {
    pub semester_start: Date,
    pub output_format: ArgOutputFormat,
}

impl CmdPeriods {
    pub const NAME: &str = "periods";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the three academic periods of a semester")
            .arg(arg_semester_start())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            semester_start: get_date(matches, "semester-start")?,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing periods...");
        let rows = period_rows(config, self.semester_start)?;
        print_periods(&rows, self.output_format, &mut io::stdout())
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct PeriodRow {
    period: u8,
    start: Date,
    end: Date,
    weeks: u8,
}

fn period_rows(config: &Config, semester_start: Date) -> Result<Vec<PeriodRow>, Box<dyn Error>> {
    let engine = Engine::new(config)?;
    let weeks = config.periods.weeks_for(semester_start);
    let rows = engine
        .periods(semester_start)?
        .into_iter()
        .zip(weeks)
        .zip(1u8..)
        .map(|((p, weeks), period)| PeriodRow {
            period,
            start: p.start,
            end: p.end,
            weeks,
        })
        .collect();
    Ok(rows)
}

fn print_periods(
    rows: &[PeriodRow],
    output_format: ArgOutputFormat,
    w: &mut impl io::Write,
) -> Result<(), Box<dyn Error>> {
    match output_format {
        ArgOutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(rows)?)?,
        ArgOutputFormat::Table => {
            let columns = vec![
                PeriodColumn::Period,
                PeriodColumn::Start,
                PeriodColumn::End,
                PeriodColumn::Weeks,
            ];
            Table::new(columns, rows).write_to(w)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum PeriodColumn {
    Period,
    Start,
    End,
    Weeks,
}

impl Column<PeriodRow> for PeriodColumn {
    fn format(&self, row: &PeriodRow) -> String {
        match self {
            PeriodColumn::Period => format!("P{}", row.period),
            PeriodColumn::Start => row.start.to_string(),
            PeriodColumn::End => row.end.to_string(),
            PeriodColumn::Weeks => format!("{} weeks", row.weeks),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            PeriodColumn::Weeks => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
