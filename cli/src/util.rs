// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::Path};

use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};
use jiff::{Zoned, civil::Date, tz::TimeZone};
use tokio::{fs, io::AsyncReadExt};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Positional schedule export; `-` reads standard input.
pub fn arg_input() -> Arg {
    arg!(input: <INPUT> "Text extracted from the enrollment voucher, or - for stdin")
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::FilePath)
}

pub fn arg_semester_start() -> Arg {
    arg!(--"semester-start" <DATE> "First day of the semester (YYYY-MM-DD or DD-MM-YYYY)")
        .value_parser(parse_date)
        .required(true)
}

/// Reads a required date argument.
pub fn get_date(matches: &ArgMatches, id: &str) -> Result<Date, Box<dyn Error>> {
    matches
        .get_one::<Date>(id)
        .copied()
        .ok_or_else(|| format!("Missing required argument --{id}").into())
}

/// Parses a calendar date given as `YYYY-MM-DD`, `DD-MM-YYYY` or `DD/MM/YYYY`.
pub fn parse_date(text: &str) -> Result<Date, String> {
    let text = text.trim();
    text.parse::<Date>()
        .or_else(|_| Date::strptime("%d-%m-%Y", text))
        .or_else(|_| Date::strptime("%d/%m/%Y", text))
        .map_err(|_| format!("Invalid date '{text}'. Expected format: YYYY-MM-DD or DD-MM-YYYY"))
}

/// Today's date as seen in the given zone.
pub fn today_in(tz: &TimeZone) -> Date {
    Zoned::now().with_time_zone(tz.clone()).date()
}

/// Reads the whole input, from standard input when the path is `-`.
pub async fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read input file at {}: {}", path.display(), e))?;
    Ok(text)
}
