// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use clap::{ArgMatches, Command};
use colored::{Color, Colorize};
use horario_core::{Config, Language, ParseOutcome, ScheduleRecord, parse_text};

use crate::table::{Column, Table};
use crate::util::{ArgOutputFormat, arg_input, read_input};

#[derive(Debug, Clone)]
pub struct CmdInspect {
    pub input: PathBuf,
    pub output_format: ArgOutputFormat,
}

impl CmdInspect {
    pub const NAME: &str = "inspect";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the records and issues recovered from a schedule export")
            .arg(arg_input())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            input: matches
                .get_one::<PathBuf>("input")
                .cloned()
                .ok_or("Missing input file")?,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "inspecting schedule...");
        let text = read_input(&self.input).await?;
        let outcome = parse_text(&text, &config.short_form);
        print_outcome(&outcome, self.output_format, &mut io::stdout())
    }
}

fn print_outcome(
    outcome: &ParseOutcome,
    output_format: ArgOutputFormat,
    w: &mut impl io::Write,
) -> Result<(), Box<dyn Error>> {
    match output_format {
        ArgOutputFormat::Json => {
            writeln!(w, "{}", serde_json::to_string_pretty(outcome)?)?;
        }
        ArgOutputFormat::Table => {
            let header = &outcome.header;
            if let Some(career) = &header.career {
                writeln!(w, "{} {}", "Career:".bold(), career)?;
            }
            if let Some(campus) = &header.campus {
                writeln!(w, "{} {}", "Campus:".bold(), campus)?;
            }
            if let Some(date) = header.process_date {
                writeln!(w, "{} {}", "Processed:".bold(), date)?;
            }

            let columns = vec![
                RecordColumn::Code,
                RecordColumn::Days,
                RecordColumn::Time,
                RecordColumn::Term,
                RecordColumn::Format,
                RecordColumn::Name,
            ];
            Table::new(columns, &outcome.records).write_to(w)?;

            for issue in &outcome.issues {
                writeln!(w, "{} {}", "Skipped:".yellow(), issue)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum RecordColumn {
    Code,
    Days,
    Time,
    Term,
    Format,
    Name,
}

impl Column<ScheduleRecord> for RecordColumn {
    fn format(&self, record: &ScheduleRecord) -> String {
        match self {
            RecordColumn::Code => record.subject_code.clone(),
            RecordColumn::Days => record.weekdays.to_string(),
            RecordColumn::Time => format!(
                "{}-{}",
                record.start_time.strftime("%H:%M"),
                record.end_time.strftime("%H:%M")
            ),
            RecordColumn::Term => format!("{}..{}", record.term_start, record.term_end),
            RecordColumn::Format => match record.language {
                Language::English => format!("{} (EN)", record.delivery_format),
                Language::Default => record.delivery_format.to_string(),
            },
            RecordColumn::Name => record.subject_name.clone(),
        }
    }

    fn get_color(&self, record: &ScheduleRecord) -> Option<Color> {
        match self {
            RecordColumn::Code if record.is_short_form() => Some(Color::Yellow),
            _ => None,
        }
    }
}
