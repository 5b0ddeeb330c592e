// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use horario_core::{Config, Engine, GenerationReport, ParseOutcome, ScheduleHeader, parse_text};
use horario_ical::{Calendar, format};
use jiff::{Timestamp, civil::Date};
use tokio::{fs, io::AsyncWriteExt};

use crate::util::{arg_input, arg_semester_start, get_date, parse_date, read_input, today_in};

#[derive(Debug, Clone)]
pub struct CmdConvert {
    pub input: PathBuf,
    pub semester_start: Date,
    pub today: Option<Date>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
}

impl CmdConvert {
    pub const NAME: &str = "convert";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Convert a schedule export into an iCalendar file")
            .arg(arg_input())
            .arg(arg_semester_start())
            .arg(
                arg!(--today <DATE> "Classes before this date are left out; defaults to today")
                    .value_parser(parse_date),
            )
            .arg(
                arg!(-o --output <OUTPUT> "Where to write the calendar; defaults to stdout")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--name <NAME> "Display name of the calendar"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            input: matches
                .get_one::<PathBuf>("input")
                .cloned()
                .ok_or("Missing input file")?,
            semester_start: get_date(matches, "semester-start")?,
            today: matches.get_one::<Date>("today").copied(),
            output: matches.get_one::<PathBuf>("output").cloned(),
            name: matches.get_one::<String>("name").cloned(),
        })
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "converting schedule...");
        let engine = Engine::new(config)?;
        let today = self.today.unwrap_or_else(|| today_in(engine.time_zone()));

        let text = read_input(&self.input).await?;
        let outcome = parse_text(&text, &config.short_form);
        let generation = engine.generate(&outcome.records, self.semester_start, today)?;

        let mut calendar = Calendar::new(&generation.events, &config.timezone, Timestamp::now());
        if let Some(name) = self.name.clone().or_else(|| default_name(&outcome.header)) {
            calendar = calendar.name(name);
        }
        let ics = format(&calendar)?;

        match &self.output {
            Some(path) => fs::write(path, ics)
                .await
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?,
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(ics.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        // The calendar may be on stdout, so the summary goes to stderr
        eprint!("{}", summarize(&outcome, &generation.report));
        Ok(())
    }
}

/// Calendar name derived from the voucher header.
fn default_name(header: &ScheduleHeader) -> Option<String> {
    match (&header.career, header.process_date) {
        (Some(career), Some(date)) => Some(format!("{career} ({date})")),
        (Some(career), None) => Some(career.clone()),
        (None, _) => None,
    }
}

fn summarize(outcome: &ParseOutcome, report: &GenerationReport) -> String {
    let mut out = String::new();
    for issue in &outcome.issues {
        out.push_str(&format!("{} {}\n", "Skipped:".yellow(), issue));
    }
    for failure in &report.failed {
        out.push_str(&format!(
            "{} {} ({}): {}\n",
            "Failed:".red(),
            failure.subject_code,
            failure.key,
            failure.error
        ));
    }

    out.push_str(&format!(
        "{} records, {} events, {} concluded, {} periods skipped\n",
        report.records_in, report.events_out, report.concluded, report.periods_skipped
    ));
    if report.windows_without_occurrence > 0 {
        out.push_str(&format!(
            "{} windows had no class day left\n",
            report.windows_without_occurrence
        ));
    }

    if report.has_discrepancy() {
        let active = report.records_in.saturating_sub(report.concluded);
        out.push_str(&format!(
            "{} only {} of {} active records produced events\n",
            "Warning:".yellow(),
            report.records_with_events,
            active
        ));
    }
    out
}
