// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use horario_core::{APP_NAME, Config as CoreConfig};
use tracing_subscriber::EnvFilter;

use crate::cmd_convert::CmdConvert;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_holidays::CmdHolidays;
use crate::cmd_inspect::CmdInspect;
use crate::cmd_periods::CmdPeriods;
use crate::config::parse_config;

/// Run the Horario command-line interface.
///
/// Errors are reported on stderr before being returned, so callers only need to map them to
/// an exit status.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        eprintln!("{} {}", "Error:".red(), e);
    }
    result
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Turn an enrollment schedule export into recurring calendar events.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/horario/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/horario/config.toml on Windows. Built-in defaults are used when no file \
exists.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdConvert::command())
            .subcommand(CmdInspect::command())
            .subcommand(CmdPeriods::command())
            .subcommand(CmdHolidays::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdConvert::NAME, matches)) => Convert(CmdConvert::from(matches)?),
            Some((CmdInspect::NAME, matches)) => Inspect(CmdInspect::from(matches)?),
            Some((CmdPeriods::NAME, matches)) => Periods(CmdPeriods::from(matches)?),
            Some((CmdHolidays::NAME, matches)) => Holidays(CmdHolidays::from(matches)?),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => return Err("A subcommand is required".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Convert a schedule export into an iCalendar file
    Convert(CmdConvert),

    /// Show what the parser recovers from a schedule export
    Inspect(CmdInspect),

    /// Show the academic periods of a semester
    Periods(CmdPeriods),

    /// Show the excluded dates in a range
    Holidays(CmdHolidays),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Convert(a)  => a.run(&Self::load_config(config).await?).await,
            Inspect(a)  => a.run(&Self::load_config(config).await?).await,
            Periods(a)  => a.run(&Self::load_config(config).await?),
            Holidays(a) => a.run(&Self::load_config(config).await?),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn load_config(config: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        config.validate()?;
        Ok(config)
    }
}
