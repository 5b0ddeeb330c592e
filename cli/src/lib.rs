// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end: reads a schedule export and writes an iCalendar file.

mod cli;
mod cmd_convert;
mod cmd_generate_completion;
mod cmd_holidays;
mod cmd_inspect;
mod cmd_periods;
mod config;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
