// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use horario_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
