// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests from voucher text to event descriptors.

mod config_driven;
mod generate;
mod parse;
