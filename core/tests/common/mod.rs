// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Voucher text fixtures
//! - Assertion helpers over generated events

mod assertions;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::{assert_event_invariants, exception_dates, events_for};
#[allow(unused_imports)]
pub use fixtures::{SPRING_2025_START, VOUCHER, spring_config, voucher_records};
