// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Write class event descriptors as iCalendar (RFC 5545) text.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::match_bool, clippy::missing_errors_doc)]

mod calendar;
pub mod formatter;
#[allow(missing_docs)]
pub mod keyword;

pub use crate::calendar::{Calendar, DEFAULT_PROD_ID, UID_DOMAIN, event_uid};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter, format};
