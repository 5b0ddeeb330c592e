// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use horario_core::{Config, ScheduleRecord, parse_text};
use jiff::civil::{Date, date};

/// First day of the spring 2025 semester.
pub const SPRING_2025_START: Date = date(2025, 2, 10);

/// Extracted text of a spring 2025 enrollment voucher, as the document reader produces it.
///
/// It holds four subject units: a regular class with two meeting patterns, an intensive
/// week, an English online class starting in period 2, and a unit missing its term dates.
pub const VOUCHER: &str = "\
Comprobante de inscripción
Última hora del comprobante: 03.02.2025 10:15
MTY / Escuela de Ingeniería y Ciencias / ITC

Unidad de formación: TC1028
Pensamiento computacional para ingeniería
López Pérez, Ana
Martínez Ruiz, Pedro
Lun Mié 07:00 - 08:30
Vie 10:00 - 11:30
Sub-período 1 CRN 40123
MTY | Aulas 4 | 305
10.02.2025 - 15.06.2025
Presencial

Unidad de formación: TC2001
Semana Tec - Herramientas computacionales
Gómez, Luis
Lun Mar Mié Jue Vie 08:00 - 12:00
Sub-período Semana Tec CRN 40201
NAL | Campus Nacional | Virtual
05.05.2025 - 09.05.2025

Unidad de formación: H1040
Análisis y expresión verbal
O'Neil, Sarah
Mar Jue 13:00 - 14:30
Sub-períodos 2 y 3 CRN 40310
24.03.2025 - 15.06.2025
En línea
Inglés

Unidad de formación: F1001
Física
Núñez, Carla
Sáb 09:00 - 12:00
MTY | Aulas 2 | 110
";

/// Configuration with the built-in institutional calendar.
#[must_use]
pub fn spring_config() -> Config {
    Config::default()
}

/// Records parsed from [`VOUCHER`] with the default short-form rules.
#[must_use]
pub fn voucher_records() -> Vec<ScheduleRecord> {
    parse_text(VOUCHER, &spring_config().short_form).records
}
