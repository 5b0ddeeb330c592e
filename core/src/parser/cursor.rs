// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Line cursor walking the export once, left to right.

use crate::parser::patterns::{
    self, SUBJECT_MARKER, ScheduleLine, TermDates, format_from_location, format_label,
    is_location_line, is_sub_period_line, schedule_line, starts_with_weekday, sub_period_and_crn,
    term_dates,
};
use crate::{DeliveryFormat, ScheduleHeader};

/// One line of extracted text with its position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Zero-based line number.
    pub index: usize,
    pub text: &'a str,
}

/// Where the cursor is relative to the current subject-unit block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Before the first subject-unit marker.
    SeekingBlock,

    /// Reading the subject name and the instructor lines.
    InHeader,

    /// The last classified line was a schedule line.
    InScheduleLines,

    /// Past the last schedule line, looking for the term window.
    SeekingTermDates,

    /// Term window found; only order-independent fields remain.
    InTrailerFields,
}

/// Everything gathered about one subject-unit block.
#[derive(Debug, Clone)]
pub(crate) struct Block<'a> {
    /// Zero-based block ordinal.
    pub ordinal: usize,
    pub marker_line: usize,
    pub subject_code: &'a str,
    pub subject_name: Option<&'a str>,
    pub instructors: Vec<&'a str>,
    pub schedules: Vec<(usize, ScheduleLine<'a>)>,
    pub term: Option<TermDates>,
    pub location: Option<&'a str>,
    pub location_format: DeliveryFormat,
    pub labeled_format: Option<DeliveryFormat>,
    pub sub_period_seen: bool,
    pub sub_period: Option<String>,
    pub crn: Option<String>,
    pub english: bool,

    /// State the cursor was in when the block ended.
    pub final_state: CursorState,
}

impl<'a> Block<'a> {
    fn new(ordinal: usize, marker_line: usize, subject_code: &'a str) -> Self {
        Self {
            ordinal,
            marker_line,
            subject_code,
            subject_name: None,
            instructors: Vec::new(),
            schedules: Vec::new(),
            term: None,
            location: None,
            location_format: DeliveryFormat::default(),
            labeled_format: None,
            sub_period_seen: false,
            sub_period: None,
            crn: None,
            english: false,
            final_state: CursorState::InHeader,
        }
    }

    /// The effective delivery format: an explicit label overrides the location inference.
    pub fn delivery_format(&self) -> DeliveryFormat {
        self.labeled_format.unwrap_or(self.location_format)
    }

    /// Rules that look at every line of the block regardless of cursor state.
    fn observe_fields(&mut self, line: &'a str) {
        if self.location.is_none() && is_location_line(line) {
            self.location = Some(line);
            self.location_format = format_from_location(line);
        }

        if !self.sub_period_seen && is_sub_period_line(line) {
            self.sub_period_seen = true;
            (self.sub_period, self.crn) = sub_period_and_crn(line);
        }

        if let Some(format) = format_label(line) {
            self.labeled_format = Some(format);
        }

        if line == patterns::ENGLISH_LABEL {
            self.english = true;
        }
    }
}

/// Single-pass cursor splitting the line stream into blocks.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    state: CursorState,
    current: Option<Block<'a>>,
    blocks: Vec<Block<'a>>,
    header: ScheduleHeader,
}

impl<'a> Cursor<'a> {
    pub fn new() -> Self {
        Self {
            state: CursorState::SeekingBlock,
            current: None,
            blocks: Vec::new(),
            header: ScheduleHeader::default(),
        }
    }

    /// Advances the cursor by one line.
    pub fn feed(&mut self, line: RawLine<'a>) {
        let text = line.text.trim();

        if let Some(code) = text.strip_prefix(SUBJECT_MARKER) {
            self.close_block();
            self.current = Some(Block::new(self.blocks.len(), line.index, code.trim()));
            self.state = CursorState::InHeader;
            return;
        }

        let Some(block) = self.current.as_mut() else {
            Self::observe_preamble(&mut self.header, text);
            return;
        };

        if text.is_empty() {
            return;
        }

        block.observe_fields(text);

        if self.state == CursorState::InHeader {
            if block.subject_name.is_none() {
                block.subject_name = Some(text);
                return;
            }

            if !starts_with_weekday(text) {
                block.instructors.push(text);
                return;
            }

            self.state = CursorState::InScheduleLines;
        }

        if let Some(schedule) = schedule_line(text) {
            // Term dates must follow the last schedule line; an earlier match no longer counts.
            block.schedules.push((line.index, schedule));
            block.term = None;
            self.state = CursorState::InScheduleLines;
            return;
        }

        match self.state {
            CursorState::InScheduleLines | CursorState::SeekingTermDates
                if !block.schedules.is_empty() =>
            {
                match term_dates(text) {
                    Some(term) => {
                        block.term = Some(term);
                        self.state = CursorState::InTrailerFields;
                    }
                    None => self.state = CursorState::SeekingTermDates,
                }
            }
            _ => {}
        }
    }

    /// Closes the open block and returns every block plus the document header.
    pub fn finish(mut self) -> (ScheduleHeader, Vec<Block<'a>>) {
        self.close_block();
        (self.header, self.blocks)
    }

    fn close_block(&mut self) {
        if let Some(mut block) = self.current.take() {
            block.final_state = self.state;
            self.blocks.push(block);
        }
        self.state = CursorState::SeekingBlock;
    }

    fn observe_preamble(header: &mut ScheduleHeader, text: &str) {
        if header.process_date.is_none()
            && let Some(date) = patterns::process_date(text)
        {
            header.process_date = Some(date);
        }

        if let Some((campus, career)) = patterns::campus_and_career(text) {
            header.campus = Some(campus);
            header.career = Some(career);
        }
    }
}
