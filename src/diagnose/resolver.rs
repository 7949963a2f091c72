// Span resolution for diagnostics
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of XUCL.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Resolve [`Span`]s into line:column source locations.
//!
//! Spans hold only raw byte offsets gathered during reading.
//! Turning those into something a human wants to read requires going
//!   back to the source text,
//!     which is only worth doing once we know that a diagnostic will
//!     actually be shown.

use crate::span::Span;
use memchr::{memchr, memchr_iter, memrchr};
use std::num::NonZeroUsize;
use unicode_width::UnicodeWidthChar;

/// Column endpoints of a resolved span.
///
/// Columns are 1-indexed and count display cells,
///   not bytes or characters,
///     so that an underline drawn beneath a line of source lines up with
///     what the user sees in their terminal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Column {
    /// Inclusive start and end columns of a non-empty span.
    Endpoints(NonZeroUsize, NonZeroUsize),

    /// A zero-length span positioned before the given column.
    Before(NonZeroUsize),
}

impl Column {
    /// Column at which the span begins.
    pub fn start(&self) -> NonZeroUsize {
        match self {
            Self::Endpoints(start, _) | Self::Before(start) => *start,
        }
    }

    /// Number of display cells an underline beneath this span occupies.
    ///
    /// A zero-length span still gets a single marker.
    pub fn width(&self) -> usize {
        match self {
            Self::Endpoints(start, end) => end.get() - start.get() + 1,
            Self::Before(_) => 1,
        }
    }
}

/// A [`Span`] resolved to its location in the source.
///
/// Only the first line of a multi-line span is retained;
///   that is all the reporter ever shows.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ResolvedSpan<'s> {
    span: Span,
    line_num: NonZeroUsize,
    col: Column,
    line: &'s str,
}

impl<'s> ResolvedSpan<'s> {
    /// The original span.
    pub fn unresolved_span(&self) -> Span {
        self.span
    }

    /// 1-indexed line number of the start of the span.
    pub fn line_num(&self) -> NonZeroUsize {
        self.line_num
    }

    pub fn col(&self) -> Column {
        self.col
    }

    /// Text of the first line of the span,
    ///   without its line terminator.
    pub fn line(&self) -> &'s str {
        self.line
    }
}

/// Resolves spans against an in-memory source document.
#[derive(Debug, Clone, Copy)]
pub struct SourceResolver<'s> {
    src: &'s str,
}

impl<'s> SourceResolver<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src }
    }

    /// Resolve the provided [`Span`].
    ///
    /// Spans beyond the end of the source are clamped to its end;
    ///   a diagnostic is never suppressed because its span is off.
    pub fn resolve(&self, span: Span) -> ResolvedSpan<'s> {
        let bytes = self.src.as_bytes();
        let offset = span.offset().min(bytes.len());

        let line_start = memrchr(b'\n', &bytes[..offset])
            .map(|i| i + 1)
            .unwrap_or(0);
        let line_end = memchr(b'\n', &bytes[offset..])
            .map(|i| offset + i)
            .unwrap_or(bytes.len());

        // Offsets from the reader always fall on ASCII delimiters,
        //   but a hand-built span might not.
        let line = self
            .src
            .get(line_start..line_end)
            .unwrap_or("")
            .trim_end_matches('\r');

        let line_num = memchr_iter(b'\n', &bytes[..offset]).count() + 1;

        ResolvedSpan {
            span,
            line_num: NonZeroUsize::new(line_num).unwrap_or(NonZeroUsize::MIN),
            col: Self::resolve_columns(line, offset - line_start, span),
            line,
        }
    }

    /// Determine the 1-indexed column for each endpoint of `span`,
    ///   relative to the start of `line`.
    ///
    /// Spans that continue past the end of the line are truncated at the
    ///   end of the line.
    fn resolve_columns(line: &str, rel_start: usize, span: Span) -> Column {
        let rel_end = rel_start + span.len().max(1) - 1;

        let (start, end) = line.char_indices().fold(
            (1, 0),
            |(start, end), (i, c)| {
                let width = c.width().unwrap_or(0);
                (
                    if i < rel_start { start + width } else { start },
                    if i <= rel_end { end + width } else { end },
                )
            },
        );

        let col_start = NonZeroUsize::new(start).unwrap_or(NonZeroUsize::MIN);

        if span.is_empty() {
            Column::Before(col_start)
        } else {
            let col_end = NonZeroUsize::new(end)
                .unwrap_or(NonZeroUsize::MIN)
                .max(col_start);

            Column::Endpoints(col_start, col_end)
        }
    }
}
