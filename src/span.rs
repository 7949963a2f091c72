// Source spans
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

//! Byte spans into a source document.
//!
//! A [`Span`] is a small [`Copy`] value recording where something came
//!   from so that a diagnostic can point the user back at it later.
//! Spans are collected while reading and never inspected on the happy
//!   path;
//!     resolving them into line and column numbers is left to the
//!     [diagnostic system](crate::diagnose).
//!
//! Spans do not carry the name of the document they refer to.
//! A translation only ever sees one document,
//!   and the caller that opened it already knows its name.

use std::fmt::{self, Display};

/// A byte interval into a source document.
///
/// The interval begins at [`Span::offset`] and spans [`Span::len`] bytes.
/// A zero-length span denotes a position rather than a range
///   (e.g. end of file).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

/// A span that represents no source location at all.
///
/// This is used for elements that were constructed programmatically
///   rather than read from a document.
pub const UNKNOWN_SPAN: Span = Span { offset: 0, len: 0 };

impl Span {
    /// Construct a span from an offset and a length in bytes.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Construct a span from a half-open byte interval `[start, end)`.
    ///
    /// If `end` precedes `start`,
    ///   a zero-length span at `start` is produced.
    pub fn from_byte_interval((start, end): (usize, usize)) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// Byte offset of the beginning of the span.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset one past the final byte of the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}

impl From<(usize, usize)> for Span {
    fn from(interval: (usize, usize)) -> Self {
        Self::from_byte_interval(interval)
    }
}

impl From<&Span> for Span {
    fn from(span: &Span) -> Self {
        *span
    }
}
