// Diagnostic report rendering
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

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::{
    resolver::{ResolvedSpan, SourceResolver},
    AnnotatedSpan, Diagnostic, Label, Level,
};
use crate::span::Span;
use std::fmt::{self, Display};

/// Render diagnostic reports in a highly visual way.
///
/// This report is modeled after Rust's default error reporting,
///   including the line of source associated with each span and an
///   underline beneath the span itself.
///
/// Rendering never fails.
/// The returned [`Report`] should be rendered to a [`String`] in full
///   before being written anywhere,
///     so that it is not interleaved with other output.
pub struct VisualReporter<'s> {
    name: &'s str,
    resolver: SourceResolver<'s>,
}

impl<'s> VisualReporter<'s> {
    /// Create a reporter for the source text `src`,
    ///   which will be referred to as `name` in span headings.
    pub fn new(name: &'s str, src: &'s str) -> Self {
        Self {
            name,
            resolver: SourceResolver::new(src),
        }
    }

    pub fn render<'d, D: Diagnostic>(
        &self,
        diagnostic: &'d D,
    ) -> Report<'d, 's, D> {
        let mut report = Report {
            msg: diagnostic,
            name: self.name,
            secs: Vec::new(),
            level: Level::default(),
        };

        for aspan in diagnostic.describe() {
            report.push(&self.resolver, aspan);
        }

        report
    }
}

/// A rendered diagnostic report.
///
/// The report implements [`Display`].
#[derive(Debug)]
pub struct Report<'d, 's, D: Diagnostic> {
    msg: &'d D,
    name: &'s str,
    secs: Vec<Section<'d, 's>>,
    level: Level,
}

impl<'d, 's, D: Diagnostic> Report<'d, 's, D> {
    /// Add an annotated span to the report.
    ///
    /// Adjacent spans that are identical are squashed into a single
    ///   section so that the same source line is not repeated.
    fn push(
        &mut self,
        resolver: &SourceResolver<'s>,
        aspan: AnnotatedSpan<'d>,
    ) {
        let AnnotatedSpan(span, level, olabel) = aspan;
        self.level = self.level.min(level);

        let label = SpanLabel(level, olabel);

        match self.secs.last_mut() {
            Some(sec) if sec.span == span => sec.labels.push(label),
            _ => self.secs.push(Section {
                span,
                rspan: resolver.resolve(span),
                labels: vec![label],
            }),
        }
    }

    /// Severity of the most severe annotation in the report.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl<'d, 's, D: Diagnostic> Display for Report<'d, 's, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{level}: {msg}\n", level = self.level, msg = self.msg)?;

        self.secs
            .iter()
            .try_for_each(|sec| sec.fmt_with_name(self.name, f))
    }
}

/// A section of a [`Report`] describing a single [`Span`].
#[derive(Debug)]
struct Section<'d, 's> {
    span: Span,
    rspan: ResolvedSpan<'s>,
    labels: Vec<SpanLabel<'d>>,
}

impl<'d, 's> Section<'d, 's> {
    fn fmt_with_name(
        &self,
        name: &str,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let rspan = &self.rspan;
        let col = rspan.col();
        let line_num = rspan.line_num().to_string();
        let gutter = " ".repeat(line_num.len());

        write!(f, "{gutter}--> {name}:{line_num}:{}\n", col.start())?;
        write!(f, "{gutter} |\n")?;
        write!(f, "{line_num} | {}\n", rspan.line())?;
        write!(
            f,
            "{gutter} | {pad}{marks}\n",
            pad = " ".repeat(col.start().get() - 1),
            marks = "^".repeat(col.width()),
        )?;

        self.labels
            .iter()
            .filter(|label| label.1.is_some())
            .try_for_each(|label| write!(f, "{gutter} = {label}\n"))
    }
}

/// A label with the severity of the span it annotates.
#[derive(Debug)]
struct SpanLabel<'d>(Level, Option<Label<'d>>);

impl<'d> Display for SpanLabel<'d> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self(level, Some(label)) => write!(f, "{level}: {label}"),
            Self(level, None) => write!(f, "{level}"),
        }
    }
}
