// Structural conversion of elements into UCL-like text
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

//! Conversion of configuration elements into UCL-like text.
//!
//! Each top-level element of a document is one of three [`NodeKind`]s,
//!   rendered as follows
//!     (shown at depth 0):
//!
//! | Element                                   | Output                       |
//! |-------------------------------------------|------------------------------|
//! | `<dictionary>` of `<entry name value>`    | `@{\n name = value;\n}\n`    |
//! | `<define name="N" value="V"/>`            | `(define N V);\n`            |
//! | `<expression value="E"/>`                 | `?(E) // Result: R\n`        |
//!
//! An `entry` may instead contain a nested `dictionary`,
//!   which is rendered one level deeper after ` name = `.
//! Each level of depth indents by two spaces;
//!   entries are indented by one space beyond their dictionary.
//!
//! `define` elements populate the [`ConstTable`] as a side effect,
//!   making the constant visible to every value and expression that
//!   follows it in document order.
//! Conversion is therefore not idempotent:
//!   rendering the same `define` twice with different values changes what
//!   later elements see.

use crate::diagnose::{Annotate, AnnotatedSpan, Diagnostic};
use crate::eval::{evaluate, EvalError};
use crate::span::Span;
use crate::symtab::ConstTable;
use crate::tree::Element;
use crate::value::resolve;
use log::{debug, warn};
use std::fmt::{self, Display};

/// Kinds of elements that may be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Dictionary,
    Define,
    Expression,
}

impl NodeKind {
    /// Recognize the kind of element named `name`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dictionary" => Some(Self::Dictionary),
            "define" => Some(Self::Define),
            "expression" => Some(Self::Expression),
            _ => None,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Define => write!(f, "define"),
            Self::Expression => write!(f, "expression"),
        }
    }
}

/// Indentation for a given depth.
#[derive(Debug, Clone, Copy)]
struct Indent(usize);

impl Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (0..self.0).try_for_each(|_| f.write_str("  "))
    }
}

/// Error during conversion.
///
/// Errors own their data and carry the [`Span`] of the offending element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Element is not one of the known [`NodeKind`]s.
    UnknownElement(String, Span),

    /// Dictionary `entry` has neither a nested `dictionary` nor a `value`.
    InvalidEntry(String, Span),

    /// A `define` is missing the named attribute.
    InvalidDefine(&'static str, Span),

    /// An `expression` failed to evaluate.
    ///
    /// The expression text is retained for the diagnostic.
    Eval(EvalError, String, Span),
}

impl ConvertError {
    /// Span of the element that caused the error.
    pub fn span(&self) -> Span {
        match self {
            Self::UnknownElement(_, span)
            | Self::InvalidEntry(_, span)
            | Self::InvalidDefine(_, span)
            | Self::Eval(_, _, span) => *span,
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConvertError::*;

        match self {
            UnknownElement(name, _) => write!(f, "unknown element `{name}`"),

            InvalidEntry(name, _) => {
                write!(f, "invalid dictionary entry `{name}`")
            }

            InvalidDefine(attr, _) => {
                write!(f, "invalid define: missing `@{attr}`")
            }

            Eval(e, expr, _) => {
                write!(f, "failed to evaluate expression `{expr}`: {e}")
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Eval(e, _, _) => Some(e),
            _ => None,
        }
    }
}

impl Diagnostic for ConvertError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        use ConvertError::*;

        match self {
            UnknownElement(_, span) => span
                .error("this element is not recognized here")
                .with_help(
                    "expected one of `dictionary`, `define`, or `expression`",
                )
                .into(),

            InvalidEntry(_, span) => span
                .error(
                    "this entry has neither a `value` \
                       nor a nested `dictionary`",
                )
                .into(),

            InvalidDefine(attr, span) => span
                .error(format!("missing `{attr}` attribute"))
                .with_help("a `define` requires both `name` and `value`")
                .into(),

            Eval(e, _, span) => span.error(e.to_string()).into(),
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Render elements into UCL-like text.
///
/// The converter borrows the [`ConstTable`] of the current translation;
///   see [`crate::translate`] for the owner of that table.
pub struct Converter<'c> {
    constants: &'c mut ConstTable,
}

impl<'c> Converter<'c> {
    pub fn new(constants: &'c mut ConstTable) -> Self {
        Self { constants }
    }

    /// Render `ele` at the given indentation `depth`.
    ///
    /// This fails on the first error encountered,
    ///   discarding any text rendered for `ele` so far.
    /// Constants defined before the failure remain defined.
    pub fn render(
        &mut self,
        ele: &Element,
        depth: usize,
    ) -> ConvertResult<String> {
        let mut out = String::new();
        self.render_into(&mut out, ele, depth)?;

        Ok(out)
    }

    /// Render `ele`,
    ///   appending to `out`.
    pub fn render_into(
        &mut self,
        out: &mut String,
        ele: &Element,
        depth: usize,
    ) -> ConvertResult<()> {
        let kind = NodeKind::from_name(ele.name()).ok_or_else(|| {
            ConvertError::UnknownElement(ele.name().to_string(), ele.span())
        })?;

        debug!("rendering {kind} at depth {depth}");

        match kind {
            NodeKind::Dictionary => self.dictionary(out, ele, depth),
            NodeKind::Define => self.define(out, ele, depth),
            NodeKind::Expression => self.expression(out, ele, depth),
        }
    }

    fn dictionary(
        &mut self,
        out: &mut String,
        ele: &Element,
        depth: usize,
    ) -> ConvertResult<()> {
        let indent = Indent(depth);
        out.push_str(&format!("{indent}@{{\n"));

        for child in ele.children() {
            let name = match (child.name(), child.attr("name")) {
                ("entry", Some(name)) => name,
                (other, _) => {
                    debug!("skipping `{other}` in dictionary");
                    continue;
                }
            };

            if let Some(nested) = child.find_child("dictionary") {
                out.push_str(&format!("{indent} {name} = "));
                self.dictionary(out, nested, depth + 1)?;
            } else if let Some(raw) = child.attr("value") {
                let value = resolve(raw, self.constants);
                out.push_str(&format!("{indent} {name} = {value};\n"));
            } else {
                return Err(ConvertError::InvalidEntry(
                    name.to_string(),
                    child.span(),
                ));
            }
        }

        out.push_str(&format!("{indent}}}\n"));
        Ok(())
    }

    fn define(
        &mut self,
        out: &mut String,
        ele: &Element,
        depth: usize,
    ) -> ConvertResult<()> {
        let name = ele
            .attr("name")
            .ok_or(ConvertError::InvalidDefine("name", ele.span()))?;
        let raw = ele
            .attr("value")
            .ok_or(ConvertError::InvalidDefine("value", ele.span()))?;

        let value = resolve(raw, self.constants).to_string();

        if let Some(prev) = self.constants.define(name, value.as_str()) {
            warn!("constant `{name}` redefined (was `{prev}`, now `{value}`)");
        }

        out.push_str(&format!("{}(define {name} {value});\n", Indent(depth)));
        Ok(())
    }

    fn expression(
        &mut self,
        out: &mut String,
        ele: &Element,
        depth: usize,
    ) -> ConvertResult<()> {
        let expr = ele.attr("value").unwrap_or("");

        let result = evaluate(expr, self.constants).map_err(|e| {
            ConvertError::Eval(e, expr.to_string(), ele.span())
        })?;

        out.push_str(&format!(
            "{}?({expr}) // Result: {result}\n",
            Indent(depth)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod test;
