// XML reader producing an element tree
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

//! Parse XML into an [`Element`] tree.
//!
//! This uses [`quick_xml`] as the parser.
//!
//! Only elements and their attributes are retained.
//! Text,
//!   CDATA,
//!   comments,
//!   processing instructions,
//!   declarations,
//!   and doctypes
//!     are read and discarded,
//!       since nothing downstream assigns meaning to them.
//!
//! Each [`Element`] records the [`Span`] of its opening tag,
//!   from `<` through `>` inclusive.
//!
//! Attribute values are unescaped after their literal whitespace is
//!   normalized to spaces,
//!     so a value never spans more than one line of output.

use crate::diagnose::{Annotate, AnnotatedSpan, Diagnostic};
use crate::span::Span;
use crate::tree::{Attr, Element};
use log::debug;
use memchr::memchr3;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::str::Utf8Error;

/// Thin wrapper around [`quick_xml::Error`] to implement [`PartialEq`].
///
/// This will always yield `false`,
///   but allows us to derive the trait on [`ReadError`].
#[derive(Debug)]
pub struct XmlError(pub quick_xml::Error);

impl PartialEq for XmlError {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(e: quick_xml::Error) -> Self {
        Self(e)
    }
}

impl Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Error while reading an XML document.
#[derive(Debug, PartialEq)]
pub enum ReadError {
    /// The underlying parser rejected the input.
    ///
    /// The span is the position at which the failing event began.
    Xml(XmlError, Span),

    /// An element or attribute name or value is not valid UTF-8.
    Utf8(Utf8Error, Span),

    /// Input contained no root element.
    EmptyDocument(Span),

    /// A second element was found at the top level.
    ExtraRoot(String, Span),

    /// A closing tag was found with no element open.
    UnexpectedClose(String, Span),

    /// Input ended while the named element was still open.
    UnclosedElement(String, Span),
}

impl ReadError {
    pub fn span(&self) -> Span {
        match self {
            Self::Xml(_, span)
            | Self::Utf8(_, span)
            | Self::EmptyDocument(span)
            | Self::ExtraRoot(_, span)
            | Self::UnexpectedClose(_, span)
            | Self::UnclosedElement(_, span) => *span,
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ReadError::*;

        match self {
            Xml(e, _) => write!(f, "malformed XML: {e}"),
            Utf8(e, _) => write!(f, "invalid UTF-8: {e}"),
            EmptyDocument(_) => write!(f, "document has no root element"),
            ExtraRoot(name, _) => {
                write!(f, "unexpected second root element `{name}`")
            }
            UnexpectedClose(name, _) => {
                write!(f, "unexpected closing tag `</{name}>`")
            }
            UnclosedElement(name, _) => {
                write!(f, "unexpected end of input: `{name}` is not closed")
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e, _) => Some(e),
            Self::Utf8(e, _) => Some(e),
            _ => None,
        }
    }
}

impl Diagnostic for ReadError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        use ReadError::*;

        match self {
            Xml(_, span) => span.mark_error().into(),
            Utf8(_, span) => span.error("expected UTF-8 text here").into(),

            EmptyDocument(span) => span
                .error("expected a root element")
                .with_help("a configuration document must have a root element")
                .into(),

            ExtraRoot(_, span) => span
                .error("this element follows the root element")
                .with_help("a document may have only one root element")
                .into(),

            UnexpectedClose(_, span) => {
                span.error("no element is open here").into()
            }

            UnclosedElement(_, span) => {
                span.error("this element is never closed").into()
            }
        }
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Read the document contained in `src`.
pub fn read_str(src: &str) -> ReadResult<Element> {
    read(src.as_bytes())
}

/// Read a document from `src`,
///   returning its root element.
pub fn read<B: BufRead>(src: B) -> ReadResult<Element> {
    let mut reader = quick_xml::Reader::from_reader(src);
    reader.trim_text(true);

    let mut buf = Vec::new();

    // Elements whose closing tag has not yet been seen.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();
        let prev_pos = reader.buffer_position();

        let ev = reader
            .read_event(&mut buf)
            .map_err(|e| ReadError::Xml(e.into(), Span::new(prev_pos, 0)))?;

        match ev {
            Event::Start(ele) => {
                let span = open_span(&ele, reader.buffer_position(), 2);
                stack.push(open_element(&ele, span)?);
            }

            Event::Empty(ele) => {
                // `<tag ... />`
                //           ^ not part of `ele`
                let span = open_span(&ele, reader.buffer_position(), 3);
                let ele = open_element(&ele, span)?;

                close_element(ele, &mut stack, &mut root)?;
            }

            Event::End(end) => {
                let ele = stack.pop().ok_or_else(|| {
                    // </foo>
                    // |----|  name + '<' + '/' + '>'
                    let len = end.name().len() + 3;
                    let pos = reader.buffer_position().saturating_sub(len);

                    ReadError::UnexpectedClose(
                        String::from_utf8_lossy(end.name()).into_owned(),
                        Span::new(pos, len),
                    )
                })?;

                close_element(ele, &mut stack, &mut root)?;
            }

            Event::Eof => break,

            // Nothing else carries meaning for configuration.
            Event::Text(..)
            | Event::CData(..)
            | Event::Comment(..)
            | Event::Decl(..)
            | Event::PI(..)
            | Event::DocType(..) => (),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ReadError::UnclosedElement(
            open.name().to_string(),
            open.span(),
        ));
    }

    root.ok_or_else(|| {
        ReadError::EmptyDocument(Span::new(reader.buffer_position(), 0))
    })
}

/// Span of an opening tag that ended at `end`.
///
/// `ele` contains neither the `<` nor the `>` of the tag
///   (nor the `/` of a self-closing tag),
///     which are accounted for by `delim_len`.
fn open_span(ele: &BytesStart, end: usize, delim_len: usize) -> Span {
    let len = ele.len() + delim_len;
    Span::new(end.saturating_sub(len), len)
}

/// Produce an open [`Element`] with its attributes.
///
/// Attributes share the span of the opening tag.
fn open_element(ele: &BytesStart, span: Span) -> ReadResult<Element> {
    let name = decode(ele.name(), span)?;
    let mut open = Element::open(name, span);

    for result in ele.attributes() {
        let attr = result
            .map_err(quick_xml::Error::from)
            .map_err(|e| ReadError::Xml(e.into(), span))?;

        let raw = normalize_whitespace(&attr.value);
        let value = quick_xml::escape::unescape(&raw).map_err(|e| {
            ReadError::Xml(quick_xml::Error::EscapeError(e).into(), span)
        })?;

        open.push_attr(Attr::new(
            decode(attr.key, span)?,
            decode(&value, span)?,
            span,
        ));
    }

    Ok(open)
}

/// Normalize literal whitespace in a raw attribute value.
///
/// Each literal tab,
///   newline,
///   or line ending (`\r\n` or a lone `\r`)
///     becomes a single space,
///       as XML attribute-value normalization requires.
/// This must happen before unescaping so that character references
///   like `&#10;` survive as the characters they denote.
fn normalize_whitespace(raw: &[u8]) -> Cow<[u8]> {
    if memchr3(b'\t', b'\n', b'\r', raw).is_none() {
        return Cow::Borrowed(raw);
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().peekable();

    while let Some(&b) = bytes.next() {
        match b {
            b'\r' => {
                bytes.next_if_eq(&&b'\n');
                out.push(b' ');
            }
            b'\t' | b'\n' => out.push(b' '),
            _ => out.push(b),
        }
    }

    Cow::Owned(out)
}

/// Attach a completed element to its parent,
///   or make it the root if nothing is open.
fn close_element(
    ele: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> ReadResult<()> {
    match (stack.last_mut(), root.is_some()) {
        (Some(parent), _) => {
            parent.push_child(ele);
            Ok(())
        }

        (None, true) => Err(ReadError::ExtraRoot(
            ele.name().to_string(),
            ele.span(),
        )),

        (None, false) => {
            debug!("read root element `{}`", ele.name());
            *root = Some(ele);
            Ok(())
        }
    }
}

fn decode(bytes: &[u8], span: Span) -> ReadResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ReadError::Utf8(e, span))
}

#[cfg(test)]
mod test;
