// Element tree
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

//! Owned element tree of a source document.
//!
//! The [reader](crate::reader) produces a single root [`Element`];
//!   the [translator](crate::translate) only ever reads it.
//! Text nodes are not represented,
//!   since the configuration dialect carries all of its data in
//!   attributes.
//!
//! Elements can also be built programmatically using [`Element::new`]
//!   together with [`Element::with_attr`] and [`Element::with_child`],
//!     which is convenient for tests and for callers that obtain their
//!     tree from somewhere other than XML text:
//!
//! ```
//! use xucl::tree::Element;
//!
//! let dict = Element::new("dictionary").with_child(
//!     Element::new("entry")
//!         .with_attr("name", "port")
//!         .with_attr("value", "8080"),
//! );
//!
//! assert_eq!(Some("port"), dict.children()[0].attr("name"));
//! ```

use crate::span::{Span, UNKNOWN_SPAN};

/// An attribute and its value.
///
/// Values are always strings at this level;
///   interpreting them is the job of the
///   [value resolver](crate::value::resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    name: String,
    value: String,
    span: Span,
}

impl Attr {
    pub fn new<N: Into<String>, V: Into<String>>(
        name: N,
        value: V,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            span,
        }
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value, unescaped.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Span of the opening tag that holds this attribute.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// List of attributes in document order.
///
/// Attribute lists are expected to be small,
///   and so lookups are a linear search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    attrs: Vec<Attr>,
}

impl AttrList {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an attribute to the end of the list.
    pub fn push(&mut self, attr: Attr) {
        self.attrs.push(attr)
    }

    /// Find the first attribute with the given name.
    pub fn find(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl<const N: usize> From<[Attr; N]> for AttrList {
    fn from(attrs: [Attr; N]) -> Self {
        Self {
            attrs: attrs.into(),
        }
    }
}

/// An element and its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    /// Zero or more attributes.
    attrs: AttrList,
    /// Zero or more child elements.
    children: Vec<Element>,
    /// Span of the opening tag.
    span: Span,
}

impl Element {
    /// Create an element with no attributes or children that does not
    ///   correspond to any source location.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self::open(name, UNKNOWN_SPAN)
    }

    /// Create an element whose opening tag occupies `span`.
    pub fn open<N: Into<String>>(name: N, span: Span) -> Self {
        Self {
            name: name.into(),
            attrs: AttrList::new(),
            children: vec![],
            span,
        }
    }

    /// Add an attribute,
    ///   sharing the span of this element's opening tag.
    pub fn with_attr<N: Into<String>, V: Into<String>>(
        mut self,
        name: N,
        value: V,
    ) -> Self {
        self.push_attr(Attr::new(name, value, self.span));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn push_attr(&mut self, attr: Attr) {
        self.attrs.push(attr)
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child)
    }

    /// Element name (tag).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes of this element.
    pub fn attrs(&self) -> &AttrList {
        &self.attrs
    }

    /// Value of the attribute `name`,
    ///   if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.find(name).map(Attr::value)
    }

    /// Child elements of this element in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child element named `name`.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Span of the opening tag.
    pub fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod test;
