// XML to UCL-like configuration translator (XUCL)
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

//! Translation of XML configuration documents into a UCL-like text
//!   format.
//!
//! A document is read into an element tree by [`reader`],
//!   then each top-level element is rendered by [`convert`] under the
//!   direction of [`translate`]:
//!
//! ```text
//! XML --reader--> Element --translate/convert--> UCL-like text
//!                                   |
//!                          value / eval / symtab
//! ```
//!
//! Attribute values are resolved against constants introduced by
//!   `define` elements (see [`value`] and [`symtab`]),
//!     and `expression` elements are evaluated as postfix integer
//!     arithmetic (see [`eval`]).
//!
//! Errors carry the [`span::Span`] of the offending element so that they
//!   can be rendered against the source by [`diagnose`].

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod convert;
pub mod diagnose;
pub mod eval;
pub mod reader;
pub mod span;
pub mod symtab;
pub mod translate;
pub mod tree;
pub mod value;
