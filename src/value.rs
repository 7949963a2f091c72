// Value resolution
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

//! Interpretation of raw attribute strings.
//!
//! Every attribute value in a source document is a string.
//! Before it is emitted or used as an operand,
//!   it is _resolved_ into a [`Value`]:
//!
//!   1. A string of the form `-?[0-9]+` is an integer;
//!   2. Otherwise the name of a known constant yields that constant's
//!        value,
//!          which is itself an integer if it has integer form;
//!   3. Otherwise the string is an opaque literal
//!        (a hostname, a filename, ...).
//!
//! Resolution never fails.
//! An unrecognized name is not an error here;
//!   it is just a string.

use crate::symtab::ConstTable;
use num_bigint::BigInt;
use std::fmt::{self, Display};

/// A resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(BigInt),
    Str(String),
}

impl Value {
    /// The integer held by this value,
    ///   if any.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Self::Int(n) => Some(n),
            Self::Str(_) => None,
        }
    }

    /// Interpret `s` as an integer if it has integer form,
    ///   otherwise as an opaque string.
    ///
    /// This does not consult any constants;
    ///   see [`resolve`] for that.
    pub fn from_literal(s: &str) -> Self {
        parse_int(s)
            .map(Self::Int)
            .unwrap_or_else(|| Self::Str(s.to_string()))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => Display::fmt(n, f),
            Self::Str(s) => Display::fmt(s, f),
        }
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n.into())
    }
}

/// Whether `s` has integer form:
///   an optional leading `-` followed by one or more ASCII digits.
pub fn is_int_form(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `s` as an integer if it has integer form.
///
/// Integers are unbounded;
///   any string of integer form is an integer.
///
/// Leading zeroes are permitted
///   (`"007"` is `7`).
pub fn parse_int(s: &str) -> Option<BigInt> {
    if is_int_form(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// Resolve a raw attribute string against the constant table.
///
/// See the [module-level documentation](self) for the rules.
pub fn resolve(raw: &str, constants: &ConstTable) -> Value {
    if let Some(n) = parse_int(raw) {
        return Value::Int(n);
    }

    match constants.get(raw) {
        Some(value) => Value::from_literal(value),
        None => Value::Str(raw.to_string()),
    }
}
