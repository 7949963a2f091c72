// Constant table
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

//! Run-scoped table of named constants.
//!
//! Constants are introduced by `define` elements in document order and
//!   are visible to everything that follows them.
//! There is no pre-scan,
//!   so a name referenced before its `define` is simply not a constant
//!   yet.
//!
//! Values are stored in their resolved string form
//!   (e.g. `"007"` is stored as `"7"`)
//!   and re-interpreted by the [value resolver](crate::value::resolve)
//!   on each lookup.
//!
//! A table lives for exactly one translation;
//!   see [`Translation`](crate::translate::Translation).

use fxhash::FxHashMap;

/// Mapping of constant name to its resolved value in string form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstTable {
    map: FxHashMap<String, String>,
}

impl ConstTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Define (or redefine) the constant `name`.
    ///
    /// A redefinition replaces the previous value,
    ///   which is returned.
    pub fn define<N: Into<String>, V: Into<String>>(
        &mut self,
        name: N,
        value: V,
    ) -> Option<String> {
        self.map.insert(name.into(), value.into())
    }

    /// Look up the value of the constant `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Constants ordered by name.
    ///
    /// The underlying map has no meaningful order,
    ///   so anything that is shown to a user should go through this
    ///   method.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs = self
            .map
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<Vec<_>>();

        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ConstTable {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut table = Self::new();

        for (name, value) in iter {
            table.define(name, value);
        }

        table
    }
}
