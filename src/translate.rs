// Translation driver
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

//! Translation of an entire document.
//!
//! A translation renders each child of the root element at depth 0,
//!   in document order,
//!   and concatenates the results.
//! The name of the root element itself is not significant.
//!
//! Each translation owns a fresh [`ConstTable`];
//!   constants never leak from one document into another.
//!
//! Translation is fail-fast:
//!   the first [`ConvertError`] aborts the translation and no output is
//!   produced,
//!     not even for top-level elements that had already been rendered.

use crate::convert::{ConvertResult, Converter};
use crate::symtab::ConstTable;
use crate::tree::Element;
use log::debug;

/// The result of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    output: String,
    constants: ConstTable,
}

impl Translation {
    /// Translate the document rooted at `root`.
    pub fn run(root: &Element) -> ConvertResult<Self> {
        let mut constants = ConstTable::new();
        let mut output = String::new();

        {
            let mut converter = Converter::new(&mut constants);

            for ele in root.children() {
                converter.render_into(&mut output, ele, 0)?;
            }
        }

        debug!(
            "translated {} top-level element(s) with {} constant(s)",
            root.children().len(),
            constants.len(),
        );

        Ok(Self { output, constants })
    }

    /// Rendered UCL-like text.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Constants as they stood at the end of the translation.
    pub fn constants(&self) -> &ConstTable {
        &self.constants
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

/// Translate the document rooted at `root` into UCL-like text.
///
/// ```
/// use xucl::{translate::translate, tree::Element};
///
/// let root = Element::new("config")
///     .with_child(
///         Element::new("define")
///             .with_attr("name", "TEN")
///             .with_attr("value", "10"),
///     )
///     .with_child(Element::new("expression").with_attr("value", "TEN 2 +"));
///
/// assert_eq!(
///     Ok("(define TEN 10);\n?(TEN 2 +) // Result: 12\n".to_string()),
///     translate(&root),
/// );
/// ```
pub fn translate(root: &Element) -> ConvertResult<String> {
    Translation::run(root).map(Translation::into_output)
}
