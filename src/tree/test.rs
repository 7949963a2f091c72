// Tests for the element tree
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

use super::*;

const S: Span = Span::new(3, 14);

mod attrs {
    use super::*;

    #[test]
    fn linear_search_for_attr_name_in_list() {
        let attra = Attr::new("a", "a value", S);
        let attrb = Attr::new("b", "b value", S);

        let attrs = AttrList::from([attra.clone(), attrb.clone()]);

        assert_eq!(attrs.find("a"), Some(&attra));
        assert_eq!(attrs.find("b"), Some(&attrb));

        assert_eq!(attrs.find("unknown"), None);
    }

    // Duplicate attributes are rejected by the reader,
    //   but a programmatically built list must still behave predictably.
    #[test]
    fn find_yields_first_of_duplicates() {
        let first = Attr::new("a", "first", S);
        let second = Attr::new("a", "second", S);
        let attrs = AttrList::from([first.clone(), second]);

        assert_eq!(attrs.find("a"), Some(&first));
        assert_eq!(2, attrs.len());
    }
}

#[test]
fn element_builder_shares_opening_tag_span() {
    let ele = Element::open("define", S)
        .with_attr("name", "PORT")
        .with_attr("value", "8080");

    assert_eq!("define", ele.name());
    assert_eq!(Some("PORT"), ele.attr("name"));
    assert_eq!(Some("8080"), ele.attr("value"));
    assert_eq!(None, ele.attr("missing"));

    assert!(ele.attrs().iter().all(|attr| attr.span() == S));
    assert_eq!(S, ele.span());
}

#[test]
fn find_child_yields_first_match_in_document_order() {
    let first = Element::new("dictionary").with_attr("n", "1");
    let second = Element::new("dictionary").with_attr("n", "2");

    let entry = Element::new("entry")
        .with_child(Element::new("other"))
        .with_child(first.clone())
        .with_child(second);

    assert_eq!(Some(&first), entry.find_child("dictionary"));
    assert_eq!(None, entry.find_child("define"));
    assert_eq!(3, entry.children().len());
}

#[test]
fn new_element_has_unknown_span() {
    let ele = Element::new("expression");

    assert_eq!(UNKNOWN_SPAN, ele.span());
    assert!(ele.attrs().is_empty());
    assert!(ele.children().is_empty());
}
