// Tests for the XML reader
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

#[test]
fn reads_nested_elements_with_attributes() {
    let src = r#"<config>
  <define name="PORT" value="8080"/>
  <dictionary>
    <entry name="port" value="PORT"/>
  </dictionary>
</config>"#;

    let root = read_str(src).unwrap();

    assert_eq!("config", root.name());
    assert_eq!(2, root.children().len());

    let define = &root.children()[0];
    assert_eq!("define", define.name());
    assert_eq!(Some("PORT"), define.attr("name"));
    assert_eq!(Some("8080"), define.attr("value"));

    let dict = &root.children()[1];
    assert_eq!("dictionary", dict.name());
    assert_eq!(1, dict.children().len());
    assert_eq!(Some("port"), dict.children()[0].attr("name"));
}

#[test]
fn records_opening_tag_spans() {
    let src = "<root>\n  <a/>\n  <define name=\"A\" value=\"1\"></define>\n</root>";

    let root = read_str(src).unwrap();
    let a = &root.children()[0];
    let define = &root.children()[1];

    assert_eq!(Span::new(0, 6), root.span());
    assert_eq!(Span::new(src.find("<a/>").unwrap(), 4), a.span());
    assert_eq!(
        Span::new(src.find("<define").unwrap(), 27),
        define.span()
    );

    // Attributes share the span of their element.
    assert!(define.attrs().iter().all(|attr| attr.span() == define.span()));
}

#[test]
fn ignores_everything_but_elements() {
    let src = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- leading comment -->
<root>
  some text
  <!-- a comment -->
  <?pi ignored?>
  <![CDATA[ <notanelement/> ]]>
  <expression value="1 2 +"/>
</root>"#;

    let root = read_str(src).unwrap();

    assert_eq!(1, root.children().len());
    assert_eq!("expression", root.children()[0].name());
}

#[test]
fn unescapes_attribute_values() {
    let root = read_str(r#"<r v="a &amp; b &lt;c&gt;"/>"#).unwrap();

    assert_eq!(Some("a & b <c>"), root.attr("v"));
}

// Literal whitespace within an attribute value would otherwise carry line
//   breaks into single-line output.
#[test]
fn normalizes_literal_whitespace_in_attribute_values() {
    let src = "<r v=\"3\n4\t+\" w=\"a\r\nb\" x=\"c\rd\"/>";

    let root = read_str(src).unwrap();

    assert_eq!(Some("3 4 +"), root.attr("v"));
    assert_eq!(Some("a b"), root.attr("w"));
    assert_eq!(Some("c d"), root.attr("x"));
}

#[test]
fn character_references_are_not_normalized() {
    let root = read_str(r#"<r v="a&#10;b&#9;c&#13;"/>"#).unwrap();

    assert_eq!(Some("a\nb\tc\r"), root.attr("v"));
}

#[test]
fn whitespace_normalization_leaves_clean_values_borrowed() {
    assert!(matches!(
        normalize_whitespace(b"1 2 +"),
        Cow::Borrowed(b"1 2 +")
    ));
}

#[test]
fn reads_from_buffered_reader() {
    let src = std::io::Cursor::new(b"<root><child/></root>".to_vec());

    let root = read(src).unwrap();

    assert_eq!("child", root.children()[0].name());
}

#[test]
fn empty_document_is_an_error() {
    assert!(matches!(read_str(""), Err(ReadError::EmptyDocument(_))));
    assert!(matches!(
        read_str("<!-- nothing here -->\n"),
        Err(ReadError::EmptyDocument(_))
    ));
}

#[test]
fn second_root_is_an_error() {
    let src = "<a/><b/>";

    assert_eq!(
        Err(ReadError::ExtraRoot("b".into(), Span::new(4, 4))),
        read_str(src)
    );
}

#[test]
fn unclosed_element_is_an_error() {
    let src = "<root><dictionary>";

    assert_eq!(
        Err(ReadError::UnclosedElement(
            "dictionary".into(),
            Span::new(6, 12)
        )),
        read_str(src)
    );
}

#[test]
fn mismatched_end_tag_is_an_error() {
    assert!(matches!(
        read_str("<root><a></b></root>"),
        Err(ReadError::Xml(..))
    ));
}

#[test]
fn stray_end_tag_is_an_error() {
    assert!(matches!(
        read_str("<root/></root>"),
        Err(ReadError::Xml(..) | ReadError::UnexpectedClose(..))
    ));
}

#[test]
fn duplicate_attribute_is_an_error() {
    let src = r#"<define name="A" name="B" value="1"/>"#;

    assert_eq!(
        Some(Span::new(0, src.len())),
        read_str(src).err().map(|e| e.span())
    );
}

#[test]
fn invalid_utf8_name_is_an_error() {
    let src: &[u8] = b"<r\xff/>";

    assert!(matches!(
        read(src),
        Err(ReadError::Utf8(_, span)) if span == Span::new(0, 5)
    ));
}

#[test]
fn diagnostic_marks_offending_span() {
    let err = ReadError::UnclosedElement("a".into(), Span::new(2, 3));

    let desc = err.describe();

    assert_eq!(1, desc.len());
    assert_eq!(Span::new(2, 3), desc[0].span());
}

// `quick_xml::Error` cannot be compared.
#[test]
fn xml_errors_never_compare_equal() {
    let mismatch = || quick_xml::Error::EndEventMismatch {
        expected: "a".into(),
        found: "b".into(),
    };

    let (a, b) = (XmlError(mismatch()), XmlError(mismatch()));

    assert_ne!(a, b);
}
