// Tests for structural conversion
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
use crate::eval::Op;
use crate::value::Value;

const S: Span = Span::new(10, 20);

fn entry(name: &str, value: &str) -> Element {
    Element::new("entry")
        .with_attr("name", name)
        .with_attr("value", value)
}

fn define(name: &str, value: &str) -> Element {
    Element::new("define")
        .with_attr("name", name)
        .with_attr("value", value)
}

fn expression(value: &str) -> Element {
    Element::new("expression").with_attr("value", value)
}

fn render(ele: &Element) -> ConvertResult<String> {
    Converter::new(&mut ConstTable::new()).render(ele, 0)
}

mod dictionary {
    use super::*;

    #[test]
    fn single_entry() {
        let dict = Element::new("dictionary").with_child(entry("key", "42"));

        assert_eq!(Ok("@{\n key = 42;\n}\n".to_string()), render(&dict));
    }

    #[test]
    fn empty_dictionary() {
        assert_eq!(
            Ok("@{\n}\n".to_string()),
            render(&Element::new("dictionary"))
        );
    }

    #[test]
    fn entries_in_document_order() {
        let dict = Element::new("dictionary")
            .with_child(entry("host", "localhost"))
            .with_child(entry("port", "8080"))
            .with_child(entry("cert", "cert.pem"));

        assert_eq!(
            Ok("@{\n host = localhost;\n port = 8080;\n cert = cert.pem;\n}\n"
                .to_string()),
            render(&dict)
        );
    }

    #[test]
    fn nested_dictionary_is_indented_one_level_deeper() {
        let dict = Element::new("dictionary")
            .with_child(entry("a", "1"))
            .with_child(
                Element::new("entry").with_attr("name", "inner").with_child(
                    Element::new("dictionary").with_child(entry("b", "2")),
                ),
            );

        assert_eq!(
            Ok("@{\n a = 1;\n inner =   @{\n   b = 2;\n  }\n}\n".to_string()),
            render(&dict)
        );
    }

    #[test]
    fn render_at_depth_indents_braces_and_entries() {
        let dict = Element::new("dictionary").with_child(entry("k", "v"));
        let mut consts = ConstTable::new();

        assert_eq!(
            Ok("    @{\n     k = v;\n    }\n".to_string()),
            Converter::new(&mut consts).render(&dict, 2)
        );
    }

    // Nested dictionaries take priority over a `value` on the same entry.
    #[test]
    fn nested_dictionary_wins_over_value() {
        let dict = Element::new("dictionary").with_child(
            entry("both", "ignored").with_child(Element::new("dictionary")),
        );

        assert_eq!(
            Ok("@{\n both =   @{\n  }\n}\n".to_string()),
            render(&dict)
        );
    }

    #[test]
    fn entry_values_resolve_constants() {
        let dict = Element::new("dictionary")
            .with_child(entry("port", "PORT"))
            .with_child(entry("host", "HOST"))
            .with_child(entry("other", "UNDEFINED"));

        let mut consts: ConstTable =
            [("PORT", "8080"), ("HOST", "example.com")].into_iter().collect();

        assert_eq!(
            Ok("@{\n port = 8080;\n host = example.com;\n other = UNDEFINED;\n}\n"
                .to_string()),
            Converter::new(&mut consts).render(&dict, 0)
        );
    }

    #[test]
    fn integer_values_are_normalized() {
        let dict = Element::new("dictionary").with_child(entry("n", "007"));

        assert_eq!(Ok("@{\n n = 7;\n}\n".to_string()), render(&dict));
    }

    #[test]
    fn skips_unnamed_and_non_entry_children() {
        let dict = Element::new("dictionary")
            .with_child(Element::new("entry").with_attr("value", "1"))
            .with_child(Element::new("comment").with_attr("name", "x"))
            .with_child(entry("kept", "2"));

        assert_eq!(Ok("@{\n kept = 2;\n}\n".to_string()), render(&dict));
    }

    #[test]
    fn entry_without_value_or_dictionary_is_invalid() {
        let dict = Element::new("dictionary")
            .with_child(Element::open("entry", S).with_attr("name", "bad"));

        assert_eq!(
            Err(ConvertError::InvalidEntry("bad".into(), S)),
            render(&dict)
        );
    }

    #[test]
    fn invalid_nested_entry_fails_whole_dictionary() {
        let dict = Element::new("dictionary").with_child(
            Element::new("entry").with_attr("name", "outer").with_child(
                Element::new("dictionary").with_child(
                    Element::open("entry", S).with_attr("name", "inner"),
                ),
            ),
        );

        assert_eq!(
            Err(ConvertError::InvalidEntry("inner".into(), S)),
            render(&dict)
        );
    }
}

mod define {
    use super::*;

    #[test]
    fn renders_and_stores_constant() {
        let mut consts = ConstTable::new();

        let out = Converter::new(&mut consts).render(&define("PI", "3.14"), 0);

        assert_eq!(Ok("(define PI 3.14);\n".to_string()), out);
        assert_eq!(Some("3.14"), consts.get("PI"));
    }

    #[test]
    fn stores_resolved_string_form() {
        let mut consts = ConstTable::new();

        let out =
            Converter::new(&mut consts).render(&define("PORT", "-0080"), 0);

        assert_eq!(Ok("(define PORT -80);\n".to_string()), out);
        assert_eq!(Some("-80"), consts.get("PORT"));
    }

    #[test]
    fn value_may_reference_earlier_constant() {
        let mut consts = ConstTable::new();
        let mut sut = Converter::new(&mut consts);

        assert!(sut.render(&define("HOST", "localhost"), 0).is_ok());
        assert_eq!(
            Ok("(define SERVER localhost);\n".to_string()),
            sut.render(&define("SERVER", "HOST"), 0)
        );

        assert_eq!(Some("localhost"), consts.get("SERVER"));
    }

    #[test]
    fn redefinition_overwrites() {
        let mut consts = ConstTable::new();
        let mut sut = Converter::new(&mut consts);

        assert!(sut.render(&define("N", "1"), 0).is_ok());
        assert!(sut.render(&define("N", "2"), 0).is_ok());
        assert_eq!(
            Ok("?(N 1 +) // Result: 3\n".to_string()),
            sut.render(&expression("N 1 +"), 0)
        );

        assert_eq!(Some("2"), consts.get("N"));
    }

    #[test]
    fn missing_name_is_invalid() {
        let ele = Element::open("define", S).with_attr("value", "1");

        assert_eq!(Err(ConvertError::InvalidDefine("name", S)), render(&ele));
    }

    #[test]
    fn missing_value_is_invalid() {
        let ele = Element::open("define", S).with_attr("name", "N");
        let mut consts = ConstTable::new();

        assert_eq!(
            Err(ConvertError::InvalidDefine("value", S)),
            Converter::new(&mut consts).render(&ele, 0)
        );
        assert!(consts.is_empty());
    }
}

mod expression {
    use super::*;

    #[test]
    fn renders_expression_with_result_comment() {
        assert_eq!(
            Ok("?(3 4 +) // Result: 7\n".to_string()),
            render(&expression("3 4 +"))
        );
    }

    #[test]
    fn expression_text_is_emitted_verbatim() {
        assert_eq!(
            Ok("?(  -5   abs ) // Result: 5\n".to_string()),
            render(&expression("  -5   abs "))
        );
    }

    #[test]
    fn missing_value_is_an_empty_expression() {
        let ele = Element::open("expression", S);

        assert_eq!(
            Err(ConvertError::Eval(EvalError::EmptyResult, "".into(), S)),
            render(&ele)
        );
    }

    #[test]
    fn evaluation_failure_carries_expression_and_span() {
        let ele = Element::open("expression", S).with_attr("value", "1 H +");
        let mut consts: ConstTable = [("H", "host")].into_iter().collect();

        assert_eq!(
            Err(ConvertError::Eval(
                EvalError::NonIntegerOperand(
                    Op::Add,
                    vec![Value::from(1), Value::Str("host".into())]
                ),
                "1 H +".into(),
                S
            )),
            Converter::new(&mut consts).render(&ele, 0)
        );
    }
}

#[test]
fn unknown_element_is_rejected() {
    let ele = Element::open("include", S);

    let result = render(&ele);

    assert_eq!(Err(ConvertError::UnknownElement("include".into(), S)), result);
    assert_eq!(Some(S), result.err().map(|e| e.span()));
}

// `entry` is only meaningful within a dictionary.
#[test]
fn entry_is_not_a_top_level_kind() {
    assert!(matches!(
        render(&entry("a", "b")),
        Err(ConvertError::UnknownElement(name, _)) if name == "entry"
    ));
}

#[test]
fn node_kind_round_trips_through_name() {
    for kind in [NodeKind::Dictionary, NodeKind::Define, NodeKind::Expression]
    {
        assert_eq!(Some(kind), NodeKind::from_name(&kind.to_string()));
    }

    assert_eq!(None, NodeKind::from_name("Dictionary"));
}

#[test]
fn diagnostic_points_at_element() {
    let err = ConvertError::InvalidDefine("value", S);
    let desc = err.describe();

    assert_eq!(2, desc.len());
    assert!(desc.iter().all(|aspan| aspan.span() == S));
}

#[test]
fn eval_error_is_source() {
    use std::error::Error;

    let err = ConvertError::Eval(EvalError::EmptyResult, "".into(), S);

    assert!(err.source().is_some());
    assert!(ConvertError::InvalidEntry("x".into(), S).source().is_none());
}
