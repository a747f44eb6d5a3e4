#![cfg_attr(tarpaulin, skip)]

use super::*;
use crate::Name;

#[test]
fn test_options_size() {
    // Printer options should fit in a machine word on 32-bit architectures.
    assert!(std::mem::size_of::<Options>() <= std::mem::size_of::<u32>());
}

#[test]
fn test_atoms() {
    for (value, expected) in &[
        (Value::Nil, "nil"),
        (Value::from(true), "true"),
        (Value::from(false), "false"),
        (Value::from(-42), "-42"),
        (Value::from(i64::MIN), "-9223372036854775808"),
        (Value::from(1.0), "1.0"),
        (Value::from(-0.5), "-0.5"),
        (Value::from(f64::INFINITY), "##Inf"),
        (Value::from(f64::NEG_INFINITY), "##-Inf"),
        (Value::from(f64::NAN), "##NaN"),
        (Value::keyword("kw"), ":kw"),
        (Value::keyword(Name::namespaced("my.ns", "kw")), ":my.ns/kw"),
        (Value::symbol("sym"), "sym"),
        (Value::symbol(Name::namespaced("a", "b")), "a/b"),
        (Value::symbol("/"), "/"),
    ] {
        assert_eq!(to_string(value).unwrap(), *expected);
    }
}

#[test]
fn test_str_escapes() {
    // Only the escapes understood by the parser are used, other control
    // characters are output verbatim.
    assert_eq!(
        to_string(&Value::string("\t\n\r\"\\\u{07}é")).unwrap(),
        "\"\\t\\n\\r\\\"\\\\\u{07}é\""
    );
}

#[test]
fn test_chars() {
    for (c, expected) in &[
        ('a', "\\a"),
        ('(', "\\("),
        ('λ', "\\λ"),
        ('\n', "\\newline"),
        ('\r', "\\return"),
        (' ', "\\space"),
        ('\t', "\\tab"),
        ('\u{08}', "\\backspace"),
        ('\u{0c}', "\\formfeed"),
        ('\u{01}', "\\u0001"),
        ('\u{a0}', "\\u00A0"),
    ] {
        assert_eq!(to_string(&Value::from(*c)).unwrap(), *expected);
    }
}

#[test]
fn test_char_syntax() {
    let options = Options::default().with_char_syntax(CharSyntax::Quote);
    assert_eq!(
        to_string_custom(&Value::vector(vec!['x', ' ']), options).unwrap(),
        "['x 'space]"
    );
}

#[test]
fn test_collections() {
    let value = Value::list(vec![
        Value::vector(vec![1, 2]),
        Value::list(Vec::<Value>::new()),
        Value::set(vec![Value::keyword("only")]),
        Value::map(vec![(Value::keyword("k"), Value::Nil)]),
    ]);
    assert_eq!(to_string(&value).unwrap(), "([1 2] () #{:only} {:k nil})");
}

#[test]
fn test_map_separator() {
    let map = Value::map(vec![(1, 2), (3, 4)]);
    let printed = to_string(&map).unwrap();
    assert!(printed == "{1 2, 3 4}" || printed == "{3 4, 1 2}", "{}", printed);

    let options = Options::default().with_map_separator(MapSeparator::Space);
    let printed = to_string_custom(&map, options).unwrap();
    assert!(printed == "{1 2 3 4}" || printed == "{3 4 1 2}", "{}", printed);
}

#[test]
fn test_tagged_and_discard() {
    let value = Value::vector(vec![
        Value::tagged(Name::namespaced("my", "point"), Value::vector(vec![1, 2])),
        Value::Discard(Box::new(Value::from("gone"))),
    ]);
    assert_eq!(
        to_string(&value).unwrap(),
        r#"[#my/point [1 2] #_ "gone"]"#
    );
}

#[test]
fn test_display_matches_printer() {
    let value = Value::list(vec![Value::symbol("inc"), Value::from(41)]);
    assert_eq!(value.to_string(), to_string(&value).unwrap());
}

#[test]
fn test_unreadable_names() {
    for value in &[
        Value::symbol("nil"),
        Value::symbol("true"),
        Value::symbol("1"),
        Value::symbol("a/b"),
        Value::symbol(""),
        Value::keyword("a b"),
        Value::keyword(":a"),
        Value::keyword(Name::namespaced("", "a")),
        Value::tagged("_t", Value::Nil),
        Value::tagged(Name::namespaced("1x", "t"), Value::Nil),
        Value::vector(vec![Value::from(1), Value::symbol("-1")]),
    ] {
        let err = to_string(value).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData, "{:?}", value);
    }
}

#[test]
fn test_reserved_words_elsewhere() {
    for (value, expected) in &[
        (Value::keyword("nil"), ":nil"),
        (Value::symbol(Name::namespaced("my", "true")), "my/true"),
        (Value::tagged("nil", Value::from(1)), "#nil 1"),
    ] {
        let text = to_string(value).unwrap();
        assert_eq!(text, *expected);
        assert_eq!(crate::from_str(&text).unwrap(), *value);
    }
}
