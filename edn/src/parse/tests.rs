use super::*;
use crate::parse::error::Category;
use crate::Value;

use std::io::Cursor;

fn error_location(s: &str) -> (usize, usize) {
    let location = from_str(s).unwrap_err().location().unwrap();
    (location.line(), location.column())
}

#[test]
fn test_atoms() {
    let mut parser = Parser::from_str("nil true, false 100 -42 4.5 foo-symbol :kw \\x");
    for value in vec![
        Value::Nil,
        Value::from(true),
        Value::from(false),
        Value::from(100),
        Value::from(-42),
        Value::from(4.5),
        Value::symbol("foo-symbol"),
        Value::keyword("kw"),
        Value::from('x'),
    ] {
        assert_eq!(parser.parse().unwrap(), Some(value));
    }
    assert_eq!(parser.parse().unwrap(), None);
    parser.end().unwrap();
}

#[test]
fn test_fixed_words_need_terminator() {
    assert_eq!(from_str("niladic").unwrap(), Value::symbol("niladic"));
    assert_eq!(from_str("truest").unwrap(), Value::symbol("truest"));
    assert_eq!(from_str("falsey").unwrap(), Value::symbol("falsey"));
    assert_eq!(from_str("ni").unwrap(), Value::symbol("ni"));
    assert_eq!(from_str("nil;comment").unwrap(), Value::Nil);
    assert_eq!(
        from_str("(nil)").unwrap(),
        Value::list(vec![Value::Nil])
    );
    assert_eq!(
        from_str("[true\"s\"]").unwrap(),
        Value::vector(vec![Value::from(true), Value::from("s")])
    );
}

#[test]
fn test_integers() {
    for (input, expected) in &[
        ("0", 0),
        ("-0", 0),
        ("+5", 5),
        ("1234567890", 1_234_567_890),
        ("9223372036854775807", i64::MAX),
        ("-9223372036854775808", i64::MIN),
    ] {
        assert_eq!(from_str(input).unwrap(), Value::from(*expected), "{}", input);
    }
}

#[test]
fn test_integer_overflow() {
    for input in &["9223372036854775808", "-9223372036854775809", "[1 99999999999999999999]"] {
        let err = from_str(input).unwrap_err();
        assert!(err.is_integer_overflow(), "{}: {}", input, err);
        assert_eq!(err.classify(), Category::IntegerOverflow);
    }
}

#[test]
fn test_floats() {
    for (input, expected) in &[
        ("1.5", 1.5),
        ("-0.25", -0.25),
        ("1.", 1.0),
        ("1e3", 1000.0),
        ("2E-2", 0.02),
        ("+1.5e+1", 15.0),
        ("0.0", 0.0),
    ] {
        assert_eq!(from_str(input).unwrap(), Value::from(*expected), "{}", input);
    }
    assert!(from_str("1e400").unwrap_err().is_syntax());
}

#[test]
fn test_invalid_numbers() {
    for input in &["007", "1e", "1.5.5", "-1a", "12abc", "1/", "1/-2", "1.5N", "0x10"] {
        let err = from_str(input).unwrap_err();
        assert!(err.is_syntax(), "{}: {}", input, err);
    }
}

#[test]
fn test_ratios() {
    assert!(from_str("1/2").unwrap_err().is_syntax());

    let options = Options::new().with_ratios(Ratios::Float);
    assert_eq!(from_str_custom("1/4", options.clone()).unwrap(), Value::from(0.25));
    assert_eq!(from_str_custom("-3/2", options.clone()).unwrap(), Value::from(-1.5));
    assert!(from_str_custom("1/0", options.clone()).is_err());
    assert!(from_str_custom("99999999999999999999/2", options)
        .unwrap_err()
        .is_integer_overflow());

    assert_eq!(
        from_str("99999999999999999999/2").unwrap_err().to_string(),
        "unsupported ratio at line 1 column 1"
    );
    assert_eq!(
        from_str("99999999999999999999/00").unwrap_err().to_string(),
        "ratio with zero denominator at line 1 column 1"
    );
}

#[test]
fn test_precision_suffixes() {
    assert!(from_str("42N").is_err());
    assert!(from_str("1.5M").is_err());

    let options = Options::new().with_precision_suffixes(PrecisionSuffixes::Lossy);
    assert_eq!(from_str_custom("42N", options.clone()).unwrap(), Value::from(42));
    assert_eq!(from_str_custom("1.5M", options.clone()).unwrap(), Value::from(1.5));
    assert_eq!(from_str_custom("7M", options.clone()).unwrap(), Value::from(7.0));
    assert!(from_str_custom("99999999999999999999N", options)
        .unwrap_err()
        .is_integer_overflow());
}

#[test]
fn test_symbols() {
    assert_eq!(
        from_str("foo/bar").unwrap(),
        Value::symbol(Name::namespaced("foo", "bar"))
    );
    assert_eq!(from_str("/").unwrap(), Value::symbol("/"));
    assert_eq!(
        from_str("clojure.core//").unwrap(),
        Value::symbol(Name::namespaced("clojure.core", "/"))
    );
    for name in &["+", "-", "-foo", "+bar", ".baz", "<=>", "a:b", "a#", "*ok?*", "λ"] {
        assert_eq!(from_str(name).unwrap(), Value::symbol(*name), "{}", name);
    }
    for input in &["foo/", "/foo", "a/b/c", ".5"] {
        assert!(from_str(input).unwrap_err().is_syntax(), "{}", input);
    }
}

#[test]
fn test_keywords() {
    assert_eq!(from_str(":a").unwrap(), Value::keyword("a"));
    assert_eq!(
        from_str(":ns.sub/a-b").unwrap(),
        Value::keyword(Name::namespaced("ns.sub", "a-b"))
    );
    for input in &[":", "::a", ":1", ":a/"] {
        assert!(from_str(input).unwrap_err().is_syntax(), "{}", input);
    }
}

#[test]
fn test_strings() {
    assert_eq!(from_str(r#""a\tb""#).unwrap(), Value::from("a\tb"));
    assert_eq!(
        from_str(r#""\r\n\\\"""#).unwrap(),
        Value::from("\r\n\\\"")
    );
    assert_eq!(from_str("\"multi\nline\"").unwrap(), Value::from("multi\nline"));
    assert_eq!(from_str(r#""""#).unwrap(), Value::from(""));
    assert!(from_str(r#""\q""#).unwrap_err().is_syntax());
    assert!(from_str(r#""open"#).unwrap_err().is_eof());
}

#[test]
fn test_chars() {
    for (input, expected) in &[
        ("\\a", 'a'),
        ("'a", 'a'),
        ("\\λ", 'λ'),
        ("\\(", '('),
        ("\\newline", '\n'),
        ("\\return", '\r'),
        ("'space", ' '),
        ("\\tab", '\t'),
        ("\\backspace", '\u{08}'),
        ("\\formfeed", '\u{0c}'),
        ("\\u03bb", 'λ'),
        ("\\u0041", 'A'),
    ] {
        assert_eq!(from_str(input).unwrap(), Value::from(*expected), "{}", input);
    }
    assert_eq!(
        from_str("[\\a\\b]").unwrap_err().classify(),
        Category::Syntax
    );
    assert_eq!(
        from_str("(\\a \\b)").unwrap(),
        Value::list(vec!['a', 'b'])
    );
    for input in &[
        "\\abc",
        "\\ud800",
        "\\u004",
        "\\u00411",
        "\\u+12a",
        "'u+041",
        "\\u-041",
    ] {
        assert!(from_str(input).unwrap_err().is_syntax(), "{}", input);
    }
    assert!(from_str("\\").unwrap_err().is_eof());
}

#[test]
fn test_lists_and_vectors() {
    assert_eq!(
        from_str("(1 2 3)").unwrap(),
        Value::list(vec![1, 2, 3])
    );
    assert_eq!(from_str("()").unwrap(), Value::list(Vec::<Value>::new()));
    assert_eq!(
        from_str("[a [b] (c)]").unwrap(),
        Value::vector(vec![
            Value::symbol("a"),
            Value::vector(vec![Value::symbol("b")]),
            Value::list(vec![Value::symbol("c")]),
        ])
    );
    assert_eq!(from_str("[,1,,2,]").unwrap(), Value::vector(vec![1, 2]));
}

#[test]
fn test_broken_collections() {
    for input in &["(1 2", "[", "{:a 1", "#{1", "(1 [2)]", "]", "(1 2]"] {
        let err = from_str(input).unwrap_err();
        assert!(err.is_syntax(), "{}: {}", input, err);
    }
    assert!(from_str("(1 2").unwrap_err().is_eof());
    assert!(!from_str("(1 2]").unwrap_err().is_eof());
}

#[test]
fn test_maps() {
    let map = from_str("{:a 1 :a 2}").unwrap();
    assert_eq!(map.as_map().map(Map::len), Some(1));
    assert_eq!(map["a"], Value::from(2));

    let map = from_str("{[1 2] \"vec\" (1 2) \"list\", nil nil}").unwrap();
    assert_eq!(map.as_map().map(Map::len), Some(3));
    assert_eq!(map[&Value::list(vec![1, 2])], Value::from("list"));
    assert_eq!(map.get(&Value::Nil), Some(&Value::Nil));

    assert!(from_str("{:a}").unwrap_err().is_syntax());
    assert_eq!(from_str("{}").unwrap(), Value::map(Vec::<(Value, Value)>::new()));
}

#[test]
fn test_sets() {
    let set = from_str("#{1 2 1 (1) [1]}").unwrap();
    assert_eq!(set.as_set().map(Set::len), Some(4));
    assert_eq!(set, Value::set(vec![
        Value::from(1),
        Value::from(2),
        Value::list(vec![1]),
        Value::vector(vec![1]),
    ]));
}

#[test]
fn test_discard() {
    let mut parser = Parser::from_str("#_42 7");
    assert_eq!(parser.parse().unwrap(), Some(Value::from(7)));
    assert_eq!(parser.parse().unwrap(), None);

    assert_eq!(from_str("[1 #_2]").unwrap(), Value::vector(vec![1]));
    assert_eq!(
        from_str("[1 #_ #_ 2 3 4]").unwrap(),
        Value::vector(vec![1, 4])
    );
    assert_eq!(from_str("{:a #_:b 1}").unwrap()["a"], Value::from(1));
    assert_eq!(from_str("#_(nested [stuff]) :kept").unwrap(), Value::keyword("kept"));
    assert_eq!(from_str("1 #_2").unwrap(), Value::from(1));

    assert!(from_str("#_").unwrap_err().is_eof());
    assert_eq!(Parser::from_str("#_ 1").parse().unwrap(), None);
}

#[test]
fn test_tagged() {
    assert_eq!(
        from_str("#inst \"1985-04-12T23:20:50.52Z\"").unwrap(),
        Value::tagged("inst", "1985-04-12T23:20:50.52Z")
    );
    assert_eq!(
        from_str("#my/point [1 2]").unwrap(),
        Value::tagged(Name::namespaced("my", "point"), Value::vector(vec![1, 2]))
    );
    assert_eq!(
        from_str("#outer #inner 1").unwrap(),
        Value::tagged("outer", Value::tagged("inner", 1))
    );
    assert_eq!(
        from_str("#t #_ skipped value").unwrap(),
        Value::tagged("t", Value::symbol("value"))
    );
    assert!(from_str("#a/ 1").unwrap_err().is_syntax());
    assert!(from_str("#tag").unwrap_err().is_eof());
}

#[test]
fn test_dispatch_failures() {
    for input in &["#1", "#:a", "##Foo", "#", "#(1)"] {
        assert!(from_str(input).is_err(), "{}", input);
    }
}

#[test]
fn test_symbolic_floats() {
    assert_eq!(from_str("##Inf").unwrap(), Value::from(f64::INFINITY));
    assert_eq!(from_str("##-Inf").unwrap(), Value::from(f64::NEG_INFINITY));
    assert!(from_str("##NaN").unwrap().as_f64().map_or(false, f64::is_nan));
    assert_eq!(
        from_str("[##Inf]").unwrap(),
        Value::vector(vec![f64::INFINITY])
    );
}

#[test]
fn test_comments_and_whitespace() {
    let mut parser = Parser::from_str("; leading\n 42 ; trailing\n,,\t\r\n;last");
    assert_eq!(parser.parse().unwrap(), Some(Value::from(42)));
    assert_eq!(parser.parse().unwrap(), None);
    assert_eq!(
        from_str("(1 ; one\n 2)").unwrap(),
        Value::list(vec![1, 2])
    );
}

#[test]
fn test_end_of_input() {
    let mut parser = Parser::from_str("   ");
    assert_eq!(parser.parse().unwrap(), None);
    assert_eq!(parser.parse().unwrap(), None);
    assert!(parser.expect_value().unwrap_err().is_eof());
    assert!(from_str("").unwrap_err().is_eof());
}

#[test]
fn test_trailing_characters() {
    let err = from_str("1 2").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(error_location("1 2"), (1, 3));
}

#[test]
fn test_error_locations() {
    assert_eq!(error_location("(1 2"), (1, 4));
    assert_eq!(error_location("[1 2)"), (1, 5));
    assert_eq!(error_location("\"a\\qb\""), (1, 4));
    assert_eq!(error_location(")"), (1, 1));
    assert_eq!(error_location("[1\n 2\n @oops]"), (3, 2));
    assert_eq!(error_location("[1\n 2\n \"unterminated").0, 3);
    assert_eq!(error_location(":a/b/c"), (1, 1));
    assert_eq!(error_location("[1 :a/b/c]"), (1, 4));
    assert_eq!(error_location("(\\abc)"), (1, 2));
    assert_eq!(error_location("(1 2x)"), (1, 4));
    assert_eq!(error_location("[99999999999999999999]"), (1, 2));
    assert_eq!(error_location("\n  1.5M"), (2, 3));

    let mut parser = Parser::from_str("foo\n  @bar");
    assert_eq!(parser.parse().unwrap(), Some(Value::symbol("foo")));
    let err = parser.parse().unwrap_err();
    assert_eq!(err.location().map(|l| (l.line(), l.column())), Some((2, 3)));
    assert_eq!(err.to_string(), "unable to recognize EDN at line 2 column 3");
}

#[test]
fn test_decode_errors() {
    let err = from_slice(b"[1 \xff]").unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.classify(), Category::Decode);
    assert_eq!(err.byte_offset(), Some(3));

    let err = from_reader(Cursor::new(b"\"ab\xe2\x82\"".to_vec())).unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.byte_offset(), Some(3));
    assert_eq!(
        std::io::Error::from(err).kind(),
        std::io::ErrorKind::InvalidData
    );
}

#[test]
fn test_recursion_limit() {
    let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(from_str(&nested(128)).is_ok());
    let err = from_str(&nested(129)).unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(
        err.to_string(),
        "recursion limit exceeded at line 1 column 129"
    );

    let options = Options::new().with_recursion_limit(1);
    assert!(from_str_custom("#t [1]", options.clone()).is_err());
    assert!(from_str_custom("#t 1", options).is_ok());
}

#[test]
fn test_options() {
    let options = Options::default();
    assert_eq!(options.ratios(), Ratios::Reject);
    assert_eq!(options.precision_suffixes(), PrecisionSuffixes::Reject);
    assert_eq!(options.recursion_limit(), 128);

    let options = options
        .with_ratios(Ratios::Float)
        .with_precision_suffixes(PrecisionSuffixes::Lossy)
        .with_recursion_limit(3);
    let parser = Parser::from_str_custom("", options);
    assert_eq!(parser.options().ratios(), Ratios::Float);
    assert_eq!(parser.options().recursion_limit(), 3);
}

#[test]
fn test_sources_agree() {
    let input = "{:name \"λ\" :items [1 2.5 #{x}] :tag #my/t (a b)}";
    let from_string = from_str(input).unwrap();
    assert_eq!(from_slice(input.as_bytes()).unwrap(), from_string);
    assert_eq!(from_reader(Cursor::new(input.as_bytes())).unwrap(), from_string);
}

#[test]
fn test_value_iter() {
    let mut parser = Parser::from_reader(Cursor::new(b"1 [2] #_3 :four".to_vec()));
    let values: Vec<Value> = parser.value_iter().collect::<Result<_>>().unwrap();
    assert_eq!(
        values,
        vec![Value::from(1), Value::vector(vec![2]), Value::keyword("four")]
    );

    let mut parser = Parser::from_str("1 (2");
    let results: Vec<Result<Value>> = parser.value_iter().collect();
    assert_eq!(results.len(), 2);
    assert!(results[1].is_err());
}
