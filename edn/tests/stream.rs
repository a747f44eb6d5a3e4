use std::io::{self, Read};

use edn::parse::error::Category;
use edn::{Parser, Value};

/// A reader handing out one byte per call, to exercise decoding across
/// short reads.
struct Trickle<'a> {
    bytes: &'a [u8],
}

impl<'a> Read for Trickle<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.bytes.split_first(), buf.first_mut()) {
            (Some((&b, rest)), Some(slot)) => {
                *slot = b;
                self.bytes = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

fn trickle(s: &str) -> Parser<edn::parse::IoRead<Trickle<'_>>> {
    Parser::from_reader(Trickle {
        bytes: s.as_bytes(),
    })
}

#[test]
fn test_nil_then_end_of_stream() {
    let mut parser = trickle(" nil ");
    assert_eq!(parser.parse().unwrap(), Some(Value::Nil));
    assert_eq!(parser.parse().unwrap(), None);
}

#[test]
fn test_successive_booleans() {
    let mut parser = trickle(" true         false");
    assert_eq!(parser.parse().unwrap(), Some(Value::Bool(true)));
    assert_eq!(parser.parse().unwrap(), Some(Value::Bool(false)));
    assert_eq!(parser.parse().unwrap(), None);
}

#[test]
fn test_string_escape() {
    let mut parser = trickle("\"a\\tb\"");
    assert_eq!(parser.parse().unwrap(), Some(Value::from("a\tb")));
}

#[test]
fn test_list_of_integers() {
    let mut parser = trickle("(1 2 3)");
    let value = parser.parse().unwrap().unwrap();
    assert_eq!(
        value.as_list(),
        Some(&[Value::from(1), Value::from(2), Value::from(3)][..])
    );
}

#[test]
fn test_discard_never_surfaces() {
    let mut parser = trickle("#_42 7");
    assert_eq!(parser.parse().unwrap(), Some(Value::from(7)));
}

#[test]
fn test_duplicate_map_key() {
    let mut parser = trickle("{:a 1 :a 2}");
    let value = parser.parse().unwrap().unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::keyword("a")), Some(&Value::from(2)));
}

#[test]
fn test_unterminated_list() {
    let mut parser = trickle("(1 2");
    let err = parser.parse().unwrap_err();
    assert_eq!(err.classify(), Category::Syntax);
    assert!(err.is_eof());
}

#[test]
fn test_multibyte_across_short_reads() {
    let mut parser = trickle("[\"λx→\" \\😀 :ключ]");
    assert_eq!(
        parser.parse().unwrap(),
        Some(Value::vector(vec![
            Value::from("λx→"),
            Value::from('😀'),
            Value::keyword("ключ"),
        ]))
    );
}

#[test]
fn test_values_of_a_stream() {
    let input = "; config\n{:port 8080}\n[1 2]\n#my/tag nil\n";
    let mut parser = Parser::from_reader(input.as_bytes());
    let values: Vec<Value> = parser.value_iter().map(Result::unwrap).collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["port"], Value::from(8080));
    assert_eq!(values[2].as_tagged().map(|t| t.tag().to_string()), Some("my/tag".into()));
}

#[test]
fn test_io_error_propagates() {
    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    let err = edn::from_reader(Failing).unwrap_err();
    assert!(err.is_io());
    assert_eq!(err.classify(), Category::Io);
    assert_eq!(io::Error::from(err).to_string(), "disk on fire");
}
