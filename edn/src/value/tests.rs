use std::collections::hash_map::DefaultHasher;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

use super::*;

type Predicate = fn(&Value) -> bool;

// Type predicates for disjoint types
static TYPE_PREDICATES: &[(&str, Predicate)] = &[
    ("nil", Value::is_nil),
    ("bool", Value::is_bool),
    ("char", Value::is_char),
    ("string", Value::is_string),
    ("keyword", Value::is_keyword),
    ("symbol", Value::is_symbol),
    ("integer", Value::is_integer),
    ("float", Value::is_float),
    ("list", Value::is_list),
    ("vector", Value::is_vector),
    ("map", Value::is_map),
    ("set", Value::is_set),
    ("tagged", Value::is_tagged),
    ("discard", Value::is_discard),
];

fn check_type_predicates(value: &Value, type_name: &str) {
    let predicate = TYPE_PREDICATES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, p)| p)
        .unwrap();
    assert!(
        predicate(value),
        "{} type predicate returned false: {:?}",
        type_name,
        value
    );
    for (name, predicate) in TYPE_PREDICATES
        .iter()
        .filter(|(name, _)| *name != type_name)
    {
        assert!(
            !predicate(value),
            "{} type predicate returned true for {}: {:?}",
            name,
            type_name,
            value
        );
    }
}

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_type_predicates() {
    check_type_predicates(&Value::Nil, "nil");
    check_type_predicates(&Value::from(true), "bool");
    check_type_predicates(&Value::from('x'), "char");
    check_type_predicates(&Value::from("hello"), "string");
    check_type_predicates(&Value::keyword("k"), "keyword");
    check_type_predicates(&Value::symbol("s"), "symbol");
    check_type_predicates(&Value::from(1), "integer");
    check_type_predicates(&Value::from(1.5), "float");
    check_type_predicates(&Value::list(vec![1]), "list");
    check_type_predicates(&Value::vector(vec![1]), "vector");
    check_type_predicates(&Value::map(vec![(1, 2)]), "map");
    check_type_predicates(&Value::set(vec![1]), "set");
    check_type_predicates(&Value::tagged("inst", "2020"), "tagged");
    check_type_predicates(&Value::Discard(Box::new(Value::Nil)), "discard");
}

#[test]
fn test_keyword_is_not_symbol() {
    assert_ne!(Value::keyword("a"), Value::symbol("a"));
    assert_ne!(
        Value::keyword(Name::namespaced("ns", "a")),
        Value::keyword("a")
    );
    assert_eq!(
        Value::symbol(Name::namespaced("ns", "a")),
        Value::symbol(Name::namespaced("ns", "a"))
    );
}

#[test]
fn test_list_is_not_vector() {
    assert_ne!(Value::list(vec![1, 2]), Value::vector(vec![1, 2]));
    assert_ne!(Value::list(vec![1, 2]), Value::list(vec![2, 1]));
    assert_ne!(Value::from(1), Value::from(1.0));
}

#[test]
fn test_unordered_equality_and_hash() {
    let a = Value::map(vec![(Value::keyword("a"), 1), (Value::keyword("b"), 2)]);
    let b = Value::map(vec![(Value::keyword("b"), 2), (Value::keyword("a"), 1)]);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let a = Value::set((0..50).map(Value::from));
    let b = Value::set((0..50).rev().map(Value::from));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let nested_a = Value::set(vec![a.clone(), Value::list(vec![a])]);
    let nested_b = Value::set(vec![Value::list(vec![b.clone()]), b]);
    assert_eq!(nested_a, nested_b);
    assert_eq!(hash_of(&nested_a), hash_of(&nested_b));
}

#[test]
fn test_float_zero_hash() {
    assert_eq!(Value::from(0.0), Value::from(-0.0));
    assert_eq!(hash_of(&Value::from(0.0)), hash_of(&Value::from(-0.0)));
    assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
}

#[test]
fn test_values_as_keys() {
    let mut map = Map::new();
    map.insert(Value::vector(vec![1, 2]), Value::from("vec"));
    map.insert(Value::list(vec![1, 2]), Value::from("list"));
    map.insert(Value::vector(vec![1, 2]), Value::from("vec again"));
    assert_eq!(map.len(), 2);
    assert_eq!(map[&Value::vector(vec![1, 2])], Value::from("vec again"));
}

#[test]
fn test_soft_accessors() {
    let v = Value::from(42);
    assert_eq!(v.as_i64(), Some(42));
    assert_eq!(v.as_f64(), None);
    assert_eq!(v.as_str(), None);
    assert_eq!(v.as_map(), None);
    assert_eq!(Value::from("x").as_str(), Some("x"));
    assert_eq!(Value::keyword("x").as_keyword().map(Name::name), Some("x"));
    assert_eq!(Value::keyword("x").as_symbol(), None);
}

#[test]
fn test_loud_accessors() {
    let v = Value::from("text");
    let err = i64::try_from(&v).unwrap_err();
    assert_eq!(err.expected(), "integer");
    assert_eq!(err.found(), Kind::String);

    assert_eq!(bool::try_from(&Value::from(false)), Ok(false));
    assert_eq!(<&str>::try_from(&v), Ok("text"));
    assert!(<&Map>::try_from(&v).is_err());

    let list = Value::list(vec![1, 2]);
    assert_eq!(<&[Value]>::try_from(&list).map(<[Value]>::len), Ok(2));

    let sym = Value::symbol(Name::namespaced("a", "b"));
    assert_eq!(<&Name>::try_from(&sym).map(Name::namespace), Ok(Some("a")));
    assert_eq!(
        <&Name>::try_from(&Value::Nil).unwrap_err().to_string(),
        "expected keyword or symbol, found nil"
    );
}

#[test]
fn test_index() {
    let v = Value::map(vec![
        (Value::keyword("items"), Value::vector(vec![10, 20])),
        (Value::from("plain"), Value::from(true)),
        (Value::from(7), Value::from('x')),
    ]);
    assert_eq!(v["items"][1], Value::from(20));
    assert_eq!(v["items"][2], Value::Nil);
    assert_eq!(v["plain"], Value::from(true));
    assert_eq!(v[&Value::from(7)], Value::from('x'));
    assert_eq!(v[0], Value::Nil);
    assert_eq!(v.get("missing"), None);
}

#[test]
fn test_tagged() {
    let t = Tagged::new(Name::namespaced("my", "tag"), Value::vector(vec![1]));
    assert_eq!(t.tag().to_string(), "my/tag");
    assert_eq!(t.value(), &Value::vector(vec![1]));
    assert_eq!(t.clone().into_value(), Value::vector(vec![1]));
    assert_eq!(Value::from(t.clone()), Value::Tagged(t));
}

#[test]
fn test_kind_names() {
    assert_eq!(Value::Nil.kind().name(), "nil");
    assert_eq!(Value::set(Vec::<Value>::new()).kind(), Kind::Set);
    assert_eq!(Kind::Tagged.to_string(), "tagged literal");
}
