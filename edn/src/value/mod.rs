//! The Value enum, a dynamically typed way of representing any valid EDN value.
//!
//! # Constructing values
//!
//! A string of EDN data can be parsed into an `edn::Value` by the
//! [`edn::from_str`][from_str] function. There is also
//! [`from_slice`][from_slice] for parsing from a byte slice `&[u8]` and
//! [`from_reader`][from_reader] for parsing from any `io::Read` like a File or
//! a TCP stream.
//!
//! Values can also be built directly, using the constructor functions and
//! `From` conversions:
//!
//! ```
//! use edn::{Name, Value};
//!
//! let point = Value::map(vec![
//!     (Value::keyword("x"), Value::from(1)),
//!     (Value::keyword("y"), Value::from(2.5)),
//! ]);
//! let tagged = Value::tagged(Name::namespaced("geo", "point"), point.clone());
//!
//! assert_eq!(point["y"], Value::from(2.5));
//! assert_eq!(tagged.to_string().len(), "#geo/point {:x 1, :y 2.5}".len());
//! ```
//!
//! # Equality and hashing
//!
//! Values compare structurally: two values are equal if they are the same
//! variant and their payloads are equal. Lists and vectors compare element by
//! element, maps and sets compare as unordered collections. A list is never
//! equal to a vector, and a keyword is never equal to a symbol of the same
//! name. The `Hash` implementation agrees with this at every nesting depth,
//! which allows values to be used as map keys and set members.
//!
//! Floating point values follow IEEE semantics: `0.0 == -0.0`, and `NaN` is
//! not equal to itself. The latter makes `Value` violate the reflexivity
//! required by `Eq` for values containing `NaN`; avoid using those as keys.
//!
//! [from_str]: ../fn.from_str.html
//! [from_slice]: ../fn.from_slice.html
//! [from_reader]: ../fn.from_reader.html

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::io;
use std::mem;
use std::str;

pub use self::from::TypeError;
pub use self::index::Index;

/// A map from values to values.
pub type Map = HashMap<Value, Value>;

/// A set of values.
pub type Set = HashSet<Value>;

/// Represents an EDN value.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// The `nil` value.
    Nil,

    /// A boolean, written `true` or `false`.
    Bool(bool),

    /// A single Unicode code point, written as `\c` or `\newline`.
    Char(char),

    /// A string.
    String(Box<str>),

    /// A keyword, written with a leading colon, e.g. `:name` or
    /// `:person/name`.
    Keyword(Name),

    /// A symbol, e.g. `foo` or `clojure.core/map`.
    Symbol(Name),

    /// A 64-bit signed integer.
    Integer(i64),

    /// A 64-bit floating point number.
    Float(f64),

    /// A list, written `(1 2 3)`.
    List(Vec<Value>),

    /// A vector, written `[1 2 3]`.
    Vector(Vec<Value>),

    /// A map, written `{:a 1 :b 2}`.
    Map(Map),

    /// A set, written `#{1 2 3}`.
    Set(Set),

    /// A tagged literal, written `#tag value`. The tag is not interpreted.
    Tagged(Tagged),

    /// A value read after `#_`.
    ///
    /// The parser never returns this variant; it exists so that the
    /// discarded value can be fully read, and so that printed output can
    /// contain discarded forms.
    Discard(Box<Value>),
}

/// The name of a keyword, symbol or tag: a name with an optional namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    namespace: Option<Box<str>>,
    name: Box<str>,
}

impl Name {
    /// Construct a name without namespace.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Name {
            namespace: None,
            name: name.into(),
        }
    }

    /// Construct a name qualified by a namespace.
    ///
    /// ```
    /// # use edn::Name;
    /// let name = Name::namespaced("person", "age");
    /// assert_eq!(name.namespace(), Some("person"));
    /// assert_eq!(name.name(), "age");
    /// assert_eq!(name.to_string(), "person/age");
    /// ```
    pub fn namespaced(namespace: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
        Name {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// The namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The name without namespace.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}/{}", namespace, self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name::new(name)
    }
}

/// A tagged literal: a tag attached to a value, its representation.
///
/// Tags are preserved as read; attaching meaning to a tag, e.g. turning
/// `#inst "1985-04-12T23:20:50.52Z"` into a timestamp, is up to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tagged {
    tag: Name,
    value: Box<Value>,
}

impl Tagged {
    /// Attach `tag` to `value`.
    pub fn new(tag: impl Into<Name>, value: impl Into<Value>) -> Self {
        Tagged {
            tag: tag.into(),
            value: Box::new(value.into()),
        }
    }

    /// The tag.
    pub fn tag(&self) -> &Name {
        &self.tag
    }

    /// The tagged value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take the tagged value, dropping the tag.
    pub fn into_value(self) -> Value {
        *self.value
    }
}

/// The variants of [`Value`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    Nil,
    Bool,
    Char,
    String,
    Keyword,
    Symbol,
    Integer,
    Float,
    List,
    Vector,
    Map,
    Set,
    Tagged,
    Discard,
}

impl Kind {
    /// A lowercase, human readable name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "boolean",
            Kind::Char => "character",
            Kind::String => "string",
            Kind::Keyword => "keyword",
            Kind::Symbol => "symbol",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::List => "list",
            Kind::Vector => "vector",
            Kind::Map => "map",
            Kind::Set => "set",
            Kind::Tagged => "tagged literal",
            Kind::Discard => "discard",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Construct a keyword.
    ///
    /// ```
    /// # use edn::{Name, Value};
    /// let value = Value::keyword("foo");
    /// assert!(value.is_keyword());
    /// assert_eq!(value.as_keyword(), Some(&Name::new("foo")));
    /// ```
    pub fn keyword(name: impl Into<Name>) -> Self {
        Value::Keyword(name.into())
    }

    /// Construct a symbol.
    pub fn symbol(name: impl Into<Name>) -> Self {
        Value::Symbol(name.into())
    }

    /// Construct a string.
    pub fn string(s: impl Into<Box<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a list value from elements convertible into `Value`.
    ///
    /// ```
    /// # use edn::Value;
    /// assert_eq!(Value::list(vec![1, 2, 3]), edn::from_str("(1 2 3)").unwrap());
    /// ```
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(elements.into_iter().map(Into::into).collect())
    }

    /// Create a vector value from elements convertible into `Value`.
    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Vector(elements.into_iter().map(Into::into).collect())
    }

    /// Create a map value from key-value pairs. Of several pairs with equal
    /// keys, the last one wins.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create a set value. Duplicates are dropped.
    pub fn set<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Set(elements.into_iter().map(Into::into).collect())
    }

    /// Create a tagged literal.
    pub fn tagged(tag: impl Into<Name>, value: impl Into<Value>) -> Self {
        Value::Tagged(Tagged::new(tag, value))
    }

    /// The variant of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::String(_) => Kind::String,
            Value::Keyword(_) => Kind::Keyword,
            Value::Symbol(_) => Kind::Symbol,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::List(_) => Kind::List,
            Value::Vector(_) => Kind::Vector,
            Value::Map(_) => Kind::Map,
            Value::Set(_) => Kind::Set,
            Value::Tagged(_) => Kind::Tagged,
            Value::Discard(_) => Kind::Discard,
        }
    }

    /// Returns true if the value is `nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns true if the value is a boolean.
    pub fn is_bool(&self) -> bool {
        self.as_bool().is_some()
    }

    /// If the value is a boolean, returns it. Returns `None` otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true if the value is a character.
    pub fn is_char(&self) -> bool {
        self.as_char().is_some()
    }

    /// If the value is a character, returns it. Returns `None` otherwise.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true if the value is a string.
    ///
    /// For any value on which `is_string` returns true, `as_str` is guaranteed
    /// to return the string slice.
    ///
    /// ```
    /// # use edn::Value;
    /// let v = edn::from_str(r#"{:a "some string" :b false}"#).unwrap();
    ///
    /// assert!(v["a"].is_string());
    ///
    /// // The boolean `false` is not a string.
    /// assert!(!v["b"].is_string());
    /// ```
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// If the value is a string, returns the associated str. Returns `None`
    /// otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the value is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.as_keyword().is_some()
    }

    /// If the value is a keyword, returns its name. Returns `None` otherwise.
    pub fn as_keyword(&self) -> Option<&Name> {
        match self {
            Value::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the value is a symbol.
    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    /// If the value is a symbol, returns its name. Returns `None` otherwise.
    pub fn as_symbol(&self) -> Option<&Name> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the value is an integer.
    pub fn is_integer(&self) -> bool {
        self.as_i64().is_some()
    }

    /// If the value is an integer, returns it. Returns `None` otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the value is a floating point number.
    pub fn is_float(&self) -> bool {
        self.as_f64().is_some()
    }

    /// If the value is a floating point number, returns it. Returns `None`
    /// otherwise; integers are not converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the value is a list.
    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    /// If the value is a list, returns its elements. Returns `None` otherwise.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns true if the value is a vector.
    pub fn is_vector(&self) -> bool {
        self.as_vector().is_some()
    }

    /// If the value is a vector, returns its elements. Returns `None`
    /// otherwise.
    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(elements) => Some(elements),
            _ => None,
        }
    }

    /// If the value is a list or a vector, returns its elements. Returns
    /// `None` otherwise.
    ///
    /// ```
    /// # use edn::Value;
    /// let v = edn::from_str("[(1 2) [3 4] #{5}]").unwrap();
    /// assert_eq!(v[0].as_slice().map(|s| s.len()), Some(2));
    /// assert_eq!(v[1].as_slice().map(|s| s.len()), Some(2));
    /// assert_eq!(v[2].as_slice(), None);
    /// ```
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(elements) | Value::Vector(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns true if the value is a map.
    pub fn is_map(&self) -> bool {
        self.as_map().is_some()
    }

    /// If the value is a map, returns it. Returns `None` otherwise.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true if the value is a set.
    pub fn is_set(&self) -> bool {
        self.as_set().is_some()
    }

    /// If the value is a set, returns it. Returns `None` otherwise.
    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns true if the value is a tagged literal.
    pub fn is_tagged(&self) -> bool {
        self.as_tagged().is_some()
    }

    /// If the value is a tagged literal, returns it. Returns `None` otherwise.
    pub fn as_tagged(&self) -> Option<&Tagged> {
        match self {
            Value::Tagged(tagged) => Some(tagged),
            _ => None,
        }
    }

    /// Returns true if the value is a discarded value.
    pub fn is_discard(&self) -> bool {
        matches!(self, Value::Discard(_))
    }

    /// Index into a list, vector or map. A string or `Value` can be used to
    /// access a value in a map, and a `usize` index can be used to access an
    /// element of a list or vector.
    ///
    /// Returns `None` if the type of `self` does not match the type of the
    /// index, for example if the index is a string and `self` is a vector or
    /// a number. Also returns `None` if the given key does not exist in the
    /// map or the given index is not within the bounds of the list or vector.
    ///
    /// ```
    /// # use edn::Value;
    /// let data = edn::from_str(r#"{:x [:y :z] "str" 1}"#).unwrap();
    /// assert_eq!(data.get("x").and_then(|x| x.get(1)), Some(&Value::keyword("z")));
    /// assert_eq!(data.get("str"), Some(&Value::from(1)));
    /// assert_eq!(data.get("w"), None);
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::String(s) => s.hash(state),
            Value::Keyword(name) | Value::Symbol(name) => name.hash(state),
            Value::Integer(n) => n.hash(state),
            Value::Float(n) => float_bits(*n).hash(state),
            Value::List(elements) | Value::Vector(elements) => elements.hash(state),
            Value::Map(map) => {
                state.write_usize(map.len());
                state.write_u64(unordered_hash(map.iter()));
            }
            Value::Set(set) => {
                state.write_usize(set.len());
                state.write_u64(unordered_hash(set.iter()));
            }
            Value::Tagged(tagged) => tagged.hash(state),
            Value::Discard(value) => value.hash(state),
        }
    }
}

// `0.0 == -0.0`, so both need the same hash.
fn float_bits(n: f64) -> u64 {
    if n == 0.0 {
        0
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

// Combines element hashes with a commutative operation, so that the result
// does not depend on iteration order.
fn unordered_hash<I>(elements: I) -> u64
where
    I: Iterator,
    I::Item: Hash,
{
    elements.fold(0, |acc: u64, element| {
        let mut hasher = DefaultHasher::new();
        element.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl Display for Value {
    /// Display an EDN value as a string.
    ///
    /// ```
    /// # use edn::Value;
    /// let value = Value::list(vec![Value::symbol("+"), 1.into(), 2.5.into()]);
    /// assert_eq!(value.to_string(), "(+ 1 2.5)");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct WriterFormatter<'a, 'b: 'a> {
            inner: &'a mut fmt::Formatter<'b>,
        }

        impl<'a, 'b> io::Write for WriterFormatter<'a, 'b> {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                let s = str::from_utf8(buf)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                self.inner
                    .write_str(s)
                    .map_err(|_| io::Error::new(io::ErrorKind::Other, "fmt error"))?;
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut wr = WriterFormatter { inner: f };
        crate::print::to_writer(&mut wr, self).map_err(|_| fmt::Error)
    }
}

mod from;
mod index;

#[cfg(test)]
mod tests;
