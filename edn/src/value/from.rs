use std::borrow::Cow;
use std::convert::TryFrom;
use std::error;
use std::fmt::{self, Display};

use super::{Kind, Map, Name, Set, Tagged, Value};

macro_rules! impl_from_integer {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(n: $ty) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, i8, i16, i32, i64);

impl From<f32> for Value {
    #[inline]
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    #[inline]
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        Value::from(s.as_ref())
    }
}

impl From<Box<str>> for Value {
    #[inline]
    fn from(s: Box<str>) -> Self {
        Value::String(s)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Value::String(s.into_boxed_str())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    /// Converts into a vector, not a list.
    fn from(elements: Vec<T>) -> Self {
        Value::vector(elements)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `nil`.
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Value::Set(set)
    }
}

impl From<Tagged> for Value {
    fn from(tagged: Tagged) -> Self {
        Value::Tagged(tagged)
    }
}

/// Error returned when converting a [`Value`] to a type that does not match
/// its variant.
///
/// ```
/// # use std::convert::TryFrom;
/// # use edn::Value;
/// let value = Value::from("text");
/// assert_eq!(<&str>::try_from(&value).unwrap(), "text");
///
/// let err = i64::try_from(&value).unwrap_err();
/// assert_eq!(err.to_string(), "expected integer, found string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeError {
    expected: &'static str,
    found: Kind,
}

impl TypeError {
    fn new(expected: &'static str, value: &Value) -> Self {
        TypeError {
            expected,
            found: value.kind(),
        }
    }

    /// Description of the expected variant(s).
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// The variant that was found instead.
    pub fn found(&self) -> Kind {
        self.found
    }
}

impl Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl error::Error for TypeError {}

macro_rules! impl_try_from {
    (
        $($ty:ty => $expected:expr, $method:ident);* $(;)?
    ) => {
        $(
            impl TryFrom<&Value> for $ty {
                type Error = TypeError;

                fn try_from(value: &Value) -> Result<Self, TypeError> {
                    value.$method().ok_or_else(|| TypeError::new($expected, value))
                }
            }
        )*
    };
}

macro_rules! impl_try_from_ref {
    (
        $($ty:ty => $expected:expr, $method:ident);* $(;)?
    ) => {
        $(
            impl<'a> TryFrom<&'a Value> for &'a $ty {
                type Error = TypeError;

                fn try_from(value: &'a Value) -> Result<Self, TypeError> {
                    value.$method().ok_or_else(|| TypeError::new($expected, value))
                }
            }
        )*
    };
}

impl_try_from! {
    bool => "boolean", as_bool;
    char => "character", as_char;
    i64 => "integer", as_i64;
    f64 => "float", as_f64;
}

impl_try_from_ref! {
    str => "string", as_str;
    [Value] => "list or vector", as_slice;
    Map => "map", as_map;
    Set => "set", as_set;
    Tagged => "tagged literal", as_tagged;
}

impl<'a> TryFrom<&'a Value> for &'a Name {
    type Error = TypeError;

    /// Accepts both keywords and symbols.
    fn try_from(value: &'a Value) -> Result<Self, TypeError> {
        match value {
            Value::Keyword(name) | Value::Symbol(name) => Ok(name),
            _ => Err(TypeError::new("keyword or symbol", value)),
        }
    }
}
