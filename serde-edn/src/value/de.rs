use std::collections::hash_map;

use serde::de::{self, Error as _, Visitor};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::{Map, Name, Value};

pub struct Deserializer<'de> {
    input: &'de Value,
}

impl<'de> Deserializer<'de> {
    /// Tagged literals are deserialized as the value they tag.
    pub fn from_value(mut input: &'de Value) -> Self {
        while let Value::Tagged(tagged) = input {
            input = tagged.value();
        }
        Deserializer { input }
    }
}

/// Interpret an `edn::Value` as an instance of type `T`.
///
/// This conversion can fail if the structure of the `Value` does not match the
/// structure expected by `T`, for example if `T` is a struct type but the
/// `Value` contains something other than an EDN map. It can also fail if the
/// structure is correct but `T`'s implementation of `Deserialize` decides that
/// something is wrong with the data, for example required struct fields are
/// missing from the EDN map or some number is too big to fit in the expected
/// primitive type.
///
/// ```
/// # use serde_edn::Value;
/// let val = Value::string("foo");
/// let s: String = serde_edn::from_value(&val).unwrap();
/// assert_eq!("foo", s);
/// ```
pub fn from_value<'a, T>(value: &'a Value) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(&mut Deserializer::from_value(value))
}

macro_rules! deserialize_prim_number {
    ($method:ident) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            match self.input {
                Value::Integer(n) => visitor.visit_i64(*n),
                Value::Float(n) => visitor.visit_f64(*n),
                _ => Err(invalid_value(self.input, "a number")),
            }
        }
    };
}

fn visit_name<'de, V>(name: &'de Name, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    if name.namespace().is_some() {
        visitor.visit_string(name.to_string())
    } else {
        visitor.visit_borrowed_str(name.name())
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.input {
            Value::Nil => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Char(c) => visitor.visit_char(*c),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Keyword(name) | Value::Symbol(name) => visit_name(name, visitor),
            Value::Integer(n) => visitor.visit_i64(*n),
            Value::Float(n) => visitor.visit_f64(*n),
            Value::List(elts) | Value::Vector(elts) => {
                visitor.visit_seq(SeqAccess::new(elts.iter()))
            }
            Value::Set(elts) => visitor.visit_seq(SeqAccess::new(elts.iter())),
            Value::Map(map) => visitor.visit_map(MapAccess::new(map)),
            Value::Tagged(tagged) => {
                let mut inner = Deserializer::from_value(tagged.value());
                de::Deserializer::deserialize_any(&mut inner, visitor)
            }
            Value::Discard(_) => Err(invalid_value(self.input, "a value that is not discarded")),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Bool(b) => visitor.visit_bool(*b),
            _ => Err(invalid_value(self.input, "boolean")),
        }
    }

    deserialize_prim_number!(deserialize_i8);
    deserialize_prim_number!(deserialize_i16);
    deserialize_prim_number!(deserialize_i32);
    deserialize_prim_number!(deserialize_i64);
    deserialize_prim_number!(deserialize_u8);
    deserialize_prim_number!(deserialize_u16);
    deserialize_prim_number!(deserialize_u32);
    deserialize_prim_number!(deserialize_u64);
    deserialize_prim_number!(deserialize_f32);
    deserialize_prim_number!(deserialize_f64);

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Char(c) => visitor.visit_char(*c),
            _ => Err(invalid_value(self.input, "char")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.input
            .as_str()
            .ok_or_else(|| invalid_value(self.input, "a string"))
            .and_then(|s| visitor.visit_borrowed_str(s))
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    /// Bytes are represented as a list or vector of integers.
    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let elements = match self.input {
            Value::List(elts) | Value::Vector(elts) => elts,
            _ => return Err(invalid_value(self.input, "byte vector")),
        };
        let bytes = elements
            .iter()
            .map(|element| match element {
                Value::Integer(n) => u8::try_from(*n).map_err(|_| {
                    Error::invalid_value(de::Unexpected::Signed(*n), &"a byte")
                }),
                other => Err(invalid_value(other, "a byte")),
            })
            .collect::<Result<Vec<u8>>>()?;
        visitor.visit_byte_buf(bytes)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Nil => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Nil => visitor.visit_unit(),
            _ => Err(invalid_value(self.input, "nil")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::List(elts) | Value::Vector(elts) => {
                visitor.visit_seq(SeqAccess::new(elts.iter()))
            }
            Value::Set(elts) => visitor.visit_seq(SeqAccess::new(elts.iter())),
            _ => Err(invalid_value(self.input, "list, vector or set")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::List(elts) | Value::Vector(elts) => {
                visitor.visit_seq(SeqAccess::new(elts.iter()))
            }
            _ => Err(invalid_value(self.input, "list or vector")),
        }
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.input
            .as_map()
            .ok_or_else(|| invalid_value(self.input, "a map"))
            .and_then(|map| visitor.visit_map(MapAccess::new(map)))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Keyword(_) | Value::Symbol(_) | Value::String(_) => {
                visitor.visit_enum(UnitVariantAccess::new(self))
            }
            Value::Map(map) if map.len() == 1 => match map.iter().next() {
                Some((variant, payload)) => visitor.visit_enum(VariantAccess { variant, payload }),
                None => Err(invalid_value(self.input, "single-entry map")),
            },
            _ => Err(invalid_value(self.input, "keyword or single-entry map")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input {
            Value::Keyword(name) | Value::Symbol(name) => visit_name(name, visitor),
            Value::String(s) => visitor.visit_borrowed_str(s),
            _ => Err(invalid_value(self.input, "keyword, symbol or string")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

fn invalid_value(value: &Value, expected: &'static str) -> Error {
    let unexpected = match value {
        Value::Nil => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Char(c) => de::Unexpected::Char(*c),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Integer(n) => de::Unexpected::Signed(*n),
        Value::Float(n) => de::Unexpected::Float(*n),
        other => de::Unexpected::Other(other.kind().name()),
    };
    Error::invalid_type(unexpected, &expected)
}

/// Sequence access over list and vector elements or set members.
struct SeqAccess<I> {
    iter: I,
}

impl<I> SeqAccess<I> {
    fn new(iter: I) -> Self {
        SeqAccess { iter }
    }
}

impl<'de, I> de::SeqAccess<'de> for SeqAccess<I>
where
    I: Iterator<Item = &'de Value> + ExactSizeIterator,
{
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(&mut Deserializer::from_value(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapAccess<'a> {
    iter: hash_map::Iter<'a, Value, Value>,
    value: Option<&'a Value>,
}

impl<'a> MapAccess<'a> {
    fn new(map: &'a Map) -> Self {
        MapAccess {
            iter: map.iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(&mut Deserializer::from_value(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(&mut Deserializer::from_value(value)),
            None => Err(Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Access to a variant written as a single-entry map `{:Variant payload}`.
struct VariantAccess<'a> {
    variant: &'a Value,
    payload: &'a Value,
}

impl<'de> de::EnumAccess<'de> for VariantAccess<'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let val = seed.deserialize(&mut Deserializer::from_value(self.variant))?;
        Ok((val, self))
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        de::Deserialize::deserialize(&mut Deserializer::from_value(self.payload))
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut Deserializer::from_value(self.payload))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(
            &mut Deserializer::from_value(self.payload),
            len,
            visitor,
        )
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(
            &mut Deserializer::from_value(self.payload),
            "",
            fields,
            visitor,
        )
    }
}

struct UnitVariantAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> UnitVariantAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>) -> Self {
        UnitVariantAccess { de }
    }
}

impl<'a, 'de> de::EnumAccess<'de> for UnitVariantAccess<'a, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(&mut *self.de)?;
        Ok((variant, self))
    }
}

impl<'a, 'de> de::VariantAccess<'de> for UnitVariantAccess<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"newtype variant",
        ))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"tuple variant",
        ))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(de::Error::invalid_type(
            de::Unexpected::UnitVariant,
            &"struct variant",
        ))
    }
}
