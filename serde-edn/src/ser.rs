use std::io;

use serde::Serialize;

use edn::print;

use crate::error::Result;
use crate::value::to_value;

/// Serialize an instance of type `T` into an EDN string.
///
/// ```
/// # use serde_edn::to_string;
/// assert_eq!(to_string(&("foo", 1)).unwrap(), r#"["foo" 1]"#.to_string())
/// ```
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(edn::to_string(&to_value(value)?)?)
}

/// Serialize an instance of type `T` into an EDN string, using custom printer
/// options.
///
/// ```
/// # use serde_edn::{print, to_string_custom};
/// let options = print::Options::new().with_char_syntax(print::CharSyntax::Quote);
/// assert_eq!(to_string_custom(&['a', 'b'], options).unwrap(), "['a 'b]");
/// ```
pub fn to_string_custom<T>(value: &T, options: print::Options) -> Result<String>
where
    T: Serialize,
{
    Ok(edn::to_string_custom(&to_value(value)?, options)?)
}

/// Serialize an instance of type `T` into a byte vector of EDN text.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize,
{
    Ok(edn::to_vec(&to_value(value)?)?)
}

/// Serialize an instance of type `T` as EDN text into an IO stream.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    Ok(edn::to_writer(writer, &to_value(value)?)?)
}
