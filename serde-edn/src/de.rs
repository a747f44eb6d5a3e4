use std::io;

use serde::de::DeserializeOwned;

use edn::parse;

use crate::error::Result;
use crate::value::from_value;

/// Deserialize an instance of type `T` from an EDN string, using the
/// default parser options.
///
/// ```
/// use serde_edn::from_str;
///
/// let v: Vec<u32> = from_str("(1 2 3)").unwrap();
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_str(s)?)
}

/// Deserialize an instance of type `T` from an EDN string.
///
/// ```
/// use serde_edn::{from_str_custom, parse};
///
/// let options = parse::Options::new().with_ratios(parse::Ratios::Float);
/// let v: Vec<f64> = from_str_custom("[1/2 3/4]", options).unwrap();
/// assert_eq!(v, vec![0.5, 0.75]);
/// ```
pub fn from_str_custom<T>(s: &str, options: parse::Options) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_str_custom(s, options)?)
}

/// Deserialize an instance of type `T` from an EDN byte slice, using the
/// default parser options.
///
/// ```
/// use serde_edn::from_slice;
///
/// let v: Vec<u32> = from_slice(b"[1 2 3]").unwrap();
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
pub fn from_slice<T>(s: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_slice(s)?)
}

/// Deserialize an instance of type `T` from an EDN byte slice.
///
/// ```
/// use serde_edn::{from_slice_custom, parse};
///
/// let options = parse::Options::new().with_precision_suffixes(parse::PrecisionSuffixes::Lossy);
/// let v: Vec<i64> = from_slice_custom(b"[1N 2N]", options).unwrap();
/// assert_eq!(v, vec![1, 2]);
/// ```
pub fn from_slice_custom<T>(s: &[u8], options: parse::Options) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_slice_custom(s, options)?)
}

/// Parse a value from an input stream of EDN text, using the default parser
/// options.
///
/// ```
/// use serde_edn::from_reader;
///
/// let cursor = std::io::Cursor::new(b"#{1 2 3}");
/// let mut v: Vec<u32> = from_reader(cursor).unwrap();
/// v.sort();
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
pub fn from_reader<T>(rdr: impl io::Read) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_reader(rdr)?)
}

/// Parse a value from an input stream of EDN text.
///
/// ```
/// use serde_edn::{from_reader_custom, parse};
///
/// let cursor = std::io::Cursor::new(b"[[[1]]]");
/// let options = parse::Options::new().with_recursion_limit(2);
/// let result: serde_edn::Result<Vec<Vec<Vec<u32>>>> = from_reader_custom(cursor, options);
/// assert!(result.is_err());
/// ```
pub fn from_reader_custom<T>(rdr: impl io::Read, options: parse::Options) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(&edn::from_reader_custom(rdr, options)?)
}
