#![deny(missing_docs)]

//! This crate provides [Serde]-based serialization and
//! deserialization from statically-typed Rust data structures to the
//! dynamically typed EDN values, using the [`edn::Value`] type, and to
//! their text representation.
//!
//! Rust data maps onto EDN like this:
//!
//! - structs become maps with keyword keys, `{:name "x" :age 3}`
//! - sequences and tuples become vectors
//! - `None` and `()` become `nil`, `Some(v)` is written as `v`
//! - unit variants become keywords, other variants a single-entry map
//!   keyed by the variant name, `{:Circle 1.5}`
//! - byte strings become vectors of integers
//!
//! ```
//! use serde_derive::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Service {
//!     name: String,
//!     ports: Vec<u16>,
//! }
//!
//! let text = r#"{:name "web" :ports [80 443]}"#;
//! let service: Service = serde_edn::from_str(text).unwrap();
//! assert_eq!(service.ports, vec![80, 443]);
//!
//! let value = serde_edn::to_value(&service).unwrap();
//! assert_eq!(value["name"], edn::Value::from("web"));
//! ```
//!
//! Deserialization is lenient about collection kinds: lists, vectors and
//! sets all deserialize into sequences, keywords, symbols and strings are all
//! accepted as field and variant names, and tagged literals are looked
//! through to the value they tag.
//!
//! [Serde]: https://crates.io/crates/serde
//! [`edn::Value`]: https://docs.rs/edn/*/edn/enum.Value.html

pub use edn::{parse, print};

pub use de::{
    from_reader, from_reader_custom, from_slice, from_slice_custom, from_str, from_str_custom,
};
pub use error::{Error, Result};
pub use ser::{to_string, to_string_custom, to_vec, to_writer};
pub use value::{from_value, to_value, Value};

mod de;
mod ser;

pub mod error;
pub mod value;
