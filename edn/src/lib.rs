#![deny(missing_docs)]

//! This crate provides facilities for parsing, printing and
//! manipulating data in the extensible data notation (EDN), the data
//! subset of Clojure's syntax.
//!
//! ```clojure
//! {:name "John Doe"
//!  :age 43
//!  :address {:street "10 Downing Street"
//!            :city "London"}
//!  :phones ["+44 1234567" "+44 2345678"]
//!  :tags #{:admin :ops}
//!  :born #inst "1980-04-12T23:20:50.52Z"}
//! ```
//!
//! Input is decoded incrementally: the parser pulls code points from a
//! byte source as it needs them, so a single stream can hold any number of
//! top-level values which are read one at a time.
//!
//! # Operating on dynamically typed EDN data
//!
//! Any valid EDN value can be manipulated using the [`Value`] data
//! structure.
//!
//! ```
//!  use edn::{Value, parse::Error};
//!
//!  fn example() -> Result<(), Error> {
//!      // Some EDN data as a &str.
//!      let data = r#"{:name "John Doe"
//!                     :age 43
//!                     :phones ["+44 1234567" "+44 2345678"]}"#;
//!
//!      // Parse the string of data into edn::Value.
//!      let v = edn::from_str(data)?;
//!
//!      // Access parts of the data by indexing with square brackets.
//!      println!("Please call {} at the number {}", v["name"], v["phones"][1]);
//!
//!      Ok(())
//!  }
//!  #
//!  # fn main() {
//!  #     example().unwrap();
//!  # }
//! ```
//!
//! Reading successive values from one stream:
//!
//! ```
//! use edn::{Parser, Value};
//!
//! let mut parser = Parser::from_reader(&b" true ; comment\n #_ignored false"[..]);
//! assert_eq!(parser.parse().unwrap(), Some(Value::Bool(true)));
//! assert_eq!(parser.parse().unwrap(), Some(Value::Bool(false)));
//! assert_eq!(parser.parse().unwrap(), None);
//! ```
//!
//! # The data model
//!
//! ## Atoms
//!
//! ```clojure
//! nil             ; Value::Nil
//! true false      ; Value::Bool
//! \a \newline 'b  ; Value::Char, `'` is accepted as well as `\`
//! "text\n"        ; Value::String
//! :kw :my.ns/kw   ; Value::Keyword
//! sym my.ns/sym   ; Value::Symbol
//! 42 -7           ; Value::Integer, 64 bits signed
//! 1.5 1e10 ##Inf  ; Value::Float
//! ```
//!
//! Keywords and symbols with the same name are different values. Ratios
//! like `22/7` and the arbitrary precision suffixes `N` and `M` have no
//! counterpart in [`Value`]; they are rejected unless the parser is told
//! otherwise through [`parse::Options`].
//!
//! ## Collections
//!
//! ```clojure
//! (1 2 3)     ; Value::List
//! [1 2 3]     ; Value::Vector
//! {:a 1 :b 2} ; Value::Map
//! #{1 2 3}    ; Value::Set
//! ```
//!
//! Lists and vectors with the same elements are not equal. Maps and sets are
//! compared without regard to order, and any value, including collections,
//! can be used as a key or element.
//!
//! ## Tagged literals and discard
//!
//! `#tag value` produces a [`Tagged`] value holding the tag and the
//! following value; no tags are interpreted. `#_ value` reads and drops the
//! following value.
//!
//! # Conversions
//!
//! The [`utf8`] module has whole-buffer conversions between UTF-8 bytes and
//! code points. For conversion from and to statically typed Rust data
//! structures see the [`serde-edn`] crate.
//!
//! [`serde-edn`]: https://docs.rs/serde-edn

pub mod parse;
pub mod print;
pub mod utf8;
pub mod value;

#[doc(inline)]
pub use self::parse::{
    from_reader, from_reader_custom, from_slice, from_slice_custom, from_str, from_str_custom,
    Parser,
};

#[doc(inline)]
pub use self::print::{
    to_string, to_string_custom, to_vec, to_vec_custom, to_writer, to_writer_custom, Printer,
};

#[doc(inline)]
pub use value::{Kind, Map, Name, Set, Tagged, TypeError, Value};

#[doc(inline)]
pub use value::Index;
