//! Serialization to and from `edn::Value`.

pub use edn::{Map, Name, Set, Tagged, Value};

pub use de::from_value;
pub use ser::to_value;

mod de;
mod ser;
