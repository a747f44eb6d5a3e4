use std::ops;

use super::Value;

/// A type that can be used to index into an `edn::Value`.
///
/// The [`get`] method of `Value` accept any type that implements
/// `Index`, as does the [square-bracket indexing operator]. This
/// trait is implemented for strings, which look up keyword (and then
/// string) keys in maps, for `Value`, which looks up arbitrary map keys, and
/// for `usize`, which is used to index into lists and vectors.
///
/// [`get`]: enum.Value.html#method.get
/// [square-bracket indexing operator]: enum.Value.html#impl-Index%3CI%3E
///
/// This trait is sealed and cannot be implemented for types outside
/// of `edn`.
///
/// # Examples
///
/// ```
/// let data = edn::from_str("{:foo 42 :bar (1 2 3)}").unwrap();
///
/// // Data is a map with keyword keys, so it can be indexed with a string.
/// let bar = &data["bar"];
///
/// // Bar is a list so it can be indexed with an integer.
/// let second = &bar[1];
///
/// assert_eq!(second, &edn::Value::from(2));
/// ```
pub trait Index: private::Sealed {
    /// Return None if the key is not in the map, or the index is out of
    /// bounds.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;
}

// Prevent users from implementing the Index trait.
mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<'a, T: ?Sized> Sealed for &'a T where T: Sealed {}
    impl Sealed for super::Value {}
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        v.as_slice().and_then(|elements| elements.get(*self))
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Map(map) => map
                .get(&Value::keyword(self))
                .or_else(|| map.get(&Value::from(self))),
            _ => None,
        }
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        self[..].index_into(v)
    }
}

impl<'a, T: ?Sized> Index for &'a T
where
    T: Index,
{
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }
}

impl Index for Value {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Map(map) => map.get(self),
            _ => None,
        }
    }
}

// Indexing does not panic: the use case is pulling parts out of data whose
// shape is expected but not checked. Use `get`, the `as_*` accessors or a
// match when the shape matters.
impl<I> ops::Index<I> for Value
where
    I: Index,
{
    type Output = Value;

    /// Index into an `edn::Value` using the syntax `value[0]` or
    /// `value["k"]`.
    ///
    /// Returns the nil value if the type of `self` does not match the
    /// type of the index, for example if the index is a string and
    /// `self` is not a map. Also returns the nil value if the given
    /// key does not exist in the map or the given index is not within
    /// the bounds of the list or vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edn::Value;
    /// let data = edn::from_str("{:a 42 :x [y (z zz)]}").unwrap();
    ///
    /// assert_eq!(data["x"][1], edn::from_str("(z zz)").unwrap());
    /// assert_eq!(data[&Value::keyword("a")], Value::from(42));
    ///
    /// assert_eq!(data["b"], Value::Nil); // returns nil for undefined values
    /// assert_eq!(data["a"][0], Value::Nil); // does not panic
    /// ```
    fn index(&self, index: I) -> &Value {
        static NIL: Value = Value::Nil;
        index.index_into(self).unwrap_or(&NIL)
    }
}
