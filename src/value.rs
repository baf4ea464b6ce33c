//! Dynamic values.
//!
//! [`Value`] lets callers assemble a graph at runtime instead of declaring a
//! type. Every variant encodes into exactly one category, and
//! [`Value::Shared`] nodes may point back at their ancestors, in which case
//! encoding reports a cycle just as it does for typed graphs.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_graphjson::{to_string, value, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "tags": ["a", "b"]
//! });
//! assert_eq!(to_string(&obj).unwrap(), r#"{"name":"Alice","tags":["a","b"]}"#);
//! ```
//!
//! ## Shared Nodes
//!
//! ```rust
//! use serde_graphjson::{to_string, Map, Shared, Value};
//!
//! let node = Shared::new(Value::Object(Map::new()));
//! if let Value::Object(map) = &mut *node.borrow_mut() {
//!     map.insert("me".to_string(), Value::Shared(node.clone()));
//! }
//! assert!(to_string(&Value::Shared(node.clone())).unwrap_err().is_cycle());
//! # *node.borrow_mut() = Value::Null;
//! ```

use crate::time::EpochMillis;
use crate::{Map, Shared};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

/// Newtype-struct name under which big numbers pass their decimal digits to
/// the encoder, which writes them unquoted. Other serializers see a string.
pub(crate) const BIG_NUMBER_TOKEN: &str = "$serde_graphjson::private::BigNumber";

/// A dynamically-typed graph value.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(Value::Null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// A temporal value, written as RFC 3339 text.
    Timestamp(DateTime<Utc>),
    /// A legacy date, written as quoted epoch milliseconds.
    Date(EpochMillis),
    /// A node that may be referenced from several places.
    Shared(Shared<Value>),
}

/// A numeric value.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(3.5).as_f64(), Some(3.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    /// An integer outside the `i64` range.
    Big(BigInt),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Big(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns the value as `i64` if it is an integer in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use num_bigint::BigInt;
    /// use serde_graphjson::Number;
    ///
    /// assert_eq!(Number::Big(BigInt::from(7)).as_i64(), Some(7));
    /// assert_eq!(Number::Float(7.0).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Big(b) => i64::try_from(b).ok(),
            Number::Float(_) => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Float(f) => Some(*f),
            Number::Integer(i) => Some(*i as f64),
            Number::Big(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{:?}", fl),
            Number::Big(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
            Number::Big(b) => serializer.serialize_newtype_struct(BIG_NUMBER_TOKEN, &b.to_string()),
        }
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        matches!(self, Value::Shared(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    ///
    /// ```rust
    /// use serde_graphjson::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_shared(&self) -> Option<&Shared<Value>> {
        match self {
            Value::Shared(node) => Some(node),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => serializer.collect_seq(arr),
            Value::Object(obj) => obj.serialize(serializer),
            Value::Timestamp(dt) => dt.serialize(serializer),
            Value::Date(date) => date.serialize(serializer),
            Value::Shared(node) => node.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(value as i64))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::Number(Number::Big(BigInt::from(value))),
        }
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::Number(Number::Big(BigInt::from(value))),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::Number(Number::Big(value)),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<EpochMillis> for Value {
    fn from(value: EpochMillis) -> Self {
        Value::Date(value)
    }
}

impl From<Shared<Value>> for Value {
    fn from(value: Shared<Value>) -> Self {
        Value::Shared(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_string;
    use chrono::TimeZone;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Number(Number::Integer(42)));
        assert_eq!(Value::from(1.5), Value::Number(Number::Float(1.5)));
        assert_eq!(Value::from('c'), Value::String("c".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_wide_integers_become_big() {
        let value = Value::from(u64::MAX);
        assert!(matches!(value, Value::Number(Number::Big(_))));
        assert_eq!(to_string(&value).unwrap(), "18446744073709551615");

        let narrow = Value::from(BigInt::from(-5));
        assert_eq!(narrow, Value::Number(Number::Integer(-5)));
    }

    #[test]
    fn test_big_number_is_unquoted() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let value = Value::Array(vec![Value::from(big), Value::from(1)]);
        assert_eq!(
            to_string(&value).unwrap(),
            "[123456789012345678901234567890,1]"
        );
    }

    #[test]
    fn test_temporal_variants() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            to_string(&Value::from(ts)).unwrap(),
            "\"2024-01-02T03:04:05Z\""
        );
        assert_eq!(
            to_string(&Value::from(EpochMillis::new(0))).unwrap(),
            "\"0\""
        );
    }

    #[test]
    fn test_accessors() {
        let value = Value::from(vec![Value::from(1), Value::Null]);
        assert!(value.is_array());
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value.as_i64(), None);
        assert_eq!(Value::from(7).as_i64(), Some(7));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert!(Value::from(Shared::new(Value::Null)).is_shared());
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_null(v: &Value) -> bool {
            v.is_null()
        }
        assert!(check_null(&Value::Null));
        assert!(!check_null(&Value::Bool(false)));
    }
}
