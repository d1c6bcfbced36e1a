use super::Type;
use crate::{Error, Result};

use std::cmp::Ordering;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point number
    F64(f64),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of values, used as the right-hand side of set membership
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

/// A value usable as a primary or foreign key.
///
/// Integers are normalized to 64 bits so that a key read back as `I64` by an
/// executor matches the `I32` held by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::F64(_) => "F64",
            Self::I16(_) => "I16",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::List(_) => "List",
            Self::Null => "Null",
            Self::String(_) => "String",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a 64-bit integer, whatever its integer width.
    pub fn to_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v as i64),
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the key form of the value, or `None` for values that cannot
    /// identify a row (null, floats, lists).
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Self::Bool(v) => Some(Key::Bool(*v)),
            Self::String(v) => Some(Key::String(v.clone())),
            value => value.to_i64().map(Key::Int),
        }
    }

    /// Converts the value to the given type.
    ///
    /// Only lossless conversions succeed; narrowing an integer that does not
    /// fit is an error.
    pub fn convert(self, ty: Type) -> Result<Self> {
        if self.is_null() {
            return Ok(self);
        }

        Ok(match ty {
            Type::Bool => Self::Bool(self.try_into()?),
            Type::F64 => Self::F64(self.try_into()?),
            Type::I16 => Self::I16(self.try_into()?),
            Type::I32 => Self::I32(self.try_into()?),
            Type::I64 => Self::I64(self.try_into()?),
            Type::String => Self::String(self.try_into()?),
        })
    }

    /// SQL-style equality: integers compare across widths, null equals
    /// nothing but null.
    pub fn sql_eq(&self, other: &Value) -> bool {
        self.sql_cmp(other) == Some(Ordering::Equal)
    }

    /// SQL-style ordering. Returns `None` when the values are not comparable.
    pub fn sql_cmp(&self, other: &Value) -> Option<Ordering> {
        use Value::*;

        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Null, _) | (_, Null) => None,
            (Bool(lhs), Bool(rhs)) => Some(lhs.cmp(rhs)),
            (String(lhs), String(rhs)) => Some(lhs.cmp(rhs)),
            (F64(lhs), F64(rhs)) => lhs.partial_cmp(rhs),
            (F64(lhs), rhs) => rhs.to_i64().and_then(|rhs| lhs.partial_cmp(&(rhs as f64))),
            (lhs, F64(rhs)) => lhs.to_i64().and_then(|lhs| (lhs as f64).partial_cmp(rhs)),
            (lhs, rhs) => match (lhs.to_i64(), rhs.to_i64()) {
                (Some(lhs), Some(rhs)) => Some(lhs.cmp(&rhs)),
                _ => None,
            },
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i16> for Value {
    fn from(src: i16) -> Self {
        Self::I16(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            // SQLite has no boolean storage class
            Value::I64(v) => Ok(v != 0),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        if let Value::F64(v) = value {
            return Ok(v);
        }

        match value.to_i64() {
            Some(v) => Ok(v as f64),
            None => Err(Error::type_conversion(value, "f64")),
        }
    }
}

macro_rules! impl_try_from_integer {
    ( $( $ty:ty => $name:literal ),+ ) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value.to_i64().map(<$ty>::try_from) {
                        Some(Ok(v)) => Ok(v),
                        _ => Err(Error::type_conversion(value, $name)),
                    }
                }
            }
        )+
    };
}

impl_try_from_integer!(i16 => "i16", i32 => "i32", i64 => "i64");

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

/// Conversion from a [`Value`] read out of a result row.
///
/// Unlike `TryFrom<Value>`, this is implemented for `Option<T>` so nullable
/// columns load as `None`.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_from_value {
    ( $( $ty:ty ),+ ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    value.try_into()
                }
            }
        )+
    };
}

impl_from_value!(bool, f64, i16, i32, i64, String);

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(T::from_value(value)?)),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.to_i64() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_compare_across_widths() {
        assert!(Value::I32(7).sql_eq(&Value::I64(7)));
        assert!(!Value::I32(7).sql_eq(&Value::I64(8)));
        assert_eq!(
            Value::I16(1).sql_cmp(&Value::I64(2)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn null_is_not_comparable_to_values() {
        assert_eq!(Value::Null.sql_cmp(&Value::I64(1)), None);
        assert!(Value::Null.sql_eq(&Value::Null));
    }

    #[test]
    fn keys_normalize_integers() {
        assert_eq!(Value::I32(3).to_key(), Value::I64(3).to_key());
        assert_eq!(Value::Null.to_key(), None);
    }

    #[test]
    fn narrowing_conversion_checks_range() {
        assert_eq!(Value::I64(5).convert(Type::I32).unwrap(), Value::I32(5));
        assert!(Value::I64(i64::MAX).convert(Type::I32).is_err());
    }
}
