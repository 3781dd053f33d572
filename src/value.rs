use std::collections::HashMap;

use zbus::zvariant::{self, OwnedValue};

/*
* Closed subset of D-Bus types that MPRIS properties and metadata actually use. Anything else the
* player sends is kept as `Unsupported` so that callers can still see that a value was present.
*
* See https://www.freedesktop.org/wiki/Specifications/mpris-spec/metadata/
*/

/// A dynamically-typed property or metadata value.
///
/// Use one of the `into_*` projections to get at the inner value; each hands the value back
/// when it holds a different type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean.
    Boolean(bool),
    /// Any signed integer (`n`, `i`, `x`).
    SignedInt(i64),
    /// Any unsigned integer (`y`, `q`, `u`, `t`).
    UnsignedInt(u64),
    /// A double.
    Float(f64),
    /// A string, object path or signature.
    String(String),
    /// An array of strings or object paths.
    Strings(Vec<String>),
    /// A string-keyed map of further values, like `Metadata`.
    Map(HashMap<String, Value>),
    /// A variant that carries nothing (an empty structure).
    Nil,
    /// Any other D-Bus type.
    Unsupported,
}

impl Value {
    /// Returns `true` for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the inner boolean, or the value itself if it holds something else.
    pub fn into_bool(self) -> Result<bool, Value> {
        match self {
            Value::Boolean(b) => Ok(b),
            other => Err(other),
        }
    }

    /// Returns the inner string.
    pub fn into_string(self) -> Result<String, Value> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }

    /// Returns the inner integer, saturating unsigned values that do not fit.
    pub fn into_i64(self) -> Result<i64, Value> {
        match self {
            Value::SignedInt(i) => Ok(i),
            Value::UnsignedInt(i) => Ok(i64::try_from(i).unwrap_or(i64::MAX)),
            other => Err(other),
        }
    }

    /// Returns the inner integer. Negative values become `0`.
    pub fn into_u64(self) -> Result<u64, Value> {
        match self {
            Value::SignedInt(i) => Ok(u64::try_from(i).unwrap_or(0)),
            Value::UnsignedInt(i) => Ok(i),
            other => Err(other),
        }
    }

    /// Returns the inner double. Integers are widened.
    pub fn into_f64(self) -> Result<f64, Value> {
        match self {
            Value::Float(f) => Ok(f),
            Value::SignedInt(i) => Ok(i as f64),
            Value::UnsignedInt(i) => Ok(i as f64),
            other => Err(other),
        }
    }

    /// Returns the inner string list. A single string is treated as a list of one.
    pub fn into_strings(self) -> Result<Vec<String>, Value> {
        match self {
            Value::Strings(v) => Ok(v),
            Value::String(s) => Ok(vec![s]),
            other => Err(other),
        }
    }

    /// Returns the inner map.
    pub fn into_map(self) -> Result<HashMap<String, Value>, Value> {
        match self {
            Value::Map(m) => Ok(m),
            other => Err(other),
        }
    }

    /// Converts the value into its wire form for a property write.
    ///
    /// Maps, `Nil` and `Unsupported` have no wire form and are handed back unchanged.
    pub(crate) fn into_zvariant(self) -> Result<zvariant::Value<'static>, Value> {
        match self {
            Value::Boolean(b) => Ok(zvariant::Value::from(b)),
            Value::SignedInt(i) => Ok(zvariant::Value::from(i)),
            Value::UnsignedInt(i) => Ok(zvariant::Value::from(i)),
            Value::Float(f) => Ok(zvariant::Value::from(f)),
            Value::String(s) => Ok(zvariant::Value::from(s)),
            Value::Strings(v) => Ok(zvariant::Value::from(v)),
            other => Err(other),
        }
    }
}

/// Types a [`Value`] can be projected into, with the name reported in cast errors.
pub(crate) trait FromValue: Sized {
    const NAME: &'static str;

    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! from_value {
    ($target:ty, $name:literal, $projection:path) => {
        impl FromValue for $target {
            const NAME: &'static str = $name;

            fn from_value(value: Value) -> Result<Self, Value> {
                $projection(value)
            }
        }
    };
}

from_value!(bool, "bool", Value::into_bool);
from_value!(String, "String", Value::into_string);
from_value!(i64, "i64", Value::into_i64);
from_value!(u64, "u64", Value::into_u64);
from_value!(f64, "f64", Value::into_f64);
from_value!(Vec<String>, "Vec<String>", Value::into_strings);
from_value!(HashMap<String, Value>, "HashMap<String, Value>", Value::into_map);

impl<'a> From<zvariant::Value<'a>> for Value {
    fn from(value: zvariant::Value<'a>) -> Self {
        match value {
            zvariant::Value::Bool(v) => Value::Boolean(v),
            zvariant::Value::I16(v) => Value::SignedInt(i64::from(v)),
            zvariant::Value::I32(v) => Value::SignedInt(i64::from(v)),
            zvariant::Value::I64(v) => Value::SignedInt(v),
            zvariant::Value::U8(v) => Value::UnsignedInt(u64::from(v)),
            zvariant::Value::U16(v) => Value::UnsignedInt(u64::from(v)),
            zvariant::Value::U32(v) => Value::UnsignedInt(u64::from(v)),
            zvariant::Value::U64(v) => Value::UnsignedInt(v),

            zvariant::Value::F64(v) => Value::Float(v),

            zvariant::Value::Str(v) => Value::String(v.to_string()),
            zvariant::Value::Signature(v) => Value::String(v.to_string()),
            zvariant::Value::ObjectPath(v) => Value::String(v.to_string()),

            zvariant::Value::Array(a)
                if matches!(a.full_signature().as_str(), "as" | "ao") =>
            {
                let mut strings = Vec::with_capacity(a.len());
                for v in a.into_iter() {
                    match v {
                        zvariant::Value::Str(s) => strings.push(s.to_string()),
                        zvariant::Value::ObjectPath(p) => strings.push(p.to_string()),
                        _ => {}
                    }
                }
                Value::Strings(strings)
            }

            zvariant::Value::Value(v) => Value::from(*v),

            zvariant::Value::Dict(d) => dict_to_map(d),

            zvariant::Value::Structure(s) if s.fields().is_empty() => Value::Nil,

            _ => Value::Unsupported,
        }
    }
}

impl From<OwnedValue> for Value {
    fn from(value: OwnedValue) -> Self {
        Value::from((*value).clone())
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Value {
        Value::String(String::from(string))
    }
}

impl From<String> for Value {
    fn from(string: String) -> Value {
        Value::String(string)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::SignedInt(i)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Value {
        Value::UnsignedInt(i)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Value {
        Value::Strings(v)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Value {
        Value::Map(m)
    }
}

// Only string-keyed dicts are representable; `a{sv}` is the one MPRIS uses.
fn dict_to_map(dict: zvariant::Dict<'_, '_>) -> Value {
    let owned = OwnedValue::from(zvariant::Value::Dict(dict));
    match HashMap::<String, OwnedValue>::try_from(owned) {
        Ok(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        ),
        Err(_) => Value::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_converts_scalars() {
        assert_eq!(Value::from(zvariant::Value::Bool(true)), Value::Boolean(true));
        assert_eq!(Value::from(zvariant::Value::I32(-4)), Value::SignedInt(-4));
        assert_eq!(Value::from(zvariant::Value::U32(4)), Value::UnsignedInt(4));
        assert_eq!(Value::from(zvariant::Value::F64(0.5)), Value::Float(0.5));
        assert_eq!(
            Value::from(zvariant::Value::from("Playing")),
            Value::String("Playing".into())
        );
    }

    #[test]
    fn it_unwraps_nested_variants() {
        let nested = zvariant::Value::Value(Box::new(zvariant::Value::I64(42)));
        assert_eq!(Value::from(nested), Value::SignedInt(42));
    }

    #[test]
    fn it_converts_string_arrays() {
        let array = zvariant::Value::from(vec!["file", "http"]);
        assert_eq!(
            Value::from(array),
            Value::Strings(vec!["file".into(), "http".into()])
        );
    }

    #[test]
    fn it_converts_object_paths_to_strings() {
        let path = zvariant::ObjectPath::try_from("/org/mpris/MediaPlayer2/Track/1").unwrap();
        assert_eq!(
            Value::from(zvariant::Value::from(path)),
            Value::String("/org/mpris/MediaPlayer2/Track/1".into())
        );
    }

    #[test]
    fn it_converts_string_keyed_dicts() {
        let mut raw: HashMap<&str, zvariant::Value<'_>> = HashMap::new();
        raw.insert("xesam:title", zvariant::Value::from("Song"));
        raw.insert("mpris:length", zvariant::Value::I64(5_000_000));

        let mut expected = HashMap::new();
        expected.insert("xesam:title".to_string(), Value::from("Song"));
        expected.insert("mpris:length".to_string(), Value::SignedInt(5_000_000));

        assert_eq!(
            Value::from(zvariant::Value::from(zvariant::Dict::from(raw))),
            Value::Map(expected)
        );
    }

    #[test]
    fn test_signed_integer_casting() {
        assert_eq!(Value::SignedInt(42).into_i64(), Ok(42));
        assert_eq!(Value::SignedInt(-42).into_i64(), Ok(-42));
        assert_eq!(Value::UnsignedInt(42).into_i64(), Ok(42));
        assert_eq!(Value::Boolean(true).into_i64(), Err(Value::Boolean(true)));

        assert_eq!(Value::UnsignedInt(u64::MAX).into_i64(), Ok(i64::MAX));
    }

    #[test]
    fn test_unsigned_integer_casting() {
        assert_eq!(Value::SignedInt(42).into_u64(), Ok(42));
        assert_eq!(Value::SignedInt(-42).into_u64(), Ok(0));
        assert_eq!(Value::UnsignedInt(42).into_u64(), Ok(42));
        assert_eq!(Value::Boolean(true).into_u64(), Err(Value::Boolean(true)));

        assert_eq!(Value::SignedInt(i64::MAX).into_u64(), Ok(i64::MAX as u64));
        assert_eq!(Value::SignedInt(i64::MIN).into_u64(), Ok(0));
        assert_eq!(Value::UnsignedInt(u64::MAX).into_u64(), Ok(u64::MAX));
    }

    #[test]
    fn it_widens_integers_to_floats() {
        assert_eq!(Value::Float(0.25).into_f64(), Ok(0.25));
        assert_eq!(Value::SignedInt(1).into_f64(), Ok(1.0));
        assert_eq!(Value::from("1.0").into_f64(), Err(Value::from("1.0")));
    }

    #[test]
    fn it_treats_a_single_string_as_a_list() {
        assert_eq!(
            Value::from("Artist").into_strings(),
            Ok(vec!["Artist".to_string()])
        );
        assert_eq!(Value::Nil.into_strings(), Err(Value::Nil));
    }

    #[test]
    fn it_names_projection_targets_briefly() {
        assert_eq!(<String as FromValue>::NAME, "String");
        assert_eq!(<Vec<String> as FromValue>::NAME, "Vec<String>");
        assert_eq!(
            <Vec<String> as FromValue>::from_value(Value::from("A")),
            Ok(vec!["A".to_string()])
        );
        assert_eq!(
            <bool as FromValue>::from_value(Value::Float(1.0)),
            Err(Value::Float(1.0))
        );
    }

    #[test]
    fn it_refuses_to_write_values_without_a_wire_form() {
        assert!(Value::Float(0.5).into_zvariant().is_ok());
        assert_eq!(Value::Nil.into_zvariant(), Err(Value::Nil));
        assert_eq!(
            Value::Map(HashMap::new()).into_zvariant(),
            Err(Value::Map(HashMap::new()))
        );
    }
}
