//! # Numeric Operands
//!
//! [`Number`] is the only operand type the typed [`Calculator`](crate::Calculator)
//! API accepts, so passing text, null or a list to an arithmetic method is a
//! compile error rather than a runtime check.
//!
//! [`Operand`] is the dynamic counterpart used where input arrives
//! untyped (deserialized commands, CLI tokens). Converting an operand to a
//! number is the one place a runtime type check happens.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::number::{Number, Operand};
//!
//! let n: Number = 3.into();
//! assert_eq!(n, Number::Integer(3));
//! assert_eq!(n.as_f64(), 3.0);
//!
//! let text: Operand = serde_json::from_str("\"3\"").unwrap();
//! let err = text.to_number().unwrap_err();
//! assert_eq!(err.to_string(), "Expected number, got string");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

/// An integer or floating-point value.
///
/// Serializes as a bare JSON number. Special float values (`inf`, `nan`) are
/// valid numbers and propagate through arithmetic per IEEE-754.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Value as an f64 (integers beyond 2^53 lose precision)
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// True for `0`, `0.0` and `-0.0`
    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// True for integers and for finite floats with no fractional part
    pub fn is_integral(self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Integer(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($variant:ident, $target:ty; $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(value: $source) -> Self {
                    Number::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(Integer, i64; i8, i16, i32, i64, u8, u16, u32);
impl_from_primitive!(Float, f64; f32, f64);

/// Name used in `TypeKind` errors for a JSON value's shape
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// A dynamically-typed argument that may or may not be a number.
///
/// Deserialization tries each variant in order, so JSON numbers become
/// [`Operand::Number`], arrays become [`Operand::List`], and everything
/// else (strings, null, booleans, objects) is kept as [`Operand::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(Number),
    List(Vec<Operand>),
    Other(Value),
}

impl Operand {
    /// Wrap anything convertible to a [`Number`]
    pub fn number(value: impl Into<Number>) -> Self {
        Operand::Number(value.into())
    }

    /// Build a list operand from numbers
    pub fn list<I, N>(values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        Operand::List(values.into_iter().map(Operand::number).collect())
    }

    /// Name of this operand's shape, as reported in `TypeKind` errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Number(_) => "number",
            Operand::List(_) => "list",
            Operand::Other(value) => value_type_name(value),
        }
    }

    /// Runtime numeric check: succeeds for integers and floats.
    ///
    /// Booleans count as the integers 1 and 0.
    pub fn to_number(&self) -> CalcResult<Number> {
        match self {
            Operand::Number(n) => Ok(*n),
            Operand::Other(Value::Bool(b)) => Ok(Number::Integer(i64::from(*b))),
            Operand::Other(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Number::Integer(i)),
                None => n
                    .as_f64()
                    .map(Number::Float)
                    .ok_or_else(|| CalcError::type_kind("number", "number out of range")),
            },
            other => Err(CalcError::type_kind("number", other.type_name())),
        }
    }

    /// Runtime check for a list of numbers.
    ///
    /// An empty list converts successfully; rejecting it is up to the
    /// operation, which reports it as `InvalidOperation`.
    pub fn to_numbers(&self) -> CalcResult<Vec<Number>> {
        match self {
            Operand::List(items) => items.iter().map(Operand::to_number).collect(),
            Operand::Other(Value::Array(items)) => items
                .iter()
                .map(|item| Operand::Other(item.clone()).to_number())
                .collect(),
            other => Err(CalcError::type_kind("list", other.type_name())),
        }
    }
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Operand::Number(value)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Operand::Number(Number::Integer(i)),
                None => match n.as_f64() {
                    Some(f) => Operand::Number(Number::Float(f)),
                    None => Operand::Other(Value::Number(n)),
                },
            },
            Value::Array(items) => Operand::List(items.into_iter().map(Operand::from).collect()),
            other => Operand::Other(other),
        }
    }
}
