// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Values appearing in constraints and samples.
//!
//! A `Value` is tagged at runtime with one of the variants below, and every variant belongs to exactly one `Kind`. Comparison, equality and interval arithmetic all dispatch on this tag. Values of different kinds are never compared with each other.
//!
//! | Variant | Kind |
//! |---|---|
//! | `Number`, `Int32`, `Long`, `Double` | `Numeric` |
//! | `Date` | `Temporal` |
//! | `ObjectId` | `OpaqueOrdered` |
//! | `Decimal` | `Decimal` |
//! | `String`, `Bool` | `Other` |
//!
//! `Number` is an untyped number, the three other numeric variants carry the type they were stored with, which matters for equality (see [equality](../equality/index.html)).

use crate::decimal::Decimal;
use crate::object_id::ObjectId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
  Numeric,
  Temporal,
  OpaqueOrdered,
  Decimal,
  Other
}

impl fmt::Display for Kind
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(match self {
      Kind::Numeric => "numeric",
      Kind::Temporal => "temporal",
      Kind::OpaqueOrdered => "opaque-ordered",
      Kind::Decimal => "decimal",
      Kind::Other => "other"
    })
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
  Number(f64),
  Int32(i32),
  Long(i64),
  Double(f64),
  Date(DateTime<Utc>),
  ObjectId(ObjectId),
  Decimal(Decimal),
  String(String),
  Bool(bool)
}

impl Value
{
  pub fn kind(&self) -> Kind {
    match self {
      Value::Number(_) | Value::Int32(_) | Value::Long(_) | Value::Double(_) => Kind::Numeric,
      Value::Date(_) => Kind::Temporal,
      Value::ObjectId(_) => Kind::OpaqueOrdered,
      Value::Decimal(_) => Kind::Decimal,
      Value::String(_) | Value::Bool(_) => Kind::Other
    }
  }

  /// The numeric value of the numeric variants. `Long` values beyond 2^53 lose precision; interval bounds built from a `Long` stay `Long` when the tolerance is a whole number.
  pub fn as_f64(&self) -> Option<f64> {
    match *self {
      Value::Number(x) | Value::Double(x) => Some(x),
      Value::Int32(x) => Some(x as f64),
      Value::Long(x) => Some(x as f64),
      _ => None
    }
  }

  pub fn is_nan(&self) -> bool {
    match *self {
      Value::Number(x) | Value::Double(x) => x.is_nan(),
      _ => false
    }
  }
}

/// The canonical string form, also used by value equality for decimals and longs.
impl fmt::Display for Value
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Value::Number(x) | Value::Double(x) => write!(f, "{}", x),
      Value::Int32(x) => write!(f, "{}", x),
      Value::Long(x) => write!(f, "{}", x),
      Value::Date(x) => f.write_str(&x.to_rfc3339_opts(SecondsFormat::Millis, true)),
      Value::ObjectId(x) => write!(f, "{}", x),
      Value::Decimal(x) => write!(f, "{}", x),
      Value::String(x) => f.write_str(x),
      Value::Bool(x) => write!(f, "{}", x)
    }
  }
}

macro_rules! value_from_impl
{
  ( $( $source:ty => $variant:ident ),* ) =>
  {$(
    impl From<$source> for Value
    {
      fn from(x: $source) -> Value {
        Value::$variant(x)
      }
    }
  )*}
}

value_from_impl!(
  f64 => Number,
  i32 => Int32,
  i64 => Long,
  DateTime<Utc> => Date,
  ObjectId => ObjectId,
  Decimal => Decimal,
  String => String,
  bool => Bool);

impl<'a> From<&'a str> for Value
{
  fn from(x: &'a str) -> Value {
    Value::String(x.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use serde_test::{assert_tokens, Token};

  #[test]
  fn kinds() {
    let numeric: Vec<Value> = vec![15.0.into(), 15i32.into(), 15i64.into(), Value::Double(1.5)];
    for v in &numeric {
      assert_eq!(v.kind(), Kind::Numeric);
    }
    assert_eq!(Value::from(Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap()).kind(), Kind::Temporal);
    assert_eq!(Value::from("578cfb38d5021e616087f53f".parse::<ObjectId>().unwrap()).kind(), Kind::OpaqueOrdered);
    assert_eq!(Value::from("1.5".parse::<Decimal>().unwrap()).kind(), Kind::Decimal);
    assert_eq!(Value::from("x").kind(), Kind::Other);
    assert_eq!(Value::from(true).kind(), Kind::Other);
  }

  #[test]
  fn canonical_strings() {
    assert_eq!(Value::Number(15.0).to_string(), "15");
    assert_eq!(Value::Double(12.2).to_string(), "12.2");
    assert_eq!(Value::Long(-12).to_string(), "-12");
    assert_eq!(Value::from("1.50".parse::<Decimal>().unwrap()).to_string(), "1.50");
    assert_eq!(Value::from(Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap()).to_string(),
      "2011-01-01T00:00:00.000Z");
    assert_eq!(Kind::OpaqueOrdered.to_string(), "opaque-ordered");
  }

  #[test]
  fn numeric_views() {
    assert_eq!(Value::Int32(12).as_f64(), Some(12.0));
    assert_eq!(Value::Long(1 << 40).as_f64(), Some(1099511627776.0));
    assert_eq!(Value::from("12").as_f64(), None);
    assert!(Value::Number(f64::NAN).is_nan());
    assert!(!Value::Int32(0).is_nan());
  }

  #[test]
  fn serde_is_externally_tagged() {
    assert_tokens(&Value::Int32(5), &[
      Token::NewtypeVariant { name: "Value", variant: "Int32" },
      Token::I32(5)
    ]);
    assert_tokens(&Value::from("1.5".parse::<Decimal>().unwrap()), &[
      Token::NewtypeVariant { name: "Value", variant: "Decimal" },
      Token::Str("1.5")
    ]);
  }
}
