// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Total order between values of the same kind.
//!
//! Numbers are compared by value whatever their variant; integers and floats are compared exactly. Dates are compared by instant, object ids by bytes and decimals by numeric value. Within `Kind::Other`, strings are ordered lexicographically and `false < true`.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use valuerange::{compare_values, Value};
//!
//! assert_eq!(compare_values(&Value::Int32(3), &Value::Number(3.5)), Ok(Ordering::Less));
//! assert!(compare_values(&Value::Int32(3), &Value::from("3")).is_err());
//! ```

use crate::error::{RangeError, Result};
use crate::value::Value;
use std::cmp::Ordering;

/// Orders `a` relatively to `b`. Fails when the values have different kinds or when a number is NaN.
pub fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
  use crate::value::Value::*;
  match (a, b) {
    (Int32(x), Int32(y)) => Ok(x.cmp(y)),
    (Int32(x), Long(y)) => Ok((*x as i64).cmp(y)),
    (Long(x), Int32(y)) => Ok(x.cmp(&(*y as i64))),
    (Long(x), Long(y)) => Ok(x.cmp(y)),
    (Int32(x), Number(y)) | (Int32(x), Double(y)) => cmp_int_float(*x as i64, *y),
    (Long(x), Number(y)) | (Long(x), Double(y)) => cmp_int_float(*x, *y),
    (Number(x), Int32(y)) | (Double(x), Int32(y)) => cmp_int_float(*y as i64, *x).map(Ordering::reverse),
    (Number(x), Long(y)) | (Double(x), Long(y)) => cmp_int_float(*y, *x).map(Ordering::reverse),
    (Number(x), Number(y)) | (Number(x), Double(y)) | (Double(x), Number(y)) | (Double(x), Double(y)) =>
      cmp_float(*x, *y),
    (Date(x), Date(y)) => Ok(x.cmp(y)),
    (ObjectId(x), ObjectId(y)) => Ok(x.cmp(y)),
    (Decimal(x), Decimal(y)) => Ok(x.cmp(y)),
    (String(x), String(y)) => Ok(x.cmp(y)),
    (Bool(x), Bool(y)) => Ok(x.cmp(y)),
    _ => Err(RangeError::KindMismatch { left: a.kind(), right: b.kind() })
  }
}

fn cmp_float(x: f64, y: f64) -> Result<Ordering> {
  x.partial_cmp(&y).ok_or_else(|| RangeError::Unordered((if x.is_nan() { x } else { y }).to_string()))
}

// Exact comparison of an integer with a float, `i64 as f64` would round above 2^53.
fn cmp_int_float(x: i64, y: f64) -> Result<Ordering> {
  // 2^63, the first float above every i64.
  const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
  if y.is_nan() {
    Err(RangeError::Unordered(y.to_string()))
  }
  else if y >= TWO_POW_63 {
    Ok(Ordering::Less)
  }
  else if y < -TWO_POW_63 {
    Ok(Ordering::Greater)
  }
  else {
    let integral = y.trunc();
    Ok(x.cmp(&(integral as i64)).then_with(|| {
      let fraction = y - integral;
      if fraction > 0.0 { Ordering::Less }
      else if fraction < 0.0 { Ordering::Greater }
      else { Ordering::Equal }
    }))
  }
}

/// Numeric equality across variants; incomparable values are never equal.
impl PartialEq for Value
{
  fn eq(&self, other: &Value) -> bool {
    compare_values(self, other) == Ok(Ordering::Equal)
  }
}

impl PartialOrd for Value
{
  fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
    compare_values(self, other).ok()
  }
}
