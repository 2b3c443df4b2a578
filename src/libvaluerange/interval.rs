// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interval of values spanned by a sample.
//!
//! An interval is closed `[lb, ub]` or, for leading-edge buckets, right-open `[lb, ub)`. A zero-width interval is always the closed singleton `[x, x]`. The bounds are computed with the arithmetic of the value kind:
//!
//! * numbers: `f64` sum, the bounds are `Value::Number`,
//! * dates: the tolerance is a number of milliseconds,
//! * decimals: exact decimal sum,
//! * object ids, strings and booleans: only a zero tolerance is accepted.
//!
//! # Examples
//!
//! ```rust
//! use gcollections::ops::*;
//! use valuerange::{Interval, Value};
//!
//! let i = Interval::centered(&Value::Int32(20), 5.0).unwrap();
//! assert_eq!(i.lower(), Value::Number(15.0));
//! assert_eq!(i.upper(), Value::Number(25.0));
//! assert!(i.contains(&Value::Int32(25)));
//!
//! let bucket = Interval::leading(&Value::Int32(20), 5.0).unwrap();
//! assert!(!bucket.contains(&Value::Int32(25)));
//! ```

use crate::compare::compare_values;
use crate::decimal::Decimal;
use crate::error::{RangeError, Result};
use crate::value::{Kind, Value};
use chrono::Duration;
use gcollections::kind::Collection;
use gcollections::ops::{Bounded, Contains, IsSingleton};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
  lb: Value,
  ub: Value,
  ub_open: bool
}

impl Interval
{
  pub fn singleton(x: Value) -> Interval {
    Interval { lb: x.clone(), ub: x, ub_open: false }
  }

  /// `[center - tolerance, center + tolerance]`. A negative or NaN tolerance counts as zero.
  pub fn centered(center: &Value, tolerance: f64) -> Result<Interval> {
    let tolerance = non_negative(tolerance);
    if tolerance == 0.0 {
      Ok(Interval::singleton(center.clone()))
    }
    else {
      Ok(Interval {
        lb: shift(center, -tolerance)?,
        ub: shift(center, tolerance)?,
        ub_open: false
      })
    }
  }

  /// `[start, start + width)`. A negative or NaN width counts as zero.
  pub fn leading(start: &Value, width: f64) -> Result<Interval> {
    let width = non_negative(width);
    if width == 0.0 {
      Ok(Interval::singleton(start.clone()))
    }
    else {
      Ok(Interval {
        lb: start.clone(),
        ub: shift(start, width)?,
        ub_open: true
      })
    }
  }

  pub fn kind(&self) -> Kind {
    self.lb.kind()
  }

  /// True if the upper bound is excluded. Singletons are always closed, even when built from a bucket whose width got absorbed by the magnitude of its start.
  pub fn is_upper_open(&self) -> bool {
    self.ub_open && !self.is_singleton()
  }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

fn non_negative(x: f64) -> f64 {
  if x.is_nan() || x < 0.0 { 0.0 } else { x }
}

fn shift(x: &Value, delta: f64) -> Result<Value> {
  match x {
    Value::Date(t) => {
      let micros = (delta * 1000.0).round() as i64;
      t.checked_add_signed(Duration::microseconds(micros))
        .map(Value::Date)
        .ok_or(RangeError::Overflow(Kind::Temporal))
    }
    Value::Decimal(d) => {
      let delta = Decimal::from_f64(delta)?;
      d.checked_add(&delta)
        .map(Value::Decimal)
        .map_err(|_| RangeError::Overflow(Kind::Decimal))
    }
    Value::Long(n) if delta.fract() == 0.0 && delta.abs() < TWO_POW_63 => {
      // Whole tolerances keep 64-bit bounds exact.
      Ok(n.checked_add(delta as i64).map_or(Value::Number(*n as f64 + delta), Value::Long))
    }
    _ => match x.as_f64() {
      Some(n) => Ok(Value::Number(n + delta)),
      None => Err(RangeError::NoArithmetic { kind: x.kind(), tolerance: delta.abs() })
    }
  }
}

impl Collection for Interval
{
  type Item = Value;
}

impl Bounded for Interval
{
  fn lower(&self) -> Value {
    self.lb.clone()
  }

  fn upper(&self) -> Value {
    self.ub.clone()
  }
}

impl IsSingleton for Interval
{
  fn is_singleton(&self) -> bool {
    self.lb == self.ub
  }
}

/// Values of another kind are never contained.
impl Contains for Interval
{
  fn contains(&self, value: &Value) -> bool {
    let above_lb = match compare_values(&self.lb, value) {
      Ok(Ordering::Less) | Ok(Ordering::Equal) => true,
      _ => false
    };
    let below_ub = match compare_values(value, &self.ub) {
      Ok(Ordering::Less) => true,
      Ok(Ordering::Equal) => !self.is_upper_open(),
      _ => false
    };
    above_lb && below_ub
  }
}

impl fmt::Display for Interval
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let close = if self.is_upper_open() { ")" } else { "]" };
    write!(f, "[{}, {}{}", self.lb, self.ub, close)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn num(x: f64) -> Value {
    Value::Number(x)
  }

  fn dec(s: &str) -> Value {
    Value::Decimal(s.parse().unwrap())
  }

  #[test]
  fn centered_numbers() {
    let i = Interval::centered(&Value::Int32(20), 5.0).unwrap();
    assert_eq!(i.lower(), num(15.0));
    assert_eq!(i.upper(), num(25.0));
    assert!(!i.is_singleton());
    assert!(!i.is_upper_open());
    assert_eq!(i.to_string(), "[15, 25]");

    let zero = Interval::centered(&Value::Int32(20), 0.0).unwrap();
    assert_eq!(zero, Interval::singleton(Value::Int32(20)));
    assert!(zero.is_singleton());
  }

  #[test]
  fn tolerance_is_clamped() {
    let x = Value::Number(7.0);
    assert_eq!(Interval::centered(&x, -3.0).unwrap(), Interval::singleton(x.clone()));
    assert_eq!(Interval::centered(&x, f64::NAN).unwrap(), Interval::singleton(x.clone()));
    assert_eq!(Interval::leading(&x, -1.0).unwrap(), Interval::singleton(x));
  }

  #[test]
  fn leading_buckets() {
    let i = Interval::leading(&num(10.0), 5.0).unwrap();
    assert_eq!(i.lower(), num(10.0));
    assert_eq!(i.upper(), num(15.0));
    assert!(i.is_upper_open());
    assert_eq!(i.to_string(), "[10, 15)");
    assert!(i.contains(&num(10.0)));
    assert!(i.contains(&num(14.999)));
    assert!(!i.contains(&num(15.0)));
    assert!(!i.contains(&num(9.0)));
  }

  #[test]
  fn absorbed_width_is_a_singleton() {
    let i = Interval::leading(&num(1e20), 1.0).unwrap();
    assert!(i.is_singleton());
    assert!(!i.is_upper_open());
    assert!(i.contains(&num(1e20)));
  }

  #[test]
  fn contains_closed() {
    let i = Interval::centered(&num(0.0), 10.0).unwrap();
    for x in &[-10.0, -3.5, 0.0, 10.0] {
      assert!(i.contains(&num(*x)), "{} should be inside {}", x, i);
    }
    for x in &[-10.01, 10.5, f64::NAN] {
      assert!(!i.contains(&num(*x)), "{} should be outside {}", x, i);
    }
    assert!(!i.contains(&Value::from("0")));
  }

  #[test]
  fn dates_use_milliseconds() {
    let t = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
    let i = Interval::centered(&Value::Date(t), 1500.0).unwrap();
    assert_eq!(i.lower(), Value::Date(t - Duration::milliseconds(1500)));
    assert_eq!(i.upper(), Value::Date(t + Duration::milliseconds(1500)));
    assert_eq!(Interval::centered(&Value::Date(t), 1e300).unwrap_err(), RangeError::Overflow(Kind::Temporal));
  }

  #[test]
  fn decimals_are_exact() {
    let i = Interval::centered(&dec("1.8"), 0.1).unwrap();
    assert_eq!(i.lower().to_string(), "1.7");
    assert_eq!(i.upper().to_string(), "1.9");
    let p = Interval::centered(&dec("1.50"), 0.0).unwrap();
    assert_eq!(p.lower().to_string(), "1.50");
    let far = Interval::centered(&dec("1E+40"), 1.0).unwrap();
    assert_eq!(far.lower().to_string(), "1.000000000000000000000000000000000E+40");
    assert_eq!(far.upper().to_string(), "1.000000000000000000000000000000000E+40");
    assert!(far.is_singleton());

    let wide = Interval::centered(&dec("12345678901234567890123456789012.34"), 0.006).unwrap();
    assert_eq!(wide.lower().to_string(), "12345678901234567890123456789012.33");
    assert_eq!(wide.upper().to_string(), "12345678901234567890123456789012.35");

    let tiny = Interval::leading(&dec("1E-6000"), 1e6).unwrap();
    assert_eq!(tiny.upper().to_string(), "1000000.000000000000000000000000000");
  }

  #[test]
  fn longs_stay_exact() {
    let big = 9_007_199_254_740_993i64;
    let i = Interval::centered(&Value::Long(big), 1.0).unwrap();
    assert_eq!(i.lower(), Value::Long(big - 1));
    assert_eq!(i.upper(), Value::Long(big + 1));
    let near_max = Interval::leading(&Value::Long(i64::max_value() - 1), 3.0).unwrap();
    assert_eq!(near_max.upper().kind(), Kind::Numeric);
    assert!(near_max.contains(&Value::Long(i64::max_value())));
    let half = Interval::centered(&Value::Long(10), 0.5).unwrap();
    assert_eq!(half.lower(), Value::Number(9.5));
  }

  #[test]
  fn kinds_without_arithmetic() {
    let id = Value::ObjectId("578cfb38d5021e616087f53f".parse().unwrap());
    assert_eq!(Interval::centered(&id, 0.0).unwrap(), Interval::singleton(id.clone()));
    assert_eq!(Interval::centered(&id, 2.0).unwrap_err(),
      RangeError::NoArithmetic { kind: Kind::OpaqueOrdered, tolerance: 2.0 });
    assert_eq!(Interval::leading(&Value::from("a"), 1.0).unwrap_err(),
      RangeError::NoArithmetic { kind: Kind::Other, tolerance: 1.0 });
  }
}
