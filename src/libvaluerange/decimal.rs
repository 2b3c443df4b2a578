// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 128-bit decimal floating point numbers.
//!
//! A `Decimal` is `(-1)^sign * coefficient * 10^exponent` with at most 34 significant digits and an exponent in `[-6176, 6111]`. Two decimals with the same numeric value can have different representations (`1.5` and `1.50`): they are equal for `Ord` and `PartialEq` but their canonical strings differ, which is what value equality relies on.
//!
//! Ordering is computed on the coefficient and exponent, never through a conversion to `f64`.
//!
//! # Examples
//!
//! ```rust
//! use valuerange::Decimal;
//!
//! let a: Decimal = "1.5".parse().unwrap();
//! let b: Decimal = "1.50".parse().unwrap();
//! assert_eq!(a, b);
//! assert_ne!(a.to_string(), b.to_string());
//! assert_eq!(a.checked_add(&"0.25".parse().unwrap()).unwrap().to_string(), "1.75");
//! ```

use crate::error::DecimalError;
use num_integer::Integer;
use num_traits::{checked_pow, Zero};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::{max, min, Ordering};
use std::fmt;
use std::str::FromStr;

const MAX_DIGITS: usize = 34;
const MIN_EXPONENT: i64 = -6176;
const MAX_EXPONENT: i64 = 6111;
const WORKING_DIGITS: usize = 37;

#[derive(Debug, Clone, Copy)]
pub struct Decimal {
  negative: bool,
  coefficient: u128,
  exponent: i32
}

impl Decimal
{
  pub fn new(negative: bool, coefficient: u128, exponent: i32) -> Result<Decimal, DecimalError> {
    if digit_count(coefficient) > MAX_DIGITS {
      return Err(DecimalError::TooManyDigits(coefficient.to_string()));
    }
    check_exponent(exponent as i64)?;
    Ok(Decimal { negative, coefficient, exponent })
  }

  pub fn zero() -> Decimal {
    Decimal { negative: false, coefficient: 0, exponent: 0 }
  }

  /// Converts through the shortest decimal representation of `x`, so `0.1` becomes `0.1` and not the binary approximation.
  pub fn from_f64(x: f64) -> Result<Decimal, DecimalError> {
    if !x.is_finite() {
      return Err(DecimalError::NotFinite(x));
    }
    x.to_string().parse()
  }

  pub fn is_zero(&self) -> bool {
    self.coefficient.is_zero()
  }

  pub fn is_sign_negative(&self) -> bool {
    self.negative
  }

  pub fn coefficient(&self) -> u128 {
    self.coefficient
  }

  pub fn exponent(&self) -> i32 {
    self.exponent
  }

  pub fn negate(&self) -> Decimal {
    Decimal { negative: !self.negative, ..*self }
  }

  /// Sum rounded to 34 significant digits, ties to even. Only fails when the exponent of the result goes past 6111.
  pub fn checked_add(&self, rhs: &Decimal) -> Result<Decimal, DecimalError> {
    let (hi, lo) = if self.exponent >= rhs.exponent { (self, rhs) } else { (rhs, self) };
    if hi.is_zero() {
      return Ok(
        if lo.is_zero() { Decimal { negative: hi.negative && lo.negative, coefficient: 0, exponent: lo.exponent } }
        else { *lo });
    }
    // `hi` is rescaled to at most 37 digits, the digits of `lo` below that scale only count for rounding.
    let gap = (hi.exponent as i64 - lo.exponent as i64) as usize;
    let scale = min(gap, WORKING_DIGITS - digit_count(hi.coefficient));
    let exponent = hi.exponent as i64 - scale as i64;
    let high = (hi.coefficient * pow10(scale)) as i128;
    let (low, sticky) =
      if scale == gap { (lo.coefficient, false) }
      else {
        match checked_pow(10u128, gap - scale) {
          Some(unit) => {
            let (quotient, remainder) = lo.coefficient.div_rem(&unit);
            (quotient, !remainder.is_zero())
          }
          None => (0, !lo.is_zero())
        }
      };
    let high = if hi.negative { -high } else { high };
    let low = if lo.negative { -(low as i128) } else { low as i128 };
    let mut sum = high + low;
    if sticky && hi.negative != lo.negative {
      // The dropped digits of `lo` pull the sum towards zero.
      sum -= sum.signum();
    }
    let negative = if sum == 0 { self.negative && rhs.negative } else { sum < 0 };
    rounded(negative, sum.unsigned_abs(), exponent, sticky)
  }

  pub fn checked_sub(&self, rhs: &Decimal) -> Result<Decimal, DecimalError> {
    self.checked_add(&rhs.negate())
  }

  // Coefficient without trailing zeros, and the matching exponent.
  fn normalized(&self) -> (u128, i64) {
    let mut coefficient = self.coefficient;
    let mut exponent = self.exponent as i64;
    while !coefficient.is_zero() {
      let (quotient, remainder) = coefficient.div_rem(&10);
      if !remainder.is_zero() {
        break;
      }
      coefficient = quotient;
      exponent += 1;
    }
    (coefficient, exponent)
  }

  fn cmp_magnitude(&self, other: &Decimal) -> Ordering {
    let (a, a_exp) = self.normalized();
    let (b, b_exp) = other.normalized();
    let (a_len, b_len) = (digit_count(a), digit_count(b));
    let a_adjusted = a_exp + a_len as i64;
    let b_adjusted = b_exp + b_len as i64;
    a_adjusted.cmp(&b_adjusted).then_with(|| {
      let width = max(a_len, b_len);
      pad(a, width - a_len).cmp(&pad(b, width - b_len))
    })
  }
}

fn digit_count(mut x: u128) -> usize {
  let mut count = 1;
  while x >= 10 {
    x /= 10;
    count += 1;
  }
  count
}

// `sticky` is set when non-zero digits below the coefficient were dropped. The sum then has at least two digits to discard.
fn rounded(negative: bool, mut coefficient: u128, mut exponent: i64, sticky: bool) -> Result<Decimal, DecimalError> {
  let excess = digit_count(coefficient).saturating_sub(MAX_DIGITS);
  if excess > 0 {
    let unit = pow10(excess);
    let (quotient, remainder) = coefficient.div_rem(&unit);
    let half = unit / 2;
    let up = remainder > half || (remainder == half && (sticky || quotient.is_odd()));
    coefficient = if up { quotient + 1 } else { quotient };
    exponent += excess as i64;
    if digit_count(coefficient) > MAX_DIGITS {
      coefficient /= 10;
      exponent += 1;
    }
  }
  while exponent > MAX_EXPONENT && !coefficient.is_zero() && digit_count(coefficient) < MAX_DIGITS {
    coefficient *= 10;
    exponent -= 1;
  }
  if exponent > MAX_EXPONENT {
    if !coefficient.is_zero() {
      return Err(DecimalError::Overflow);
    }
    exponent = MAX_EXPONENT;
  }
  Ok(Decimal { negative, coefficient, exponent: exponent as i32 })
}

// Only called with `n <= 38`.
fn pow10(n: usize) -> u128 {
  10u128.pow(n as u32)
}

// `width` never exceeds 34 digits so this cannot overflow.
fn pad(coefficient: u128, zeros: usize) -> u128 {
  coefficient * pow10(zeros)
}

fn check_exponent(exponent: i64) -> Result<(), DecimalError> {
  if exponent < MIN_EXPONENT || exponent > MAX_EXPONENT {
    Err(DecimalError::ExponentOutOfRange(exponent))
  }
  else {
    Ok(())
  }
}

impl FromStr for Decimal
{
  type Err = DecimalError;

  fn from_str(s: &str) -> Result<Decimal, DecimalError> {
    let invalid = || DecimalError::InvalidLiteral(s.to_string());
    let (negative, rest) = match s.as_bytes().first() {
      Some(b'-') => (true, &s[1..]),
      Some(b'+') => (false, &s[1..]),
      _ => (false, s)
    };
    let (mantissa, exp) = match rest.find(|c: char| c == 'e' || c == 'E') {
      Some(i) => (&rest[..i], rest[i+1..].parse::<i64>().map_err(|_| invalid())?),
      None => (rest, 0)
    };
    let (int_part, frac_part) = match mantissa.find('.') {
      Some(i) => (&mantissa[..i], &mantissa[i+1..]),
      None => (mantissa, "")
    };
    if int_part.is_empty() && frac_part.is_empty() {
      return Err(invalid());
    }
    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
      return Err(invalid());
    }
    let mut significant = digits.trim_start_matches('0');
    let mut exponent = exp.checked_sub(frac_part.len() as i64).ok_or_else(invalid)?;
    // Trailing zeros are only folded into the exponent when the literal would not fit otherwise.
    if significant.len() > MAX_DIGITS {
      let trimmed = significant.trim_end_matches('0');
      if trimmed.len() > MAX_DIGITS {
        return Err(DecimalError::TooManyDigits(s.to_string()));
      }
      exponent = exponent.saturating_add((significant.len() - trimmed.len()) as i64);
      significant = trimmed;
    }
    let coefficient =
      if significant.is_empty() { 0 }
      else { significant.parse::<u128>().map_err(|_| invalid())? };
    check_exponent(exponent)?;
    Ok(Decimal { negative, coefficient, exponent: exponent as i32 })
  }
}

impl fmt::Display for Decimal
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.negative {
      f.write_str("-")?;
    }
    let digits = self.coefficient.to_string();
    let exponent = self.exponent as i64;
    let adjusted = exponent + digits.len() as i64 - 1;
    if exponent <= 0 && adjusted >= -6 {
      if exponent == 0 {
        return f.write_str(&digits);
      }
      let point = digits.len() as i64 + exponent;
      if point > 0 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        write!(f, "{}.{}", int_part, frac_part)
      }
      else {
        write!(f, "0.{}{}", "0".repeat((-point) as usize), digits)
      }
    }
    else {
      let (first, rest) = digits.split_at(1);
      f.write_str(first)?;
      if !rest.is_empty() {
        write!(f, ".{}", rest)?;
      }
      write!(f, "E{:+}", adjusted)
    }
  }
}

impl Ord for Decimal
{
  fn cmp(&self, other: &Decimal) -> Ordering {
    match (self.is_zero(), other.is_zero()) {
      (true, true) => Ordering::Equal,
      (true, false) => if other.negative { Ordering::Greater } else { Ordering::Less },
      (false, true) => if self.negative { Ordering::Less } else { Ordering::Greater },
      (false, false) => match (self.negative, other.negative) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => self.cmp_magnitude(other).reverse(),
        (false, false) => self.cmp_magnitude(other)
      }
    }
  }
}

impl PartialOrd for Decimal
{
  fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for Decimal
{
  fn eq(&self, other: &Decimal) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Decimal {}

impl Serialize for Decimal
{
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where
   S: Serializer
  {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Decimal
{
  fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error> where
   D: Deserializer<'de>
  {
    let literal = String::deserialize(deserializer)?;
    literal.parse().map_err(de::Error::custom)
  }
}
