// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of an interval against a constraint.
//!
//! Each side of a range is judged on its own with the following table (bound `B`, interval `[lo, hi]`), then the verdicts of the two sides are reduced with `min`: a side missing its bound is `Full`.
//!
//! | Operator | Full | Partial | None |
//! |---|---|---|---|
//! | `$gte: B` | `lo ≥ B` | `lo < B ≤ hi` | `hi < B` |
//! | `$gt: B`  | `lo > B` | `lo ≤ B < hi` | `hi ≤ B` |
//! | `$lte: B` | `hi ≤ B` | `lo ≤ B < hi` | `lo > B` |
//! | `$lt: B`  | `hi < B` | `lo < B ≤ hi` | `lo ≥ B` |
//!
//! When the upper bound of the interval is excluded (`[lo, hi)`), `hi` only counts as reaching `B` if `hi > B`.
//!
//! An equality is only `Full` for a singleton interval equal to the value: a wider interval holding the value is `Partial`.

use crate::compare::compare_values;
use crate::constraint::{Bound, Constraint, RangeConstraint};
use crate::equality::equal_or_native;
use crate::error::{RangeError, Result};
use crate::interval::Interval;
use crate::sample::Sample;
use crate::value::Value;
use gcollections::ops::{Bounded, Contains, IsSingleton};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering::*;
use std::fmt;
use tracing::trace;

/// Ordered from the least to the most selected: `None < Partial < Full`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Verdict {
  #[serde(rename = "no")]
  None,
  #[serde(rename = "partial")]
  Partial,
  #[serde(rename = "yes")]
  Full
}

impl Verdict
{
  pub fn as_str(&self) -> &'static str {
    match self {
      Verdict::None => "no",
      Verdict::Partial => "partial",
      Verdict::Full => "yes"
    }
  }
}

impl fmt::Display for Verdict
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Classifies the sample against the constraint. A sample without data is never selected.
pub fn classify_range(constraint: &Constraint, sample: &Sample) -> Result<Verdict> {
  match sample.interval()? {
    Some(interval) => classify(constraint, &interval),
    None => Ok(Verdict::None)
  }
}

pub fn classify(constraint: &Constraint, interval: &Interval) -> Result<Verdict> {
  let verdict = match constraint {
    Constraint::Equality(value) => classify_eq(value, interval)?,
    Constraint::Membership(values) => classify_membership(values, interval)?,
    Constraint::Range(range) => classify_bounds(range, interval)?
  };
  trace!(?constraint, %interval, %verdict, "classified interval");
  Ok(verdict)
}

fn classify_eq(value: &Value, interval: &Interval) -> Result<Verdict> {
  if value.kind() != interval.kind() {
    return Err(RangeError::KindMismatch { left: value.kind(), right: interval.kind() });
  }
  let verdict =
    if interval.is_singleton() {
      if equal_or_native(value, &interval.lower()) { Verdict::Full } else { Verdict::None }
    }
    else if interval.contains(value) { Verdict::Partial }
    else { Verdict::None };
  Ok(verdict)
}

fn classify_membership(values: &[Value], interval: &Interval) -> Result<Verdict> {
  values.iter().try_fold(Verdict::None, |best, value| {
    classify_eq(value, interval).map(|verdict| best.max(verdict))
  })
}

fn classify_bounds(range: &RangeConstraint, interval: &Interval) -> Result<Verdict> {
  if let Some(value) = range.eq_value() {
    return classify_eq(value, interval);
  }
  if range.exists() == Some(false) {
    return Ok(Verdict::None);
  }
  let lower = match range.lower() {
    Some(bound) => lower_side(bound, interval)?,
    None => Verdict::Full
  };
  let upper = match range.upper() {
    Some(bound) => upper_side(bound, interval)?,
    None => Verdict::Full
  };
  Ok(lower.min(upper))
}

fn verdict(full: bool, none: bool) -> Verdict {
  if full { Verdict::Full }
  else if none { Verdict::None }
  else { Verdict::Partial }
}

// `$gte` and `$gt`.
fn lower_side(bound: &Bound, interval: &Interval) -> Result<Verdict> {
  let lo = compare_values(&interval.lower(), bound.value())?;
  let hi = compare_values(&interval.upper(), bound.value())?;
  let full = if bound.is_inclusive() { lo != Less } else { lo == Greater };
  let none =
    if bound.is_inclusive() && !interval.is_upper_open() { hi == Less }
    else { hi != Greater };
  Ok(verdict(full, none))
}

// `$lte` and `$lt`.
fn upper_side(bound: &Bound, interval: &Interval) -> Result<Verdict> {
  let lo = compare_values(&interval.lower(), bound.value())?;
  let hi = compare_values(&interval.upper(), bound.value())?;
  let full =
    if bound.is_inclusive() || interval.is_upper_open() { hi != Greater }
    else { hi == Less };
  let none = if bound.is_inclusive() { lo == Greater } else { lo != Less };
  Ok(verdict(full, none))
}
