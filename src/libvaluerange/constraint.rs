// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Query constraints on a single field.
//!
//! A constraint is a bare value (equality), an "is one of" list (membership) or a set of range operators. Range constraints are built from `(operator, value)` pairs and validated once, at construction:
//!
//! * at most one operator per side (`$gt`/`$gte` for the lower side, `$lt`/`$lte` for the upper side),
//! * both bounds have the same kind,
//! * `$exists` takes a boolean,
//! * `$eq` together with a bound is rejected, or wins over the bounds with `EqPolicy::EqPrecedence`.
//!
//! Unknown operators are ignored.
//!
//! # Examples
//!
//! ```rust
//! use valuerange::{Constraint, Value};
//!
//! assert!(Constraint::range(vec![("$gte", Value::from(15)), ("$lt", Value::from(30))]).is_ok());
//! assert!(Constraint::range(vec![("$gt", Value::from(1)), ("$gte", Value::from(2))]).is_err());
//! ```

use crate::error::{RangeError, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
  Gt,
  Gte,
  Lt,
  Lte,
  Eq,
  Exists
}

impl Operator
{
  pub fn from_symbol(symbol: &str) -> Option<Operator> {
    match symbol {
      "$gt" => Some(Operator::Gt),
      "$gte" => Some(Operator::Gte),
      "$lt" => Some(Operator::Lt),
      "$lte" => Some(Operator::Lte),
      "$eq" => Some(Operator::Eq),
      "$exists" => Some(Operator::Exists),
      _ => None
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Operator::Gt => "$gt",
      Operator::Gte => "$gte",
      Operator::Lt => "$lt",
      Operator::Lte => "$lte",
      Operator::Eq => "$eq",
      Operator::Exists => "$exists"
    }
  }
}

impl fmt::Display for Operator
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// What to do with `$eq` appearing next to `$gt`, `$gte`, `$lt` or `$lte`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EqPolicy {
  Reject,
  /// Keep `$eq` and drop the bounds.
  EqPrecedence
}

impl Default for EqPolicy
{
  fn default() -> EqPolicy {
    EqPolicy::Reject
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintOptions {
  pub eq_policy: EqPolicy
}

/// One side of a range: `$gt`/`$gte` below, `$lt`/`$lte` above.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
  op: Operator,
  value: Value
}

impl Bound
{
  pub fn operator(&self) -> Operator {
    self.op
  }

  pub fn value(&self) -> &Value {
    &self.value
  }

  pub fn is_inclusive(&self) -> bool {
    match self.op {
      Operator::Gte | Operator::Lte => true,
      _ => false
    }
  }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct RangeConstraint {
  lower: Option<Bound>,
  upper: Option<Bound>,
  eq: Option<Value>,
  exists: Option<bool>
}

impl RangeConstraint
{
  pub fn from_operators<I, K>(operators: I, options: &ConstraintOptions) -> Result<RangeConstraint> where
   I: IntoIterator<Item=(K, Value)>,
   K: AsRef<str>
  {
    let mut range = RangeConstraint::default();
    for (symbol, value) in operators {
      let symbol = symbol.as_ref();
      let op = match Operator::from_symbol(symbol) {
        Some(op) => op,
        None => {
          warn!(operator = symbol, "ignoring unsupported range operator");
          continue;
        }
      };
      match op {
        Operator::Gt | Operator::Gte => set_side(&mut range.lower, op, value)?,
        Operator::Lt | Operator::Lte => set_side(&mut range.upper, op, value)?,
        Operator::Eq => {
          if range.eq.is_some() {
            return Err(RangeError::Repeated(op));
          }
          range.eq = Some(value);
        }
        Operator::Exists => {
          if range.exists.is_some() {
            return Err(RangeError::Repeated(op));
          }
          match value {
            Value::Bool(b) => range.exists = Some(b),
            other => return Err(RangeError::ExistsNotBoolean(other.kind()))
          }
        }
      }
    }
    range.validate(options)
  }

  fn validate(mut self, options: &ConstraintOptions) -> Result<RangeConstraint> {
    if self.eq.is_some() {
      let bound = self.lower.as_ref().or_else(|| self.upper.as_ref()).map(Bound::operator);
      if let Some(op) = bound {
        match options.eq_policy {
          EqPolicy::Reject => {
            return Err(RangeError::ConflictingOperators { first: Operator::Eq, second: op });
          }
          EqPolicy::EqPrecedence => {
            debug!(dropped = ?(&self.lower, &self.upper), "`$eq` takes precedence over the range bounds");
            self.lower = None;
            self.upper = None;
          }
        }
      }
    }
    if let (Some(lower), Some(upper)) = (&self.lower, &self.upper) {
      let (lower, upper) = (lower.value.kind(), upper.value.kind());
      if lower != upper {
        return Err(RangeError::MixedBounds { lower, upper });
      }
    }
    Ok(self)
  }

  pub fn lower(&self) -> Option<&Bound> {
    self.lower.as_ref()
  }

  pub fn upper(&self) -> Option<&Bound> {
    self.upper.as_ref()
  }

  pub fn eq_value(&self) -> Option<&Value> {
    self.eq.as_ref()
  }

  pub fn exists(&self) -> Option<bool> {
    self.exists
  }
}

fn set_side(side: &mut Option<Bound>, op: Operator, value: Value) -> Result<()> {
  if let Some(first) = side {
    return Err(
      if first.op == op { RangeError::Repeated(op) }
      else { RangeError::DuplicateSide { first: first.op, second: op } });
  }
  *side = Some(Bound { op, value });
  Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
  Equality(Value),
  Membership(Vec<Value>),
  Range(RangeConstraint)
}

impl Constraint
{
  pub fn equals<V: Into<Value>>(value: V) -> Constraint {
    Constraint::Equality(value.into())
  }

  pub fn one_of<I, V>(values: I) -> Constraint where
   I: IntoIterator<Item=V>,
   V: Into<Value>
  {
    Constraint::Membership(values.into_iter().map(Into::into).collect())
  }

  /// Range constraint with the default options.
  pub fn range<I, K>(operators: I) -> Result<Constraint> where
   I: IntoIterator<Item=(K, Value)>,
   K: AsRef<str>
  {
    Constraint::range_with(operators, &ConstraintOptions::default())
  }

  pub fn range_with<I, K>(operators: I, options: &ConstraintOptions) -> Result<Constraint> where
   I: IntoIterator<Item=(K, Value)>,
   K: AsRef<str>
  {
    RangeConstraint::from_operators(operators, options).map(Constraint::Range)
  }
}

impl From<Value> for Constraint
{
  fn from(value: Value) -> Constraint {
    Constraint::Equality(value)
  }
}

impl From<RangeConstraint> for Constraint
{
  fn from(range: RangeConstraint) -> Constraint {
    Constraint::Range(range)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::Kind;
  use chrono::{TimeZone, Utc};

  fn range(ops: &[(&str, Value)]) -> Result<RangeConstraint> {
    RangeConstraint::from_operators(ops.iter().cloned(), &ConstraintOptions::default())
  }

  #[test]
  fn operator_symbols() {
    for op in &[Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte, Operator::Eq, Operator::Exists] {
      assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
    }
    assert_eq!(Operator::from_symbol("$in"), None);
    assert_eq!(Operator::Gte.to_string(), "$gte");
  }

  #[test]
  fn closed_range() {
    let r = range(&[("$gte", 15.into()), ("$lt", 30.into())]).unwrap();
    let lower = r.lower().unwrap();
    assert_eq!(lower.operator(), Operator::Gte);
    assert!(lower.is_inclusive());
    assert_eq!(lower.value(), &Value::Int32(15));
    let upper = r.upper().unwrap();
    assert_eq!(upper.operator(), Operator::Lt);
    assert!(!upper.is_inclusive());
    assert_eq!(r.eq_value(), None);
    assert_eq!(r.exists(), None);
  }

  #[test]
  fn unknown_operators_are_ignored() {
    let r = range(&[("$gt", 1.into()), ("$near", 3.into()), ("$regex", "a.*".into())]).unwrap();
    assert_eq!(r.lower().map(Bound::operator), Some(Operator::Gt));
    assert_eq!(r.upper(), None);
    assert_eq!(range(&[("$foo", 1.into())]).unwrap(), RangeConstraint::default());
  }

  #[test]
  fn one_operator_per_side() {
    assert_eq!(range(&[("$gt", 1.into()), ("$gte", 2.into())]),
      Err(RangeError::DuplicateSide { first: Operator::Gt, second: Operator::Gte }));
    assert_eq!(range(&[("$lte", 1.into()), ("$lt", 2.into())]),
      Err(RangeError::DuplicateSide { first: Operator::Lte, second: Operator::Lt }));
    assert_eq!(range(&[("$lt", 1.into()), ("$lt", 2.into())]),
      Err(RangeError::Repeated(Operator::Lt)));
    assert_eq!(range(&[("$eq", 1.into()), ("$eq", 2.into())]),
      Err(RangeError::Repeated(Operator::Eq)));
  }

  #[test]
  fn exists_takes_a_boolean() {
    assert_eq!(range(&[("$exists", true.into())]).unwrap().exists(), Some(true));
    assert_eq!(range(&[("$exists", 1.into())]), Err(RangeError::ExistsNotBoolean(Kind::Numeric)));
  }

  #[test]
  fn bounds_share_a_kind() {
    let date = Value::Date(Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(range(&[("$gte", date), ("$lt", 30.into())]),
      Err(RangeError::MixedBounds { lower: Kind::Temporal, upper: Kind::Numeric }));
    // Numeric variants mix freely.
    assert!(range(&[("$gte", 1.5.into()), ("$lt", Value::Long(30))]).is_ok());
  }

  #[test]
  fn eq_with_bounds() {
    let ops = [("$eq", Value::from(5)), ("$lt", Value::from(30))];
    assert_eq!(range(&ops), Err(RangeError::ConflictingOperators { first: Operator::Eq, second: Operator::Lt }));

    let options = ConstraintOptions { eq_policy: EqPolicy::EqPrecedence };
    let r = RangeConstraint::from_operators(ops.iter().cloned(), &options).unwrap();
    assert_eq!(r.eq_value(), Some(&Value::Int32(5)));
    assert_eq!(r.lower(), None);
    assert_eq!(r.upper(), None);
  }

  #[test]
  fn constructors() {
    assert_eq!(Constraint::equals("x"), Constraint::Equality(Value::from("x")));
    assert_eq!(Constraint::one_of(vec![1, 2, 3]),
      Constraint::Membership(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)]));
    assert_eq!(Constraint::from(Value::Int32(5)), Constraint::equals(5));
    let owned_keys = vec![("$gte".to_string(), Value::from(1))];
    assert!(Constraint::range(owned_keys).is_ok());
  }

  #[test]
  fn options_deserialize_with_defaults() {
    use serde_test::{assert_de_tokens, Token};
    assert_de_tokens(&ConstraintOptions::default(), &[
      Token::Struct { name: "ConstraintOptions", len: 0 },
      Token::StructEnd
    ]);
    assert_de_tokens(&ConstraintOptions { eq_policy: EqPolicy::EqPrecedence }, &[
      Token::Struct { name: "ConstraintOptions", len: 1 },
      Token::Str("eq_policy"),
      Token::UnitVariant { name: "EqPolicy", variant: "eq-precedence" },
      Token::StructEnd
    ]);
  }
}
