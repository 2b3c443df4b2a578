// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised while building constraints, intervals and while classifying.

use crate::constraint::Operator;
use crate::value::Kind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
  #[error("cannot compare a {left} value with a {right} value")]
  KindMismatch { left: Kind, right: Kind },

  #[error("`{0}` has no position in the value order")]
  Unordered(String),

  #[error("{kind} values do not support a tolerance of {tolerance}")]
  NoArithmetic { kind: Kind, tolerance: f64 },

  #[error("{0} interval bound is out of range")]
  Overflow(Kind),

  #[error("`{0}` appears more than once")]
  Repeated(Operator),

  #[error("`{first}` and `{second}` bound the same side of the range")]
  DuplicateSide { first: Operator, second: Operator },

  #[error("`{first}` cannot be combined with `{second}`")]
  ConflictingOperators { first: Operator, second: Operator },

  #[error("`$exists` expects a boolean, found a {0} value")]
  ExistsNotBoolean(Kind),

  #[error("range mixes a {lower} lower bound with a {upper} upper bound")]
  MixedBounds { lower: Kind, upper: Kind },

  #[error(transparent)]
  Decimal(#[from] DecimalError),

  #[error(transparent)]
  ObjectId(#[from] ObjectIdError),
}

pub type Result<T> = std::result::Result<T, RangeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecimalError {
  #[error("invalid decimal literal `{0}`")]
  InvalidLiteral(String),

  #[error("`{0}` has more than 34 significant digits")]
  TooManyDigits(String),

  #[error("exponent {0} is outside of [-6176, 6111]")]
  ExponentOutOfRange(i64),

  #[error("decimal arithmetic overflowed")]
  Overflow,

  #[error("{0} cannot be represented as a decimal")]
  NotFinite(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
  #[error("an object id has 24 hexadecimal digits, found {0}")]
  InvalidLength(usize),

  #[error("`{0}` is not a hexadecimal digit")]
  InvalidHex(char),
}
