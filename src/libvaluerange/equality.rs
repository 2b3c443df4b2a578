// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Equality of typed scalars.
//!
//! `values_equal` only has an opinion on the variants carrying a storage type: object ids, decimals, longs, 32-bit integers and doubles. For every other value it answers `SKleene::Unknown` and the caller falls back to the native equality of `Value`, which is what `equal_or_native` does.
//!
//! Decimals and longs are equal when their canonical strings are equal, so `1.5` and `1.50` are different decimals here although they have the same position in the value order.

use crate::object_id::ObjectId;
use crate::value::Value;
use trilean::SKleene;

fn kleene(b: bool) -> SKleene {
  if b { SKleene::True } else { SKleene::False }
}

pub fn values_equal(a: &Value, b: &Value) -> SKleene {
  match a {
    Value::ObjectId(x) => kleene(match b {
      Value::ObjectId(y) => x == y,
      Value::String(hex) => hex.parse::<ObjectId>().map_or(false, |y| *x == y),
      _ => false
    }),
    Value::Decimal(_) | Value::Long(_) => kleene(a.to_string() == b.to_string()),
    Value::Int32(_) | Value::Double(_) => kleene(a.as_f64() == b.as_f64()),
    _ => SKleene::Unknown
  }
}

/// Resolves `values_equal`, deferring to `Value`'s `PartialEq` when the typed comparison has no opinion.
pub fn equal_or_native(a: &Value, b: &Value) -> bool {
  match values_equal(a, b) {
    SKleene::True => true,
    SKleene::False => false,
    SKleene::Unknown => a == b
  }
}
