// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Distinct values selected by a constraint.

use crate::constraint::Constraint;
use crate::equality::equal_or_native;
use crate::value::Value;

/// Values a constraint selects one by one: the members of an "is one of" list, the value of an equality, or the `$eq` operand of a range.
///
/// A range without `$eq` and an absent constraint select no distinct value, so they give an empty list. A range is not a `Value` and cannot be returned as its own single member.
pub fn extract_members(constraint: Option<&Constraint>) -> Vec<Value> {
  match constraint {
    None => vec![],
    Some(Constraint::Membership(values)) => values.clone(),
    Some(Constraint::Equality(value)) => vec![value.clone()],
    Some(Constraint::Range(range)) => range.eq_value().cloned().into_iter().collect()
  }
}

pub fn contains_member(constraint: Option<&Constraint>, value: &Value) -> bool {
  extract_members(constraint)
    .iter()
    .any(|member| equal_or_native(member, value))
}
