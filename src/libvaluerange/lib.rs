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

//! This library tells how much of a sampled value bucket a query constraint selects: all of it (`yes`), some of it (`partial`) or nothing (`no`). Values are numbers, dates, object ids, decimals, strings and booleans; the bucket is an interval built around (or starting at) a sampled value.
//!
//! # Examples
//!
//! ```
//! use valuerange::{classify_range, Constraint, Sample, Value, Verdict};
//!
//! let query = Constraint::range(vec![("$gte", Value::from(15)), ("$lt", Value::from(30))]).unwrap();
//! assert_eq!(classify_range(&query, &Sample::new(20, 5.0)), Ok(Verdict::Full));
//! assert_eq!(classify_range(&query, &Sample::new(30, 5.0)), Ok(Verdict::Partial));
//! assert_eq!(classify_range(&query, &Sample::bucket(30, 5.0)), Ok(Verdict::None));
//! ```
//!
//! Values of different kinds are not comparable:
//!
//! ```
//! use valuerange::{compare_values, Decimal, Value};
//!
//! let d: Decimal = "1.5".parse().unwrap();
//! assert!(compare_values(&Value::Decimal(d), &Value::Number(1.5)).is_err());
//! ```

pub mod classify;
pub mod compare;
pub mod constraint;
pub mod decimal;
pub mod equality;
pub mod error;
pub mod interval;
pub mod members;
pub mod object_id;
pub mod sample;
pub mod value;

pub use crate::classify::{classify, classify_range, Verdict};
pub use crate::compare::compare_values;
pub use crate::constraint::{Bound, Constraint, ConstraintOptions, EqPolicy, Operator, RangeConstraint};
pub use crate::decimal::Decimal;
pub use crate::equality::{equal_or_native, values_equal};
pub use crate::error::{DecimalError, ObjectIdError, RangeError, Result};
pub use crate::interval::Interval;
pub use crate::members::{contains_member, extract_members};
pub use crate::object_id::ObjectId;
pub use crate::sample::{Anchor, Sample};
pub use crate::value::{Kind, Value};
