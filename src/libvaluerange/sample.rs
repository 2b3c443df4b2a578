// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sample descriptors: the value summarized by a bucket and how far it spans.

use crate::error::Result;
use crate::interval::Interval;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
  /// The value is the middle of the bucket.
  Centered,
  /// The value is the left edge of the bucket, the right edge is excluded.
  Leading
}

impl Default for Anchor
{
  fn default() -> Anchor {
    Anchor::Centered
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
  pub value: Option<Value>,
  #[serde(default)]
  pub tolerance: f64,
  #[serde(default)]
  pub anchor: Anchor
}

impl Sample
{
  pub fn new<V: Into<Value>>(value: V, tolerance: f64) -> Sample {
    Sample { value: Some(value.into()), tolerance, anchor: Anchor::Centered }
  }

  pub fn point<V: Into<Value>>(value: V) -> Sample {
    Sample::new(value, 0.0)
  }

  /// Histogram bucket `[start, start + width)`.
  pub fn bucket<V: Into<Value>>(start: V, width: f64) -> Sample {
    Sample { value: Some(start.into()), tolerance: width, anchor: Anchor::Leading }
  }

  pub fn missing() -> Sample {
    Sample { value: None, tolerance: 0.0, anchor: Anchor::Centered }
  }

  /// The span of the sample, or `None` when it carries no data (no value, or a NaN number).
  pub fn interval(&self) -> Result<Option<Interval>> {
    let value = match &self.value {
      Some(v) if !v.is_nan() => v,
      _ => {
        debug!(sample = ?self.value, "sample carries no data");
        return Ok(None);
      }
    };
    let interval = match self.anchor {
      Anchor::Centered => Interval::centered(value, self.tolerance)?,
      Anchor::Leading => Interval::leading(value, self.tolerance)?
    };
    Ok(Some(interval))
  }
}
