// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Opaque 12-byte identifiers, totally ordered by their bytes.
//!
//! The canonical form is 24 lowercase hexadecimal digits. Identifiers can be compared and tested for equality but have no arithmetic.

use crate::error::ObjectIdError;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
  bytes: [u8; 12]
}

impl ObjectId
{
  pub fn from_bytes(bytes: [u8; 12]) -> ObjectId {
    ObjectId { bytes }
  }

  pub fn bytes(&self) -> [u8; 12] {
    self.bytes
  }
}

fn hex_digit(c: char) -> Result<u8, ObjectIdError> {
  c.to_digit(16)
    .map(|d| d as u8)
    .ok_or(ObjectIdError::InvalidHex(c))
}

impl FromStr for ObjectId
{
  type Err = ObjectIdError;

  fn from_str(s: &str) -> Result<ObjectId, ObjectIdError> {
    let digits: Vec<char> = s.chars().collect();
    if digits.len() != 24 {
      return Err(ObjectIdError::InvalidLength(digits.len()));
    }
    let mut bytes = [0u8; 12];
    for (byte, pair) in bytes.iter_mut().zip(digits.chunks(2)) {
      *byte = hex_digit(pair[0])? << 4 | hex_digit(pair[1])?;
    }
    Ok(ObjectId { bytes })
  }
}

impl fmt::Display for ObjectId
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for byte in &self.bytes {
      write!(f, "{:02x}", byte)?;
    }
    Ok(())
  }
}

impl fmt::Debug for ObjectId
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "ObjectId({})", self)
  }
}

impl Serialize for ObjectId
{
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where
   S: Serializer
  {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ObjectId
{
  fn deserialize<D>(deserializer: D) -> Result<ObjectId, D::Error> where
   D: Deserializer<'de>
  {
    let hex = String::deserialize(deserializer)?;
    hex.parse().map_err(de::Error::custom)
  }
}
