// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the unit.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the power state reported in the `Pow` field.
///
/// # Examples
///
/// ```
/// use gree_lib::types::PowerState;
///
/// assert_eq!(PowerState::On.as_num(), 1);
/// assert_eq!(PowerState::from_raw(Some(0)), Some(PowerState::Off));
/// assert_eq!(PowerState::from_raw(None), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PowerState {
    /// Unit is off.
    Off,
    /// Unit is on.
    On,
}

impl PowerState {
    /// Returns the display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the raw value used on the wire.
    #[must_use]
    pub const fn as_num(&self) -> i64 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Decodes a raw `Pow` value. Anything other than 0 or 1 is unknown.
    #[must_use]
    pub const fn from_raw(raw: Option<i64>) -> Option<Self> {
        match raw {
            Some(0) => Some(Self::Off),
            Some(1) => Some(Self::On),
            _ => None,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::UnknownName {
                kind: "power state",
                name: s.to_string(),
            }),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
