// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of the unit.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode, decoded positionally from the `Mod` field.
///
/// [`HvacMode::Off`] is never reported by `Mod` itself; it is derived from
/// the power field by [`ClimateState`](crate::state::ClimateState).
///
/// # Examples
///
/// ```
/// use gree_lib::types::HvacMode;
///
/// assert_eq!(HvacMode::from_raw(Some(4)), Some(HvacMode::Heat));
/// assert_eq!(HvacMode::Cool.index(), 1);
/// assert_eq!("fan_only".parse::<HvacMode>().unwrap(), HvacMode::FanOnly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Automatic heat/cool.
    Auto,
    /// Cooling.
    Cool,
    /// Dehumidify.
    Dry,
    /// Fan only.
    FanOnly,
    /// Heating.
    Heat,
    /// Unit off.
    Off,
}

impl HvacMode {
    /// All modes in device index order.
    pub const ALL: [Self; 6] = [
        Self::Auto,
        Self::Cool,
        Self::Dry,
        Self::FanOnly,
        Self::Heat,
        Self::Off,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
            Self::Heat => "heat",
            Self::Off => "off",
        }
    }

    /// Returns the raw `Mod` value for this mode.
    #[must_use]
    pub const fn index(&self) -> i64 {
        *self as i64
    }

    /// Decodes a raw `Mod` value. Null and out-of-range values are unknown.
    #[must_use]
    pub fn from_raw(raw: Option<i64>) -> Option<Self> {
        raw.and_then(|value| Self::try_from(value).ok())
    }
}

impl TryFrom<i64> for HvacMode {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ValueError::UnknownVariant {
                kind: "hvac mode",
                value,
            })
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ValueError::UnknownName {
                kind: "hvac mode",
                name: s.to_string(),
            })
    }
}
