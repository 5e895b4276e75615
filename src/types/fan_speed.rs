// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type.
//!
//! The device stores the fan speed in `WdSpd` as an index into a fixed list.
//! The last two entries, turbo and quiet, are not set through `WdSpd` but
//! through the separate `Tur` and `Quiet` flags, which take priority when
//! reading the effective fan mode.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Fan speed.
///
/// # Examples
///
/// ```
/// use gree_lib::types::FanSpeed;
///
/// assert_eq!(FanSpeed::from_raw(Some(2)), Some(FanSpeed::MediumLow));
/// assert_eq!(FanSpeed::MediumLow.as_str(), "Medium-Low");
/// assert_eq!(FanSpeed::from_raw(None), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FanSpeed {
    /// Automatic.
    Auto,
    /// Low.
    Low,
    /// Medium-low.
    MediumLow,
    /// Medium.
    Medium,
    /// Medium-high.
    MediumHigh,
    /// High.
    High,
    /// Turbo, set through the `Tur` flag.
    Turbo,
    /// Quiet, set through the `Quiet` flag.
    Quiet,
}

impl FanSpeed {
    /// All speeds in device index order.
    pub const ALL: [Self; 8] = [
        Self::Auto,
        Self::Low,
        Self::MediumLow,
        Self::Medium,
        Self::MediumHigh,
        Self::High,
        Self::Turbo,
        Self::Quiet,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Low => "Low",
            Self::MediumLow => "Medium-Low",
            Self::Medium => "Medium",
            Self::MediumHigh => "Medium-High",
            Self::High => "High",
            Self::Turbo => "Turbo",
            Self::Quiet => "Quiet",
        }
    }

    /// Returns the raw `WdSpd` value for this speed.
    #[must_use]
    pub const fn index(&self) -> i64 {
        *self as i64
    }

    /// Decodes a raw `WdSpd` value. Null and out-of-range values are unknown.
    #[must_use]
    pub fn from_raw(raw: Option<i64>) -> Option<Self> {
        raw.and_then(|value| Self::try_from(value).ok())
    }
}

impl TryFrom<i64> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ValueError::UnknownVariant {
                kind: "fan speed",
                value,
            })
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|speed| speed.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ValueError::UnknownName {
                kind: "fan speed",
                name: s.to_string(),
            })
    }
}
