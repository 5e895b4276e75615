// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical swing position.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Vertical swing position, decoded positionally from `SwUpDn`.
///
/// # Examples
///
/// ```
/// use gree_lib::types::SwingMode;
///
/// assert_eq!(SwingMode::from_raw(Some(1)), Some(SwingMode::FullRange));
/// assert_eq!(SwingMode::FixedMiddle.index(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SwingMode {
    /// Device default.
    Default,
    /// Swing in full range.
    FullRange,
    /// Fixed in the upmost position.
    FixedUpmost,
    /// Fixed in the middle-up position.
    FixedMiddleUp,
    /// Fixed in the middle position.
    FixedMiddle,
    /// Fixed in the middle-low position.
    FixedMiddleLow,
    /// Fixed in the lowest position.
    FixedLowest,
    /// Swing in the downmost region.
    SwingDownmost,
    /// Swing in the middle-low region.
    SwingMiddleLow,
    /// Swing in the middle region.
    SwingMiddle,
    /// Swing in the middle-up region.
    SwingMiddleUp,
    /// Swing in the upmost region.
    SwingUpmost,
}

impl SwingMode {
    /// All positions in device index order.
    pub const ALL: [Self; 12] = [
        Self::Default,
        Self::FullRange,
        Self::FixedUpmost,
        Self::FixedMiddleUp,
        Self::FixedMiddle,
        Self::FixedMiddleLow,
        Self::FixedLowest,
        Self::SwingDownmost,
        Self::SwingMiddleLow,
        Self::SwingMiddle,
        Self::SwingMiddleUp,
        Self::SwingUpmost,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::FullRange => "Swing in full range",
            Self::FixedUpmost => "Fixed in the upmost position",
            Self::FixedMiddleUp => "Fixed in the middle-up position",
            Self::FixedMiddle => "Fixed in the middle position",
            Self::FixedMiddleLow => "Fixed in the middle-low position",
            Self::FixedLowest => "Fixed in the lowest position",
            Self::SwingDownmost => "Swing in the downmost region",
            Self::SwingMiddleLow => "Swing in the middle-low region",
            Self::SwingMiddle => "Swing in the middle region",
            Self::SwingMiddleUp => "Swing in the middle-up region",
            Self::SwingUpmost => "Swing in the upmost region",
        }
    }

    /// Returns the raw `SwUpDn` value for this position.
    #[must_use]
    pub const fn index(&self) -> i64 {
        *self as i64
    }

    /// Decodes a raw `SwUpDn` value. Null and out-of-range values are unknown.
    #[must_use]
    pub fn from_raw(raw: Option<i64>) -> Option<Self> {
        raw.and_then(|value| Self::try_from(value).ok())
    }
}

impl TryFrom<i64> for SwingMode {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ValueError::UnknownVariant {
                kind: "swing mode",
                value,
            })
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|mode| mode.as_str() == s)
            .copied()
            .ok_or_else(|| ValueError::UnknownName {
                kind: "swing mode",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_positions_decode() {
        for (i, mode) in SwingMode::ALL.iter().enumerate() {
            let raw = i64::try_from(i).unwrap();
            assert_eq!(SwingMode::from_raw(Some(raw)), Some(*mode));
        }
        assert_eq!(SwingMode::from_raw(Some(12)), None);
        assert_eq!(SwingMode::from_raw(None), None);
    }

    #[test]
    fn parse_display_names() {
        assert_eq!(
            "Swing in the middle region".parse::<SwingMode>().unwrap(),
            SwingMode::SwingMiddle
        );
        assert!("Sideways".parse::<SwingMode>().is_err());
    }
}
