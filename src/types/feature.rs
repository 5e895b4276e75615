// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off feature toggles.

use std::fmt;

use super::Field;

/// A boolean feature of the unit, backed by a single 0/1 field.
///
/// # Examples
///
/// ```
/// use gree_lib::types::{Feature, Field};
///
/// assert_eq!(Feature::Lights.field(), Field::Lig);
/// assert_eq!(Feature::XFan.name(), "XFan");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Feature {
    /// Display light.
    Lights,
    /// Blow the coil dry after cooling.
    XFan,
    /// Cold plasma ioniser.
    Health,
    /// Energy saving.
    Powersave,
    /// Sleep mode.
    Sleep,
    /// 8 degree frost protection heating.
    EightDegreeHeat,
    /// Fresh air valve.
    Air,
}

impl Feature {
    /// All features.
    pub const ALL: [Self; 7] = [
        Self::Lights,
        Self::XFan,
        Self::Health,
        Self::Powersave,
        Self::Sleep,
        Self::EightDegreeHeat,
        Self::Air,
    ];

    /// Returns the device field backing this feature.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Lights => Field::Lig,
            Self::XFan => Field::Blo,
            Self::Health => Field::Health,
            Self::Powersave => Field::SvSt,
            Self::Sleep => Field::SwhSlp,
            Self::EightDegreeHeat => Field::StHt,
            Self::Air => Field::Air,
        }
    }

    /// Returns the suffix used to name the switch.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lights => "Lights",
            Self::XFan => "XFan",
            Self::Health => "Health",
            Self::Powersave => "Powersave",
            Self::Sleep => "Sleep",
            Self::EightDegreeHeat => "8C",
            Self::Air => "Air",
        }
    }

    /// Decodes the raw field value: 1 is on, 0 is off, anything else unknown.
    #[must_use]
    pub const fn decode(raw: Option<i64>) -> Option<bool> {
        match raw {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
