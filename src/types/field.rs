// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device field identifiers.
//!
//! Gree devices expose their state as a flat list of named integer columns.
//! [`Field`] is the closed set of columns this library polls, declared in
//! the exact order they are requested on the wire. The declaration order is
//! also the `Ord` order, so sorted collections of fields come out in wire
//! order.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A named device field.
///
/// # Examples
///
/// ```
/// use gree_lib::types::Field;
///
/// assert_eq!(Field::SetTem.wire_name(), "SetTem");
/// assert_eq!(Field::SetTem.position(), 2);
/// assert_eq!("WdSpd".parse::<Field>().unwrap(), Field::WdSpd);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Field {
    /// Power (0 = off, 1 = on).
    Pow,
    /// Operating mode index.
    Mod,
    /// Target temperature as stored by the device.
    SetTem,
    /// Fan speed index.
    WdSpd,
    /// Fresh air valve.
    Air,
    /// X-Fan (blow dry after cooling).
    Blo,
    /// Health (cold plasma) mode.
    Health,
    /// Sleep mode switch.
    SwhSlp,
    /// Display light.
    Lig,
    /// Horizontal swing.
    SwingLfRig,
    /// Vertical swing position index.
    SwUpDn,
    /// Quiet fan.
    Quiet,
    /// Turbo fan.
    Tur,
    /// 8 degree frost protection heating.
    StHt,
    /// Temperature unit.
    TemUn,
    /// Heat/cool type.
    HeatCoolType,
    /// Temperature record bit.
    TemRec,
    /// Energy saving.
    SvSt,
    /// Sleep mode variant.
    SlpMod,
    /// Room temperature sensor reading.
    TemSen,
}

impl Field {
    /// Number of polled fields.
    pub const COUNT: usize = 20;

    /// All fields in wire order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pow,
        Self::Mod,
        Self::SetTem,
        Self::WdSpd,
        Self::Air,
        Self::Blo,
        Self::Health,
        Self::SwhSlp,
        Self::Lig,
        Self::SwingLfRig,
        Self::SwUpDn,
        Self::Quiet,
        Self::Tur,
        Self::StHt,
        Self::TemUn,
        Self::HeatCoolType,
        Self::TemRec,
        Self::SvSt,
        Self::SlpMod,
        Self::TemSen,
    ];

    /// Returns the column name used on the wire.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Pow => "Pow",
            Self::Mod => "Mod",
            Self::SetTem => "SetTem",
            Self::WdSpd => "WdSpd",
            Self::Air => "Air",
            Self::Blo => "Blo",
            Self::Health => "Health",
            Self::SwhSlp => "SwhSlp",
            Self::Lig => "Lig",
            Self::SwingLfRig => "SwingLfRig",
            Self::SwUpDn => "SwUpDn",
            Self::Quiet => "Quiet",
            Self::Tur => "Tur",
            Self::StHt => "StHt",
            Self::TemUn => "TemUn",
            Self::HeatCoolType => "HeatCoolType",
            Self::TemRec => "TemRec",
            Self::SvSt => "SvSt",
            Self::SlpMod => "SlpMod",
            Self::TemSen => "TemSen",
        }
    }

    /// Returns the position of this field in the polled column list.
    #[must_use]
    pub const fn position(&self) -> usize {
        *self as usize
    }

    /// Returns the field at the given column position.
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Returns the wire names of all fields, in wire order.
    #[must_use]
    pub fn wire_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::wire_name).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Field {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|field| field.wire_name() == s)
            .copied()
            .ok_or_else(|| ValueError::UnknownName {
                kind: "field",
                name: s.to_string(),
            })
    }
}
