// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate control commands.

use crate::error::ValueError;
use crate::state::{ClimateState, FieldMap, PendingDelta};
use crate::types::{FanSpeed, Feature, Field, HvacMode, PowerState, SwingMode, temperature};

use super::Command;

/// A user-level change to the climate settings.
///
/// # Examples
///
/// ```
/// use gree_lib::command::{ClimateCommand, Command};
/// use gree_lib::state::FieldMap;
/// use gree_lib::types::{FanSpeed, Field};
///
/// let current = FieldMap::new().with(Field::Pow, 1).with(Field::Mod, 1);
/// let updates = ClimateCommand::SetFanSpeed(FanSpeed::Turbo)
///     .updates(&current)
///     .unwrap();
///
/// assert_eq!(updates.get(Field::Tur), Some(1));
/// assert_eq!(updates.get(Field::Quiet), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateCommand {
    /// Turn the unit on or off without changing the mode.
    SetPower(PowerState),
    /// Change the operating mode; [`HvacMode::Off`] powers the unit down.
    SetHvacMode(HvacMode),
    /// Change the fan speed.
    SetFanSpeed(FanSpeed),
    /// Change the vertical swing position.
    SetSwingMode(SwingMode),
    /// Change the displayed target temperature.
    SetTargetTemperature(i64),
    /// Switch a feature on or off.
    SetFeature {
        /// The feature to switch.
        feature: Feature,
        /// Whether it should be on.
        on: bool,
    },
}

impl Command for ClimateCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::SetPower(_) => "set_power",
            Self::SetHvacMode(_) => "set_hvac_mode",
            Self::SetFanSpeed(_) => "set_fan_mode",
            Self::SetSwingMode(_) => "set_swing_mode",
            Self::SetTargetTemperature(_) => "set_temperature",
            Self::SetFeature { .. } => "set_feature",
        }
    }

    fn updates(&self, current: &FieldMap) -> Result<PendingDelta, ValueError> {
        let updates: PendingDelta = match *self {
            Self::SetPower(state) => [(Field::Pow, state.as_num())].into_iter().collect(),
            Self::SetHvacMode(HvacMode::Off) => {
                [(Field::Pow, PowerState::Off.as_num())].into_iter().collect()
            }
            Self::SetHvacMode(mode) => [
                (Field::Mod, mode.index()),
                (Field::Pow, PowerState::On.as_num()),
            ]
            .into_iter()
            .collect(),
            Self::SetFanSpeed(FanSpeed::Turbo) => {
                [(Field::Tur, 1), (Field::Quiet, 0)].into_iter().collect()
            }
            Self::SetFanSpeed(FanSpeed::Quiet) => {
                [(Field::Tur, 0), (Field::Quiet, 1)].into_iter().collect()
            }
            Self::SetFanSpeed(speed) => [
                (Field::WdSpd, speed.index()),
                (Field::Tur, 0),
                (Field::Quiet, 0),
            ]
            .into_iter()
            .collect(),
            Self::SetSwingMode(mode) => [(Field::SwUpDn, mode.index())].into_iter().collect(),
            Self::SetTargetTemperature(display) => {
                let heat_mode = ClimateState::new(current).is_heat_mode();
                let display = temperature::validate_target(display, heat_mode)?;
                [(Field::SetTem, temperature::to_stored(display, heat_mode))]
                    .into_iter()
                    .collect()
            }
            Self::SetFeature { feature, on } => [(feature.field(), i64::from(on))]
                .into_iter()
                .collect(),
        };
        Ok(updates)
    }
}
