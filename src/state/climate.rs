// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate view over raw field values.

use crate::types::temperature::{self, FROST_PROTECTION_TEMPERATURE};
use crate::types::{FanSpeed, Feature, Field, HvacMode, PowerState, SwingMode};

use super::FieldMap;

/// Decoded climate readings derived from a [`FieldMap`].
///
/// All accessors return `None` when the underlying fields are unknown.
///
/// # Examples
///
/// ```
/// use gree_lib::state::{ClimateState, FieldMap};
/// use gree_lib::types::{Field, HvacMode};
///
/// let fields = FieldMap::new()
///     .with(Field::Pow, 1)
///     .with(Field::Mod, 4)
///     .with(Field::SetTem, 20);
/// let climate = ClimateState::new(&fields);
///
/// assert_eq!(climate.hvac_mode(), Some(HvacMode::Heat));
/// assert_eq!(climate.target_temperature(), Some(23));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClimateState<'a> {
    fields: &'a FieldMap,
}

impl<'a> ClimateState<'a> {
    /// Creates a view over the given field values.
    #[must_use]
    pub fn new(fields: &'a FieldMap) -> Self {
        Self { fields }
    }

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.fields.power()
    }

    /// Returns the operating mode, [`HvacMode::Off`] when powered off.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        if self.power() == Some(PowerState::Off) {
            return Some(HvacMode::Off);
        }
        HvacMode::from_raw(self.fields.get(Field::Mod))
    }

    /// Returns `true` if the unit is on and heating.
    #[must_use]
    pub fn is_heat_mode(&self) -> bool {
        self.hvac_mode() == Some(HvacMode::Heat)
    }

    /// Returns the effective fan mode.
    ///
    /// The turbo and quiet flags take priority over `WdSpd`.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        if self.fields.get(Field::Tur) == Some(1) {
            return Some(FanSpeed::Turbo);
        }
        if self.fields.get(Field::Quiet).is_some_and(|quiet| quiet >= 1) {
            return Some(FanSpeed::Quiet);
        }
        FanSpeed::from_raw(self.fields.get(Field::WdSpd))
    }

    /// Returns the vertical swing position.
    #[must_use]
    pub fn swing_mode(&self) -> Option<SwingMode> {
        SwingMode::from_raw(self.fields.get(Field::SwUpDn))
    }

    /// Returns the displayed target temperature.
    #[must_use]
    pub fn target_temperature(&self) -> Option<i64> {
        if self.fields.get(Field::StHt) == Some(1) {
            return Some(FROST_PROTECTION_TEMPERATURE);
        }
        self.fields
            .get(Field::SetTem)
            .filter(|t| *t != 0)
            .map(|t| temperature::to_display(t, self.is_heat_mode()))
    }

    /// Returns the displayed room temperature.
    #[must_use]
    pub fn current_temperature(&self) -> Option<i64> {
        temperature::decode_sensor(self.fields.get(Field::TemSen))
            .map(|t| temperature::to_display(t, self.is_heat_mode()))
    }

    /// Returns the lowest displayed target temperature.
    #[must_use]
    pub fn min_temperature(&self) -> i64 {
        temperature::display_range(self.is_heat_mode()).0
    }

    /// Returns the highest displayed target temperature.
    #[must_use]
    pub fn max_temperature(&self) -> i64 {
        temperature::display_range(self.is_heat_mode()).1
    }

    /// Returns whether a feature is on.
    #[must_use]
    pub fn feature(&self, feature: Feature) -> Option<bool> {
        Feature::decode(self.fields.get(feature.field()))
    }
}
