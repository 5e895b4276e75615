// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Published device state.

use chrono::{DateTime, Utc};

use super::{ClimateState, FieldMap};

/// State of a device as last published by its coordinator.
///
/// Before the first successful poll every field is unknown and
/// [`polled_at`](Self::polled_at) is `None`.
///
/// # Examples
///
/// ```
/// use gree_lib::state::{DeviceState, FieldMap};
/// use gree_lib::types::{Field, HvacMode};
///
/// let state = DeviceState::polled(FieldMap::new().with(Field::Pow, 1).with(Field::Mod, 1));
/// assert!(state.polled_at().is_some());
/// assert_eq!(state.climate().hvac_mode(), Some(HvacMode::Cool));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    fields: FieldMap,
    polled_at: Option<DateTime<Utc>>,
}

impl DeviceState {
    /// Creates an empty state that has never been polled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from field values polled just now.
    #[must_use]
    pub fn polled(fields: FieldMap) -> Self {
        Self {
            fields,
            polled_at: Some(Utc::now()),
        }
    }

    /// Returns the field values.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Returns when the poll that produced this state completed.
    #[must_use]
    pub fn polled_at(&self) -> Option<DateTime<Utc>> {
        self.polled_at
    }

    /// Returns `true` once the device has been polled at least once.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.polled_at.is_some()
    }

    /// Returns the climate view of this state.
    #[must_use]
    pub fn climate(&self) -> ClimateState<'_> {
        ClimateState::new(&self.fields)
    }
}
