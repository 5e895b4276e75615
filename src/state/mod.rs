// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`FieldMap`] holds the raw values reported by a poll, [`PendingDelta`]
//! the changes requested locally but not yet written, and [`DeviceState`]
//! the timestamped snapshot a coordinator publishes. [`ClimateState`]
//! decodes raw values into modes and temperatures.
//!
//! # Examples
//!
//! ```
//! use gree_lib::state::{FieldMap, PendingDelta};
//! use gree_lib::types::Field;
//!
//! let current = FieldMap::new().with(Field::Pow, 1).with(Field::SetTem, 25);
//!
//! let mut pending = PendingDelta::new();
//! pending.insert(Field::SetTem, 22);
//!
//! let merged = current.merged(&pending.effective(&current));
//! assert_eq!(merged.get(Field::SetTem), Some(22));
//! ```

mod climate;
mod device_state;
mod field_map;
mod pending_delta;

pub use climate::ClimateState;
pub use device_state::DeviceState;
pub use field_map::FieldMap;
pub use pending_delta::PendingDelta;
