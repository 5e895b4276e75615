// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Gree device fields.
//!
//! This module provides the closed set of device fields and type-safe
//! decodings of the enumerated values stored in them.

mod fan_speed;
mod feature;
mod field;
mod hvac_mode;
mod mac;
mod power;
mod swing_mode;
pub mod temperature;

pub use fan_speed::FanSpeed;
pub use feature::Feature;
pub use field::Field;
pub use hvac_mode::HvacMode;
pub use mac::DeviceMac;
pub use power::PowerState;
pub use swing_mode::SwingMode;
