// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature conversions.
//!
//! The unit reports temperatures in whole degrees. In heat mode the value
//! stored in `SetTem` sits [`HEAT_MODE_OFFSET`] degrees below what the user
//! sees, so reads add the offset and writes subtract it. The room sensor
//! (`TemSen`) is reported with a +40 bias by some firmware.

use crate::error::ValueError;

/// Offset between displayed and stored temperatures in heat mode.
pub const HEAT_MODE_OFFSET: i64 = 3;

/// Lowest settable target temperature outside heat mode.
pub const MIN_TEMPERATURE: i64 = 16;

/// Highest settable target temperature outside heat mode.
pub const MAX_TEMPERATURE: i64 = 30;

/// Target temperature reported while 8 degree heating is active.
pub const FROST_PROTECTION_TEMPERATURE: i64 = 8;

/// Sensor readings above this value carry a bias of the same amount.
pub const SENSOR_BIAS: i64 = 40;

/// Converts a stored temperature to the displayed one.
#[must_use]
pub const fn to_display(stored: i64, heat_mode: bool) -> i64 {
    if heat_mode {
        stored + HEAT_MODE_OFFSET
    } else {
        stored
    }
}

/// Converts a displayed temperature to the one stored on the device.
#[must_use]
pub const fn to_stored(display: i64, heat_mode: bool) -> i64 {
    if heat_mode {
        display - HEAT_MODE_OFFSET
    } else {
        display
    }
}

/// Decodes a raw `TemSen` reading. Null and zero readings are absent.
#[must_use]
pub const fn decode_sensor(raw: Option<i64>) -> Option<i64> {
    match raw {
        None | Some(0) => None,
        Some(t) if t > SENSOR_BIAS => Some(t - SENSOR_BIAS),
        Some(t) => Some(t),
    }
}

/// Returns the displayed `(min, max)` target range.
#[must_use]
pub const fn display_range(heat_mode: bool) -> (i64, i64) {
    (
        to_display(MIN_TEMPERATURE, heat_mode),
        to_display(MAX_TEMPERATURE, heat_mode),
    )
}

/// Validates a displayed target temperature against the displayed range.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if the value is outside the range.
pub fn validate_target(display: i64, heat_mode: bool) -> Result<i64, ValueError> {
    let (min, max) = display_range(heat_mode);
    if (min..=max).contains(&display) {
        Ok(display)
    } else {
        Err(ValueError::OutOfRange {
            min,
            max,
            actual: display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_offset_both_directions() {
        assert_eq!(to_display(20, true), 23);
        assert_eq!(to_stored(23, true), 20);
        assert_eq!(to_display(20, false), 20);
        assert_eq!(to_stored(23, false), 23);
    }

    #[test]
    fn sensor_bias() {
        assert_eq!(decode_sensor(Some(64)), Some(24));
        assert_eq!(decode_sensor(Some(40)), Some(40));
        assert_eq!(decode_sensor(Some(25)), Some(25));
        assert_eq!(decode_sensor(Some(0)), None);
        assert_eq!(decode_sensor(None), None);
    }

    #[test]
    fn range_shifts_in_heat_mode() {
        assert_eq!(display_range(false), (16, 30));
        assert_eq!(display_range(true), (19, 33));
    }

    #[test]
    fn validate_target_bounds() {
        assert_eq!(validate_target(16, false), Ok(16));
        assert!(validate_target(15, false).is_err());
        assert_eq!(validate_target(33, true), Ok(33));
        assert_eq!(
            validate_target(34, true),
            Err(ValueError::OutOfRange {
                min: 19,
                max: 33,
                actual: 34
            })
        );
    }
}
