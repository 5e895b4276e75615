// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gree command definitions.
//!
//! Commands translate user intent into the raw field updates that make up
//! a [`PendingDelta`]. They never touch the network themselves; the
//! [`Coordinator`](crate::coordinator::Coordinator) queues the updates and
//! writes them on the next reconcile.
//!
//! # Available Commands
//!
//! | Command | Fields written |
//! |---------|----------------|
//! | [`ClimateCommand::SetPower`] | `Pow` |
//! | [`ClimateCommand::SetHvacMode`] | `Mod`, `Pow` |
//! | [`ClimateCommand::SetFanSpeed`] | `WdSpd`, `Tur`, `Quiet` |
//! | [`ClimateCommand::SetSwingMode`] | `SwUpDn` |
//! | [`ClimateCommand::SetTargetTemperature`] | `SetTem` |
//! | [`ClimateCommand::SetFeature`] | the feature's field |
//!
//! # Examples
//!
//! ```
//! use gree_lib::command::{ClimateCommand, Command};
//! use gree_lib::state::FieldMap;
//! use gree_lib::types::{Field, HvacMode};
//!
//! let current = FieldMap::new().with(Field::Pow, 0);
//! let updates = ClimateCommand::SetHvacMode(HvacMode::Cool)
//!     .updates(&current)
//!     .unwrap();
//!
//! assert_eq!(updates.get(Field::Pow), Some(1));
//! assert_eq!(updates.get(Field::Mod), Some(1));
//! ```

mod climate;

pub use climate::ClimateCommand;

use crate::error::ValueError;
use crate::state::{FieldMap, PendingDelta};

/// A command that can be applied to a Gree device.
pub trait Command {
    /// Returns a short name for logging.
    fn name(&self) -> &'static str;

    /// Returns the field updates that carry out this command.
    ///
    /// Some commands depend on the current state; for example target
    /// temperatures are stored with an offset in heat mode.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the command's value is out of range.
    fn updates(&self, current: &FieldMap) -> Result<PendingDelta, ValueError>;
}
