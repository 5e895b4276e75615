// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state coordination.
//!
//! A [`Coordinator`] owns everything known about one device: the last
//! polled state, the changes requested locally and the client used to
//! reach the device. Each reconcile cycle runs:
//!
//! 1. Snapshot the pending changes and poll the device.
//! 2. Drop pending values the device already holds. If none are left,
//!    publish the polled state.
//! 3. If the device is off and the changes do not power it on, keep them
//!    pending and publish the polled state.
//! 4. Otherwise write the pending fields, clear them and publish the
//!    merged state.
//!
//! [`DeviceConfig`] builds a coordinator for a device on the network.

mod config;
mod device_coordinator;
mod polling;

pub use config::DeviceConfig;
pub use device_coordinator::Coordinator;
pub use polling::{MIN_POLL_INTERVAL, PollingHandle};
