// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconcile events.
//!
//! A coordinator publishes a [`DeviceEvent`] on its [`EventBus`] for every
//! reconcile outcome. The bus is a tokio broadcast channel, so any number
//! of consumers can follow one device.
//!
//! # Examples
//!
//! ```
//! use gree_lib::event::{DeviceEvent, EventBus, SkipReason};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::WriteSkipped {
//!     reason: SkipReason::PoweredOff,
//! });
//! assert!(rx.try_recv().is_ok());
//! ```

mod device_event;
mod event_bus;

pub use device_event::{DeviceEvent, SkipReason};
pub use event_bus::EventBus;
