// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `GreeLib` - A Rust library to control Gree air conditioners on the
//! local network.
//!
//! Gree units speak an encrypted JSON protocol over UDP. This library binds
//! to a unit, polls its state and writes requested changes, keeping a
//! local copy of the state that consumers can read or watch.
//!
//! # Supported Features
//!
//! - **Binding**: key exchange with the generic key, cached device cipher
//! - **Polling**: all 20 state fields in one request
//! - **Control**: power, HVAC mode, fan speed, vertical swing, target
//!   temperature, and the light, x-fan, health, powersave, sleep, 8 °C heat
//!   and fresh-air toggles
//! - **Reconciling**: pending changes are written only when the unit does
//!   not already hold them, and never while it is off unless they power it
//!   on
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use gree_lib::DeviceConfig;
//! use gree_lib::command::ClimateCommand;
//! use gree_lib::types::HvacMode;
//!
//! #[tokio::main]
//! async fn main() -> gree_lib::Result<()> {
//!     let coordinator = Arc::new(
//!         DeviceConfig::new("192.168.1.60", "c8:f7:42:aa:bb:cc")?
//!             .with_name("Living room")
//!             .into_coordinator(),
//!     );
//!
//!     // Bind and read the initial state
//!     let state = coordinator.first_refresh().await?;
//!     println!("mode: {:?}", state.climate().hvac_mode());
//!
//!     // Keep the state fresh in the background
//!     let _polling = coordinator.spawn_polling();
//!
//!     coordinator.apply(&ClimateCommand::SetHvacMode(HvacMode::Cool)).await?;
//!     coordinator.apply(&ClimateCommand::SetTargetTemperature(22)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Watching State
//!
//! ```no_run
//! # async fn example(coordinator: gree_lib::Coordinator) {
//! let mut rx = coordinator.watch();
//! while rx.changed().await.is_ok() {
//!     let state = rx.borrow_and_update().clone();
//!     println!("target: {:?}", state.climate().target_temperature());
//! }
//! # }
//! ```

pub mod command;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod protocol;
pub mod state;
pub mod types;

pub use command::{ClimateCommand, Command};
pub use coordinator::{Coordinator, DeviceConfig, PollingHandle};
pub use error::{DecodeError, Error, ProtocolError, Result, ValueError};
pub use event::{DeviceEvent, EventBus, SkipReason};
pub use protocol::{GreeClient, RetryPolicy, Transport, UdpTransport};
pub use state::{ClimateState, DeviceState, FieldMap, PendingDelta};
pub use types::{DeviceMac, FanSpeed, Feature, Field, HvacMode, PowerState, SwingMode};
