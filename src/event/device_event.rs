// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::state::{DeviceState, PendingDelta};
use crate::types::Field;

/// Why a reconcile issued no write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Every pending value already matched the device.
    AlreadyApplied,
    /// The device is off and the pending changes do not power it on.
    PoweredOff,
}

impl SkipReason {
    /// Returns a short description.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyApplied => "already applied",
            Self::PoweredOff => "device powered off",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events emitted by a coordinator.
///
/// A successful reconcile always ends with [`StateUpdated`]; it may be
/// preceded by [`WriteIssued`] or [`WriteSkipped`] when changes were
/// pending. A failed reconcile emits only [`ReconcileFailed`] and leaves
/// the published state untouched.
///
/// [`StateUpdated`]: DeviceEvent::StateUpdated
/// [`WriteIssued`]: DeviceEvent::WriteIssued
/// [`WriteSkipped`]: DeviceEvent::WriteSkipped
/// [`ReconcileFailed`]: DeviceEvent::ReconcileFailed
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// New state was published.
    StateUpdated {
        /// The published state.
        state: DeviceState,
        /// Fields whose value differs from the previously published state.
        changed: Vec<Field>,
    },

    /// Pending changes were written to the device.
    WriteIssued {
        /// The values written.
        delta: PendingDelta,
    },

    /// Pending changes were not written.
    WriteSkipped {
        /// Why the write was skipped.
        reason: SkipReason,
    },

    /// A reconcile cycle failed; pending changes are kept.
    ReconcileFailed {
        /// Error message.
        error: String,
    },
}

impl DeviceEvent {
    /// Returns `true` if this event published new state.
    #[must_use]
    pub fn is_state_update(&self) -> bool {
        matches!(self, Self::StateUpdated { .. })
    }

    /// Returns `true` if this event reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ReconcileFailed { .. })
    }

    /// Returns the published state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DeviceState> {
        match self {
            Self::StateUpdated { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Creates a reconcile failure event from an error.
    #[must_use]
    pub fn failed(error: &crate::Error) -> Self {
        Self::ReconcileFailed {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::state::FieldMap;

    #[test]
    fn state_accessor() {
        let state = DeviceState::polled(FieldMap::new().with(Field::Pow, 1));
        let event = DeviceEvent::StateUpdated {
            state: state.clone(),
            changed: vec![Field::Pow],
        };
        assert!(event.is_state_update());
        assert_eq!(event.state(), Some(&state));

        let skipped = DeviceEvent::WriteSkipped {
            reason: SkipReason::AlreadyApplied,
        };
        assert!(skipped.state().is_none());
        assert!(!skipped.is_failure());
    }

    #[test]
    fn failure_carries_message() {
        let event = DeviceEvent::failed(&ProtocolError::Timeout(10_000).into());
        assert!(event.is_failure());
        match event {
            DeviceEvent::ReconcileFailed { error } => assert!(error.contains("10000")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::PoweredOff.to_string(), "device powered off");
        assert_eq!(SkipReason::AlreadyApplied.to_string(), "already applied");
    }
}
