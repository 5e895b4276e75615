// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background polling task.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::protocol::Transport;

use super::Coordinator;

/// Shortest interval the polling task runs at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running polling task.
///
/// The task is aborted when the handle is stopped or dropped.
#[derive(Debug)]
pub struct PollingHandle {
    task: JoinHandle<()>,
}

impl PollingHandle {
    pub(crate) fn spawn<T>(coordinator: Arc<Coordinator<T>>, interval: Duration) -> Self
    where
        T: Transport + 'static,
    {
        if interval < MIN_POLL_INTERVAL {
            tracing::warn!(
                device = %coordinator.name(),
                requested = ?interval,
                used = ?MIN_POLL_INTERVAL,
                "Poll interval too short, using minimum"
            );
        }
        let interval = interval.max(MIN_POLL_INTERVAL);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the caller runs the
            // first refresh itself.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(err) = coordinator.reconcile().await {
                    tracing::debug!(device = %coordinator.name(), error = %err, "Scheduled reconcile failed");
                }
            }
        });

        Self { task }
    }

    /// Stops polling.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` once the task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
