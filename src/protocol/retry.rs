// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retry policy for device requests.

use std::future::Future;

use crate::error::Error;

/// Bounded retry on timeouts.
///
/// Only timeouts are retried, immediately and without backoff. Any other
/// error is returned as soon as it happens. When every attempt times out
/// the last timeout is returned.
///
/// # Examples
///
/// ```
/// use gree_lib::protocol::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 10);
///
/// let policy = RetryPolicy::new(3);
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Default number of attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    /// Creates a policy making at most `max_attempts` attempts (at least one).
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
        }
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `operation` until it succeeds, fails with a non-timeout error,
    /// or the attempt budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the first non-timeout error, or the last timeout.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Err(err) if err.is_timeout() && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "Retrying Gree request after timeout"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}
