// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Locally desired field changes.

use std::collections::BTreeMap;

use crate::types::{Field, PowerState};

use super::FieldMap;

/// Desired field values that have not been applied to the device yet.
///
/// Entries are kept sorted by [`Field`], which is wire order, so the field
/// and value lists of a write request come out aligned without extra work.
/// Values are plain integers, so comparing an entry against the device's
/// current value is exact.
///
/// # Examples
///
/// ```
/// use gree_lib::state::{FieldMap, PendingDelta};
/// use gree_lib::types::Field;
///
/// let mut delta = PendingDelta::new();
/// delta.insert(Field::SetTem, 22);
/// delta.insert(Field::Pow, 1);
///
/// let current = FieldMap::new().with(Field::Pow, 1).with(Field::SetTem, 25);
/// let effective = delta.effective(&current);
///
/// assert_eq!(effective.fields(), vec![Field::SetTem]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDelta {
    entries: BTreeMap<Field, i64>,
}

impl PendingDelta {
    /// Creates an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no pending changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the desired value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<i64> {
        self.entries.get(&field).copied()
    }

    /// Records a desired value, replacing any earlier one for the field.
    pub fn insert(&mut self, field: Field, value: i64) {
        self.entries.insert(field, value);
    }

    /// Merges another delta into this one. Later values win.
    pub fn merge(&mut self, other: &Self) {
        self.entries.extend(other.iter());
    }

    /// Iterates over entries in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.entries.iter().map(|(field, value)| (*field, *value))
    }

    /// Returns the changed fields in wire order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.entries.keys().copied().collect()
    }

    /// Returns the desired values, aligned with [`fields`](Self::fields).
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.entries.values().copied().collect()
    }

    /// Returns the entries that differ from the current device values.
    #[must_use]
    pub fn effective(&self, current: &FieldMap) -> Self {
        self.iter()
            .filter(|(field, value)| current.get(*field) != Some(*value))
            .collect()
    }

    /// Returns `true` if this delta turns the unit on.
    #[must_use]
    pub fn requests_power_on(&self) -> bool {
        self.get(Field::Pow) == Some(PowerState::On.as_num())
    }

    /// Removes the entries that still hold the same value as in `applied`.
    ///
    /// Entries updated after `applied` was snapshotted are kept so that
    /// they are picked up by the next reconcile.
    pub fn remove_applied(&mut self, applied: &Self) {
        self.entries
            .retain(|field, value| applied.get(*field) != Some(*value));
    }
}

impl FromIterator<(Field, i64)> for PendingDelta {
    fn from_iter<I: IntoIterator<Item = (Field, i64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Field, i64)> for PendingDelta {
    fn extend<I: IntoIterator<Item = (Field, i64)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(entries: &[(Field, i64)]) -> PendingDelta {
        entries.iter().copied().collect()
    }

    #[test]
    fn last_write_wins() {
        let mut pending = delta(&[(Field::SetTem, 22)]);
        pending.merge(&delta(&[(Field::SetTem, 24), (Field::Pow, 1)]));
        assert_eq!(pending.get(Field::SetTem), Some(24));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn iteration_is_in_wire_order() {
        let pending = delta(&[(Field::Quiet, 0), (Field::Pow, 1), (Field::WdSpd, 2)]);
        assert_eq!(pending.fields(), vec![Field::Pow, Field::WdSpd, Field::Quiet]);
        assert_eq!(pending.values(), vec![1, 2, 0]);
    }

    #[test]
    fn effective_drops_satisfied_entries() {
        let current = FieldMap::new().with(Field::Pow, 1).with(Field::SetTem, 25);
        let pending = delta(&[(Field::Pow, 1), (Field::SetTem, 22)]);
        assert_eq!(pending.effective(&current), delta(&[(Field::SetTem, 22)]));
    }

    #[test]
    fn effective_keeps_entries_for_unknown_fields() {
        let current = FieldMap::new();
        let pending = delta(&[(Field::Lig, 0)]);
        assert_eq!(pending.effective(&current), pending);
    }

    #[test]
    fn effective_is_empty_when_all_satisfied() {
        let current = FieldMap::new().with(Field::SetTem, 22);
        assert!(delta(&[(Field::SetTem, 22)]).effective(&current).is_empty());
    }

    #[test]
    fn power_on_detection() {
        assert!(delta(&[(Field::Pow, 1)]).requests_power_on());
        assert!(!delta(&[(Field::Pow, 0)]).requests_power_on());
        assert!(!delta(&[(Field::SetTem, 20)]).requests_power_on());
    }

    #[test]
    fn remove_applied_keeps_newer_values() {
        let mut pending = delta(&[(Field::SetTem, 24), (Field::Lig, 1)]);
        let applied = delta(&[(Field::SetTem, 22), (Field::Lig, 1)]);
        pending.remove_applied(&applied);
        assert_eq!(pending, delta(&[(Field::SetTem, 24)]));
    }
}
