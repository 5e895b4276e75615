// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of device field values.

use crate::error::DecodeError;
use crate::types::{Field, PowerState};

use super::PendingDelta;

/// Values of every polled [`Field`], each an integer or unknown.
///
/// A `FieldMap` is a plain value: polls replace it wholesale and merges
/// produce a new map rather than mutating the published one.
///
/// # Examples
///
/// ```
/// use gree_lib::state::FieldMap;
/// use gree_lib::types::Field;
///
/// let map = FieldMap::new().with(Field::Pow, 1).with(Field::SetTem, 25);
/// assert_eq!(map.get(Field::SetTem), Some(25));
/// assert_eq!(map.get(Field::WdSpd), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: [Option<i64>; Field::COUNT],
}

impl FieldMap {
    /// Creates a map with every field unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a positional value list aligned with [`Field::ALL`].
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnexpectedFormat` if the list is shorter than
    /// the number of fields. Extra trailing values are ignored.
    pub fn from_positional(values: &[Option<i64>]) -> Result<Self, DecodeError> {
        let values: [Option<i64>; Field::COUNT] = values
            .get(..Field::COUNT)
            .and_then(|head| head.try_into().ok())
            .ok_or_else(|| {
                DecodeError::UnexpectedFormat(format!(
                    "expected {} status values, got {}",
                    Field::COUNT,
                    values.len()
                ))
            })?;
        Ok(Self { values })
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<i64> {
        self.values[field.position()]
    }

    /// Sets the value of a field.
    pub fn set(&mut self, field: Field, value: i64) {
        self.values[field.position()] = Some(value);
    }

    /// Marks a field as unknown.
    pub fn clear(&mut self, field: Field) {
        self.values[field.position()] = None;
    }

    /// Returns a copy with one field set.
    #[must_use]
    pub fn with(mut self, field: Field, value: i64) -> Self {
        self.set(field, value);
        self
    }

    /// Iterates over all fields in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<i64>)> + '_ {
        Field::ALL.iter().map(|field| (*field, self.get(*field)))
    }

    /// Returns `true` if no field has a known value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Returns the decoded power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        PowerState::from_raw(self.get(Field::Pow))
    }

    /// Returns a new map with the delta applied on top of this one.
    #[must_use]
    pub fn merged(&self, delta: &PendingDelta) -> Self {
        let mut merged = self.clone();
        for (field, value) in delta.iter() {
            merged.set(field, value);
        }
        merged
    }

    /// Returns the fields whose values differ between two maps.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Vec<Field> {
        Field::ALL
            .iter()
            .filter(|field| self.get(**field) != other.get(**field))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positional(len: usize) -> Vec<Option<i64>> {
        (0..len).map(|i| i64::try_from(i).ok()).collect()
    }

    #[test]
    fn from_positional_aligns_with_wire_order() {
        let map = FieldMap::from_positional(&positional(Field::COUNT)).unwrap();
        assert_eq!(map.get(Field::Pow), Some(0));
        assert_eq!(map.get(Field::SetTem), Some(2));
        assert_eq!(map.get(Field::TemSen), Some(19));
    }

    #[test]
    fn from_positional_rejects_short_list() {
        assert!(FieldMap::from_positional(&positional(5)).is_err());
        assert!(FieldMap::from_positional(&positional(Field::COUNT - 1)).is_err());
    }

    #[test]
    fn from_positional_ignores_extra_values() {
        let map = FieldMap::from_positional(&positional(Field::COUNT + 3)).unwrap();
        assert_eq!(map, FieldMap::from_positional(&positional(Field::COUNT)).unwrap());
        assert_eq!(map.get(Field::TemSen), Some(19));
    }

    #[test]
    fn null_values_read_as_none() {
        let mut values = positional(Field::COUNT);
        values[Field::WdSpd.position()] = None;
        let map = FieldMap::from_positional(&values).unwrap();
        assert_eq!(map.get(Field::WdSpd), None);
    }

    #[test]
    fn merged_leaves_original_untouched() {
        let map = FieldMap::new().with(Field::SetTem, 25);
        let delta: PendingDelta = [(Field::SetTem, 22)].into_iter().collect();

        let merged = map.merged(&delta);
        assert_eq!(merged.get(Field::SetTem), Some(22));
        assert_eq!(map.get(Field::SetTem), Some(25));
        assert_eq!(map.diff(&merged), vec![Field::SetTem]);
    }

    #[test]
    fn set_and_clear() {
        let mut map = FieldMap::new();
        assert!(map.is_empty());
        map.set(Field::Pow, 1);
        assert_eq!(map.power(), Some(PowerState::On));
        map.clear(Field::Pow);
        assert!(map.is_empty());
    }
}
