//! Flattening a series into an argument map
//!
//! [`SeriesRead::copy_to`](crate::read::SeriesRead::copy_to) fills the keys of a
//! caller-provided map with the values of the matching entries. The map drives
//! the copy: only names already present as keys are looked at.
//!
//! A first value is stored as is, a second one turns the slot into a list and
//! any further value is appended to it. An entry without value is recorded as
//! [`MergeValue::Empty`] so the map still tells "present without value" apart
//! from "absent".

use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::parameter::ParameterEntry;

/// One value copied out of a series
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeValue {
    /// The entry was present but had no value.
    Empty,
    Text(String),
}

impl MergeValue {
    pub fn from_entry<E: ParameterEntry>(entry: &E) -> Self {
        match entry.value() {
            Some(value) => MergeValue::Text(value.to_owned()),
            None => MergeValue::Empty,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MergeValue::Empty => None,
            MergeValue::Text(value) => Some(value),
        }
    }
}

/// State of one key of the target map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MergeSlot {
    /// The key is expected but nothing was copied into it yet.
    #[default]
    Absent,
    Single(MergeValue),
    Multiple(Vec<MergeValue>),
}

impl MergeSlot {
    /// Record one more value for this key.
    pub fn push(&mut self, value: MergeValue) {
        *self = match std::mem::take(self) {
            MergeSlot::Absent => MergeSlot::Single(value),
            MergeSlot::Single(previous) => MergeSlot::Multiple(vec![previous, value]),
            MergeSlot::Multiple(mut values) => {
                values.push(value);
                MergeSlot::Multiple(values)
            }
        };
    }

    /// All recorded values, in copy order.
    pub fn values(&self) -> &[MergeValue] {
        match self {
            MergeSlot::Absent => &[],
            MergeSlot::Single(value) => std::slice::from_ref(value),
            MergeSlot::Multiple(values) => values,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, MergeSlot::Absent)
    }
}

/// Build a target map whose keys are `names`, every slot [`MergeSlot::Absent`].
pub fn target_for<I, S>(names: I) -> HashMap<String, MergeSlot>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| (name.into(), MergeSlot::Absent))
        .collect()
}

pub(crate) fn merge_into<E: ParameterEntry>(entries: &[E], target: &mut HashMap<String, MergeSlot>) {
    for entry in entries {
        if let Some(slot) = target.get_mut(entry.name()) {
            slot.push(MergeValue::from_entry(entry));
        }
    }
}

/// `Empty` serializes as an empty string.
impl Serialize for MergeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str().unwrap_or_default())
    }
}

/// `Absent` serializes as `null`, `Multiple` as a sequence.
impl Serialize for MergeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MergeSlot::Absent => serializer.serialize_none(),
            MergeSlot::Single(value) => value.serialize(serializer),
            MergeSlot::Multiple(values) => values.serialize(serializer),
        }
    }
}
