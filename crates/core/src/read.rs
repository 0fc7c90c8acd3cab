//! Read contract shared by series and read-only views
//!
//! Every query is written once here, on top of [`SeriesRead::with_entries`].
//! [`ParameterSeries`] and [`ImmutableSeriesView`] only have to expose their
//! current entries and the factory that built them.
//!
//! [`ImmutableSeriesView`]: crate::view::ImmutableSeriesView

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::factory::SeriesFactory;
use crate::merge::{merge_into, MergeSlot};
use crate::parameter::{names_match, ParameterEntry};
use crate::series::ParameterSeries;

pub trait SeriesRead {
    type Entry: ParameterEntry;
    type Factory: SeriesFactory<Entry = Self::Entry>;

    /// Run `f` over the entries currently visible, in order.
    ///
    /// # Panics
    ///
    /// Panics if `f` mutates the same storage through another handle.
    fn with_entries<R>(&self, f: impl FnOnce(&[Self::Entry]) -> R) -> R;

    fn factory(&self) -> Rc<Self::Factory>;

    fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<Self::Entry> {
        self.with_entries(|entries| entries.get(index).cloned())
    }

    fn to_vec(&self) -> Vec<Self::Entry> {
        self.with_entries(|entries| entries.to_vec())
    }

    /// Iterate over a snapshot of the entries.
    fn iter(&self) -> std::vec::IntoIter<Self::Entry> {
        self.to_vec().into_iter()
    }

    /// First entry with the given name, in insertion order.
    fn get_first(&self, name: &str, ignore_case: bool) -> Option<Self::Entry> {
        self.with_entries(|entries| {
            entries
                .iter()
                .find(|entry| names_match(entry.name(), name, ignore_case))
                .cloned()
        })
    }

    /// Value of the first entry with the given name.
    ///
    /// Falls back to `default` when no entry matches or when the first match
    /// has no value.
    fn get_first_value(
        &self,
        name: &str,
        ignore_case: bool,
        default: Option<&str>,
    ) -> Option<String> {
        self.with_entries(|entries| {
            entries
                .iter()
                .find(|entry| names_match(entry.name(), name, ignore_case))
                .and_then(|entry| entry.value().map(str::to_owned))
        })
        .or_else(|| default.map(str::to_owned))
    }

    /// Distinct entry names, compared case-sensitively.
    fn get_names(&self) -> HashSet<String> {
        self.with_entries(|entries| {
            entries
                .iter()
                .map(|entry| entry.name().to_owned())
                .collect()
        })
    }

    /// Values of all the entries with the given name joined by `separator`,
    /// the way repeated HTTP headers are folded.
    ///
    /// An exact name match always counts; `ignore_case` additionally accepts
    /// case-insensitive matches. An entry without value contributes an empty
    /// string. Returns `None` when nothing matches.
    fn get_values(&self, name: &str, separator: &str, ignore_case: bool) -> Option<String> {
        self.with_entries(|entries| {
            let mut values = entries
                .iter()
                .filter(|entry| names_match(entry.name(), name, ignore_case))
                .map(|entry| entry.value().unwrap_or_default());

            let first = values.next()?;
            Some(values.fold(first.to_owned(), |mut joined, value| {
                joined.push_str(separator);
                joined.push_str(value);
                joined
            }))
        })
    }

    /// [`SeriesRead::get_values`] with a comma separator, ignoring case.
    fn get_values_default(&self, name: &str) -> Option<String> {
        self.get_values(name, ",", true)
    }

    /// Values of all the entries with the given name, in order.
    fn get_values_array(&self, name: &str, ignore_case: bool) -> Vec<Option<String>> {
        self.sub_list_named(name, ignore_case)
            .iter()
            .map(|entry| entry.value().map(str::to_owned))
            .collect()
    }

    /// One value per distinct name, in order of first occurrence. Later
    /// duplicates are ignored.
    fn get_values_map(&self) -> IndexMap<String, Option<String>> {
        self.with_entries(|entries| {
            let mut map = IndexMap::with_capacity(entries.len());
            for entry in entries {
                map.entry(entry.name().to_owned())
                    .or_insert_with(|| entry.value().map(str::to_owned));
            }
            map
        })
    }

    /// Independent series holding the entries with the given name.
    fn sub_list_named(&self, name: &str, ignore_case: bool) -> ParameterSeries<Self::Factory> {
        let matches: Vec<Self::Entry> = self.with_entries(|entries| {
            entries
                .iter()
                .filter(|entry| names_match(entry.name(), name, ignore_case))
                .cloned()
                .collect()
        });
        ParameterSeries::from_parts(self.factory(), matches)
    }

    /// Merge the values of the entries whose name is already a key of
    /// `target`. Keys missing from `target` are never added.
    ///
    /// See [`MergeSlot`] for how repeated names accumulate.
    fn copy_to(&self, target: &mut HashMap<String, MergeSlot>) {
        self.with_entries(|entries| merge_into(entries, target));
    }
}
