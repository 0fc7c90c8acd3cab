//! Ordered, multi-valued parameter series
//!
//! A [`ParameterSeries`] behaves like an HTTP header list: names may repeat,
//! insertion order is preserved and every lookup chooses between a
//! case-sensitive and a case-insensitive name comparison.
//!
//! # Storage and views
//!
//! Entries live in a storage shared by a series and the views derived from
//! it with [`ParameterSeries::sub_list`]. A view addresses a contiguous range
//! of positions of its parent: edits made through the view land in the
//! parent and edits made through the parent are seen by the view. Views may
//! be nested; resizing a view resizes every ancestor range too.
//!
//! A view tracks positions, not entries. When the parent inserts or removes
//! entries before the view's range, the view keeps covering the same
//! positions. A view whose range now extends beyond the parent's length is
//! clipped to what remains.
//!
//! [`ParameterSeries::sub_list_named`](crate::read::SeriesRead::sub_list_named)
//! and [`Clone`] never share storage: they produce independent series.
//!
//! The series holds no lock. It is confined to one thread (`!Send`) and a
//! multi-step operation such as [`ParameterSeries::set`] is not atomic with
//! respect to other handles on the same storage.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::factory::SeriesFactory;
use crate::parameter::{names_match, ParameterEntry};
use crate::read::SeriesRead;
use crate::view::ImmutableSeriesView;

/// Range of storage positions covered by a view
#[derive(Debug)]
struct Span {
    offset: usize,
    len: Cell<usize>,
    parent: Option<Rc<Span>>,
}

impl Span {
    fn ancestors(&self) -> impl Iterator<Item = &Span> {
        std::iter::successors(Some(self), |span| span.parent.as_deref())
    }

    fn grow(&self, count: usize) {
        for span in self.ancestors() {
            span.len.set(span.len.get() + count);
        }
    }

    fn shrink(&self, count: usize) {
        for span in self.ancestors() {
            span.len.set(span.len.get().saturating_sub(count));
        }
    }
}

/// Ordered collection of name/value entries built by a [`SeriesFactory`]
pub struct ParameterSeries<F: SeriesFactory> {
    store: Rc<RefCell<Vec<F::Entry>>>,
    span: Option<Rc<Span>>,
    factory: Rc<F>,
}

impl<F: SeriesFactory> ParameterSeries<F> {
    /// Create an empty series whose entries are built by `factory`.
    pub fn with_factory(factory: F) -> Self {
        Self::from_entries(factory, Vec::new())
    }

    /// Create a series over an initial list of entries.
    pub fn from_entries(factory: F, entries: Vec<F::Entry>) -> Self {
        Self::from_parts(Rc::new(factory), entries)
    }

    pub(crate) fn from_parts(factory: Rc<F>, entries: Vec<F::Entry>) -> Self {
        Self {
            store: Rc::new(RefCell::new(entries)),
            span: None,
            factory,
        }
    }

    /// Create a new, independent series of the same kind.
    pub fn create_series(&self, initial: Option<Vec<F::Entry>>) -> Self {
        Self::from_parts(Rc::clone(&self.factory), initial.unwrap_or_default())
    }

    /// Build an entry with this series' factory without inserting it.
    pub fn create_parameter(&self, name: &str, value: Option<&str>) -> F::Entry {
        self.factory
            .create_parameter(name.to_owned(), value.map(str::to_owned))
    }

    /// Another handle on the same storage and range.
    pub(crate) fn share(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            span: self.span.clone(),
            factory: Rc::clone(&self.factory),
        }
    }

    /// Storage positions covered by this handle, clipped to the storage length.
    fn bounds(&self, total: usize) -> (usize, usize) {
        match &self.span {
            None => (0, total),
            Some(span) => {
                let start = span.offset.min(total);
                let end = (span.offset + span.len.get()).min(total);
                (start, end)
            }
        }
    }

    fn grown(&self, count: usize) {
        if let Some(span) = &self.span {
            span.grow(count);
        }
    }

    fn shrunk(&self, count: usize) {
        if count > 0 {
            if let Some(span) = &self.span {
                span.shrink(count);
            }
        }
    }

    /// Create an entry and append it. Always returns `true`.
    pub fn add(&mut self, name: &str, value: Option<&str>) -> bool {
        let entry = self.create_parameter(name, value);
        self.push(entry);
        true
    }

    /// Append an already built entry.
    pub fn push(&mut self, entry: F::Entry) {
        let len = self.len();
        self.insert(len, entry);
    }

    /// Insert an entry at `index`, shifting later entries.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, entry: F::Entry) {
        {
            let mut entries = self.store.borrow_mut();
            let (start, end) = self.bounds(entries.len());
            assert!(
                index <= end - start,
                "insertion index (is {index}) should be <= len (is {})",
                end - start
            );
            entries.insert(start + index, entry);
        }
        self.grown(1);
    }

    /// Remove and return the entry at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<F::Entry> {
        let removed = {
            let mut entries = self.store.borrow_mut();
            let (start, end) = self.bounds(entries.len());
            (index < end - start).then(|| entries.remove(start + index))
        };
        if removed.is_some() {
            self.shrunk(1);
        }
        removed
    }

    /// Remove every entry in range.
    pub fn clear(&mut self) {
        self.retain(|_| false);
    }

    /// Keep only the entries matching `keep`, preserving their order.
    ///
    /// Returns the number of entries removed.
    ///
    /// `keep` may read other handles on the same storage: it runs on a
    /// snapshot before the storage is borrowed for writing.
    pub fn retain(&mut self, mut keep: impl FnMut(&F::Entry) -> bool) -> usize {
        let mut mask = self
            .to_vec()
            .iter()
            .map(|entry| keep(entry))
            .collect::<Vec<_>>()
            .into_iter();

        let removed = {
            let mut entries = self.store.borrow_mut();
            let (start, end) = self.bounds(entries.len());
            let mut tail = entries.split_off(end);
            let kept: Vec<F::Entry> = entries
                .drain(start..)
                .filter(|_| mask.next().unwrap_or(true))
                .collect();
            let removed = (end - start) - kept.len();
            entries.extend(kept);
            entries.append(&mut tail);
            removed
        };
        self.shrunk(removed);
        removed
    }

    /// Sort the entries in range. The sort is stable.
    ///
    /// Like [`retain`](Self::retain), `compare` runs on a snapshot and may
    /// read other handles on the same storage.
    pub fn sort_by(&mut self, compare: impl FnMut(&F::Entry, &F::Entry) -> Ordering) {
        let mut sorted = self.to_vec();
        sorted.sort_by(compare);

        let mut entries = self.store.borrow_mut();
        let (start, end) = self.bounds(entries.len());
        for (slot, entry) in entries[start..end].iter_mut().zip(sorted) {
            *slot = entry;
        }
    }

    /// Remove every entry with the given name.
    ///
    /// Returns `true` if at least one entry was removed.
    pub fn remove_all(&mut self, name: &str, ignore_case: bool) -> bool {
        self.retain(|entry| !names_match(entry.name(), name, ignore_case)) > 0
    }

    /// Remove the first entry with the given name.
    pub fn remove_first(&mut self, name: &str, ignore_case: bool) -> bool {
        let position = self.with_entries(|entries| {
            entries
                .iter()
                .position(|entry| names_match(entry.name(), name, ignore_case))
        });

        match position {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    /// Replace the value of the first entry with the given name and remove
    /// all the other entries sharing that name.
    ///
    /// Returns the updated entry. When no entry matches, a new one is
    /// appended and `None` is returned; query the series again to get it.
    pub fn set(&mut self, name: &str, value: Option<&str>, ignore_case: bool) -> Option<F::Entry> {
        let (updated, removed) = {
            let mut entries = self.store.borrow_mut();
            let (start, end) = self.bounds(entries.len());
            let mut updated: Option<F::Entry> = None;

            let mut tail = entries.split_off(end);
            let kept: Vec<F::Entry> = entries
                .drain(start..)
                .filter_map(|mut entry| {
                    if !names_match(entry.name(), name, ignore_case) {
                        return Some(entry);
                    }
                    if updated.is_some() {
                        return None;
                    }
                    entry.set_value(value.map(str::to_owned));
                    updated = Some(entry.clone());
                    Some(entry)
                })
                .collect();

            let removed = (end - start) - kept.len();
            entries.extend(kept);
            entries.append(&mut tail);
            (updated, removed)
        };
        self.shrunk(removed);

        if updated.is_none() {
            self.add(name, value);
        }
        updated
    }

    /// Live view over the positions `from..to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > len`, like slice indexing.
    pub fn sub_list(&self, from: usize, to: usize) -> Self {
        let (start, end) = self.bounds(self.store.borrow().len());
        let len = end - start;
        assert!(from <= to, "sub-list starts at {from} but ends at {to}");
        assert!(
            to <= len,
            "range end index {to} out of range for series of length {len}"
        );

        Self {
            store: Rc::clone(&self.store),
            span: Some(Rc::new(Span {
                offset: start + from,
                len: Cell::new(to - from),
                parent: self.span.clone(),
            })),
            factory: Rc::clone(&self.factory),
        }
    }

    /// Read-only wrapper sharing this series' storage.
    pub fn unmodifiable(&self) -> ImmutableSeriesView<F> {
        ImmutableSeriesView::new(self.share())
    }
}

impl<F: SeriesFactory> SeriesRead for ParameterSeries<F> {
    type Entry = F::Entry;
    type Factory = F;

    fn with_entries<R>(&self, f: impl FnOnce(&[Self::Entry]) -> R) -> R {
        let entries = self.store.borrow();
        let (start, end) = self.bounds(entries.len());
        f(&entries[start..end])
    }

    fn factory(&self) -> Rc<F> {
        Rc::clone(&self.factory)
    }
}

impl<F: SeriesFactory + Default> Default for ParameterSeries<F> {
    fn default() -> Self {
        Self::with_factory(F::default())
    }
}

/// Cloning copies the entries in range into a new, independent series.
impl<F: SeriesFactory> Clone for ParameterSeries<F> {
    fn clone(&self) -> Self {
        Self::from_parts(Rc::clone(&self.factory), self.to_vec())
    }
}

impl<F> fmt::Debug for ParameterSeries<F>
where
    F: SeriesFactory,
    F::Entry: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_entries(|entries| f.debug_list().entries(entries).finish())
    }
}

impl<F> PartialEq for ParameterSeries<F>
where
    F: SeriesFactory,
    F::Entry: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.with_entries(|left| other.with_entries(|right| left == right))
    }
}

impl<F: SeriesFactory> Extend<F::Entry> for ParameterSeries<F> {
    fn extend<I: IntoIterator<Item = F::Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Form;
    use crate::parameter::Parameter;
    use proptest::prelude::*;

    fn p(name: &str, value: &str) -> Parameter {
        Parameter::new(name, Some(value))
    }

    fn form(pairs: &[(&str, &str)]) -> Form {
        Form::from_pairs(pairs.iter().map(|(n, v)| (*n, Some(*v))))
    }

    #[test]
    fn test_add_always_returns_true() {
        let mut series = Form::new();

        assert!(series.add("a", Some("1")));
        assert!(series.add("a", Some("1")));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_set_updates_first_and_removes_duplicates() {
        let mut series = form(&[("X", "a"), ("Y", "b"), ("X", "c")]);

        let updated = series.set("X", Some("z"), false);

        assert_eq!(updated, Some(p("X", "z")));
        assert_eq!(series.to_vec(), vec![p("X", "z"), p("Y", "b")]);
    }

    #[test]
    fn test_set_appends_when_missing() {
        let mut series = form(&[("X", "a"), ("Y", "b")]);

        let updated = series.set("Z", Some("w"), false);

        assert_eq!(updated, None);
        assert_eq!(series.to_vec(), vec![p("X", "a"), p("Y", "b"), p("Z", "w")]);
    }

    #[test]
    fn test_set_ignore_case_keeps_original_name() {
        let mut series = form(&[("Accept", "a"), ("ACCEPT", "b"), ("accept", "c")]);

        let updated = series.set("accept", Some("json"), true).unwrap();

        assert_eq!(updated.name, "Accept");
        assert_eq!(series.to_vec(), vec![p("Accept", "json")]);
    }

    #[test]
    fn test_set_case_sensitive_leaves_other_case() {
        let mut series = form(&[("X", "a"), ("x", "b")]);

        series.set("X", None, false);

        assert_eq!(series.to_vec(), vec![Parameter::new("X", None), p("x", "b")]);
    }

    #[test]
    fn test_remove_all() {
        let mut series = form(&[("a", "1"), ("A", "2"), ("b", "3"), ("a", "4")]);

        assert!(series.remove_all("a", false));
        assert_eq!(series.to_vec(), vec![p("A", "2"), p("b", "3")]);
        assert!(!series.remove_all("a", false));
        assert!(series.remove_all("a", true));
        assert_eq!(series.to_vec(), vec![p("b", "3")]);
    }

    #[test]
    fn test_remove_first() {
        let mut series = form(&[("a", "1"), ("b", "2"), ("a", "3")]);

        assert!(series.remove_first("a", false));
        assert_eq!(series.to_vec(), vec![p("b", "2"), p("a", "3")]);
        assert!(!series.remove_first("B", false));
        assert!(series.remove_first("B", true));
        assert_eq!(series.to_vec(), vec![p("a", "3")]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut series = form(&[("a", "1")]);

        assert_eq!(series.remove(3), None);
        assert_eq!(series.remove(0), Some(p("a", "1")));
        assert!(series.is_empty());
    }

    #[test]
    fn test_sub_list_removal_reaches_parent() {
        let series = form(&[("a", "0"), ("b", "1"), ("c", "2"), ("d", "3")]);

        let mut view = series.sub_list(1, 3);
        assert_eq!(view.to_vec(), vec![p("b", "1"), p("c", "2")]);

        assert_eq!(view.remove(0), Some(p("b", "1")));
        assert_eq!(view.to_vec(), vec![p("c", "2")]);
        assert_eq!(series.to_vec(), vec![p("a", "0"), p("c", "2"), p("d", "3")]);
    }

    #[test]
    fn test_sub_list_sees_parent_edits() {
        let mut series = form(&[("a", "0"), ("b", "1"), ("c", "2")]);
        let view = series.sub_list(1, 3);

        series.set("b", Some("changed"), false);

        assert_eq!(view.get_first_value("b", false, None).as_deref(), Some("changed"));
    }

    #[test]
    fn test_sub_list_add_inserts_at_view_end() {
        let series = form(&[("a", "0"), ("b", "1"), ("c", "2")]);
        let mut view = series.sub_list(0, 2);

        view.add("x", Some("new"));

        assert_eq!(view.len(), 3);
        assert_eq!(
            series.to_vec(),
            vec![p("a", "0"), p("b", "1"), p("x", "new"), p("c", "2")]
        );
    }

    #[test]
    fn test_nested_sub_list_resizes_ancestors() {
        let series = form(&[("a", "0"), ("b", "1"), ("c", "2"), ("d", "3"), ("e", "4")]);
        let outer = series.sub_list(1, 5);
        let mut inner = outer.sub_list(1, 3);

        assert_eq!(inner.to_vec(), vec![p("c", "2"), p("d", "3")]);
        assert!(inner.remove_all("c", false));

        assert_eq!(outer.len(), 3);
        assert_eq!(outer.to_vec(), vec![p("b", "1"), p("d", "3"), p("e", "4")]);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_sub_list_set_and_clear() {
        let series = form(&[("k", "0"), ("k", "1"), ("k", "2"), ("z", "3")]);
        let mut view = series.sub_list(1, 4);

        let updated = view.set("k", Some("x"), false);
        assert_eq!(updated, Some(p("k", "x")));
        assert_eq!(series.to_vec(), vec![p("k", "0"), p("k", "x"), p("z", "3")]);

        view.clear();
        assert!(view.is_empty());
        assert_eq!(series.to_vec(), vec![p("k", "0")]);
    }

    #[test]
    fn test_sub_list_clipped_after_parent_shrinks() {
        let mut series = form(&[("a", "0"), ("b", "1"), ("c", "2")]);
        let view = series.sub_list(1, 3);

        series.remove(2);

        assert_eq!(view.to_vec(), vec![p("b", "1")]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_sub_list_out_of_range_panics() {
        let series = form(&[("a", "0")]);
        series.sub_list(0, 2);
    }

    #[test]
    fn test_sub_list_named_is_snapshot() {
        let series = form(&[("X", "a"), ("Y", "b"), ("X", "c")]);

        let mut snapshot = series.sub_list_named("X", false);
        assert_eq!(snapshot.to_vec(), vec![p("X", "a"), p("X", "c")]);

        assert!(snapshot.remove_first("X", false));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let series = form(&[("a", "1")]);
        let mut copy = series.clone();

        copy.add("b", Some("2"));

        assert_eq!(series.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_sort_by_name() {
        let mut series = form(&[("b", "1"), ("a", "2"), ("b", "0")]);

        series.sort_by(|left, right| left.name.cmp(&right.name));

        assert_eq!(series.to_vec(), vec![p("a", "2"), p("b", "1"), p("b", "0")]);
    }

    #[test]
    fn test_retain_may_read_other_handles() {
        let mut series = form(&[("a", "1"), ("b", "2"), ("a", "3")]);
        let view = series.unmodifiable();

        let removed = series.retain(|entry| view.len() > 0 && entry.name == "a");

        assert_eq!(removed, 1);
        assert_eq!(view.to_vec(), vec![p("a", "1"), p("a", "3")]);
    }

    #[test]
    fn test_sort_by_may_read_other_handles() {
        let mut series = form(&[("b", "1"), ("a", "2"), ("c", "3")]);
        let head = series.sub_list(0, 1);

        series.sort_by(|left, right| {
            let pinned = head.get_first_value("b", false, None);
            (left.value.as_deref() == pinned.as_deref())
                .cmp(&(right.value.as_deref() == pinned.as_deref()))
                .then_with(|| left.name.cmp(&right.name))
        });

        assert_eq!(series.to_vec(), vec![p("a", "2"), p("c", "3"), p("b", "1")]);
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn test_mutating_inside_with_entries_panics() {
        let series = form(&[("a", "1")]);
        let mut range = series.sub_list(0, 1);

        series.with_entries(|_| range.add("b", Some("2")));
    }

    #[test]
    fn test_extend_and_insert() {
        let mut series = Form::new();
        series.extend([p("a", "1"), p("c", "3")]);
        series.insert(1, p("b", "2"));

        assert_eq!(series.to_vec(), vec![p("a", "1"), p("b", "2"), p("c", "3")]);
    }

    proptest! {
        #[test]
        fn prop_iteration_follows_add_order(
            pairs in proptest::collection::vec(("[a-cA-C]{1,2}", proptest::option::of("[a-z]{0,3}")), 0..32)
        ) {
            let mut series = Form::new();
            for (name, value) in &pairs {
                series.add(name, value.as_deref());
            }

            let seen: Vec<(String, Option<String>)> = series
                .iter()
                .map(|entry| (entry.name, entry.value))
                .collect();
            prop_assert_eq!(seen, pairs);
        }
    }
}
