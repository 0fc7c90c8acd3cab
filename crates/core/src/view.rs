//! Read-only series wrapper
//!
//! An [`ImmutableSeriesView`] shares the storage of the series it was created
//! from. Reads always reflect the current state of that series, including
//! changes its owner makes after the view was handed out. Copy the series
//! first when that aliasing is not wanted.

use std::fmt;
use std::rc::Rc;

use crate::error::SeriesError;
use crate::factory::SeriesFactory;
use crate::read::SeriesRead;
use crate::series::ParameterSeries;

/// Series wrapper rejecting every mutation with [`SeriesError::Immutable`]
pub struct ImmutableSeriesView<F: SeriesFactory> {
    inner: ParameterSeries<F>,
}

fn rejected<T>(operation: &'static str) -> Result<T, SeriesError> {
    Err(SeriesError::Immutable { operation })
}

impl<F: SeriesFactory> ImmutableSeriesView<F> {
    pub(crate) fn new(inner: ParameterSeries<F>) -> Self {
        Self { inner }
    }

    pub fn add(&mut self, _name: &str, _value: Option<&str>) -> Result<bool, SeriesError> {
        rejected("add")
    }

    pub fn push(&mut self, _entry: F::Entry) -> Result<(), SeriesError> {
        rejected("push")
    }

    pub fn insert(&mut self, _index: usize, _entry: F::Entry) -> Result<(), SeriesError> {
        rejected("insert")
    }

    pub fn remove(&mut self, _index: usize) -> Result<Option<F::Entry>, SeriesError> {
        rejected("remove")
    }

    pub fn clear(&mut self) -> Result<(), SeriesError> {
        rejected("clear")
    }

    pub fn remove_all(&mut self, _name: &str, _ignore_case: bool) -> Result<bool, SeriesError> {
        rejected("remove_all")
    }

    pub fn remove_first(&mut self, _name: &str, _ignore_case: bool) -> Result<bool, SeriesError> {
        rejected("remove_first")
    }

    pub fn set(
        &mut self,
        _name: &str,
        _value: Option<&str>,
        _ignore_case: bool,
    ) -> Result<Option<F::Entry>, SeriesError> {
        rejected("set")
    }

    /// Read-only live view over the positions `from..to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > len`.
    pub fn sub_list(&self, from: usize, to: usize) -> Self {
        Self::new(self.inner.sub_list(from, to))
    }

    /// Copy the visible entries into a new, mutable series.
    pub fn to_owned_series(&self) -> ParameterSeries<F> {
        self.inner.clone()
    }
}

impl<F: SeriesFactory> SeriesRead for ImmutableSeriesView<F> {
    type Entry = F::Entry;
    type Factory = F;

    fn with_entries<R>(&self, f: impl FnOnce(&[Self::Entry]) -> R) -> R {
        self.inner.with_entries(f)
    }

    fn factory(&self) -> Rc<F> {
        self.inner.factory()
    }
}

/// Cloning a view yields another view on the same storage.
impl<F: SeriesFactory> Clone for ImmutableSeriesView<F> {
    fn clone(&self) -> Self {
        Self::new(self.inner.share())
    }
}

impl<F> fmt::Debug for ImmutableSeriesView<F>
where
    F: SeriesFactory,
    F::Entry: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImmutableSeriesView")
            .field(&self.inner)
            .finish()
    }
}
