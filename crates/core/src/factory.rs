//! Entry factories
//!
//! A series never constructs entries itself. It is given a factory at
//! construction time and every entry created through [`ParameterSeries::add`]
//! or [`ParameterSeries::set`] comes from it. Series derived from another one
//! (sub-lists, snapshots, copies) reuse the same factory, so they stay of the
//! same concrete kind.
//!
//! [`ParameterSeries::add`]: crate::series::ParameterSeries::add
//! [`ParameterSeries::set`]: crate::series::ParameterSeries::set

use crate::parameter::{Parameter, ParameterEntry};
use crate::series::ParameterSeries;

/// Builds the entries of one kind of series
pub trait SeriesFactory: 'static {
    type Entry: ParameterEntry;

    fn create_parameter(&self, name: String, value: Option<String>) -> Self::Entry;
}

/// Any `Fn(name, value) -> entry` closure can act as a factory.
impl<F, E> SeriesFactory for F
where
    F: Fn(String, Option<String>) -> E + 'static,
    E: ParameterEntry,
{
    type Entry = E;

    fn create_parameter(&self, name: String, value: Option<String>) -> E {
        self(name, value)
    }
}

/// Factory for plain [`Parameter`] entries, the kind produced by decoded
/// query strings and form bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormFactory;

impl SeriesFactory for FormFactory {
    type Entry = Parameter;

    fn create_parameter(&self, name: String, value: Option<String>) -> Parameter {
        Parameter { name, value }
    }
}

/// Series of [`Parameter`] entries
pub type Form = ParameterSeries<FormFactory>;

impl Form {
    pub fn new() -> Self {
        ParameterSeries::with_factory(FormFactory)
    }

    /// Build a form from `(name, value)` pairs, preserving their order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Parameter::new(name, value))
            .collect()
    }
}

impl FromIterator<Parameter> for Form {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        ParameterSeries::from_entries(FormFactory, iter.into_iter().collect())
    }
}
