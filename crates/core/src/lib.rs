//! Core library for paramkit
//!
//! This crate implements the **Functional Core** of the paramkit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The paramkit project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`paramkit_core`** (this crate): In-memory data structures with zero I/O
//! - **`paramkit`**: Wire decoding, I/O and orchestration (the Imperative Shell)
//!
//! The core never parses wire data. A shell decodes a query string or a form
//! body into entries and hands them to a series built with a
//! [`SeriesFactory`](factory::SeriesFactory) of its choice.
//!
//! # Module Organization
//!
//! - [`parameter`]: The name/value entry type and name comparison
//! - [`factory`]: Entry factories and the [`Form`](factory::Form) series
//! - [`series`]: The ordered, multi-valued [`ParameterSeries`](series::ParameterSeries)
//! - [`read`]: Queries shared by series and read-only views
//! - [`view`]: The read-only [`ImmutableSeriesView`](view::ImmutableSeriesView)
//! - [`merge`]: Copying entries into an argument map
//! - [`window`]: The memoized [`PaginatedWindow`](window::PaginatedWindow)
//! - [`query`]: Paging, sorting and filtering options decoded from a series
//!
//! # Example Usage
//!
//! ```rust
//! use paramkit_core::factory::Form;
//! use paramkit_core::read::SeriesRead;
//!
//! let mut form = Form::new();
//! form.add("Accept", Some("text/html"));
//! form.add("accept", Some("application/json"));
//!
//! assert_eq!(
//!     form.get_values("Accept", ",", true).as_deref(),
//!     Some("text/html,application/json")
//! );
//!
//! form.set("ACCEPT", Some("*/*"), true);
//! assert_eq!(form.len(), 1);
//! ```

pub mod error;
pub mod factory;
pub mod merge;
pub mod parameter;
pub mod query;
pub mod read;
pub mod series;
pub mod view;
pub mod window;

pub use error::{QueryError, SeriesError};
pub use factory::{Form, FormFactory, SeriesFactory};
pub use merge::{MergeSlot, MergeValue};
pub use parameter::{Parameter, ParameterEntry};
pub use read::SeriesRead;
pub use series::ParameterSeries;
pub use view::ImmutableSeriesView;
pub use window::PaginatedWindow;
