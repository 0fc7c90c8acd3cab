//! Query request decoding
//!
//! Paged list endpoints receive their paging, sorting and filtering options
//! as plain parameters:
//!
//! | parameter | meaning                                       |
//! |-----------|-----------------------------------------------|
//! | `query`   | free-text query                               |
//! | `start`   | offset of the first row (default `0`)         |
//! | `limit`   | page size (default `0`, no limit)             |
//! | `sort`    | property to sort on                           |
//! | `dir`     | `ASC` for ascending, anything else descending |
//! | `filter`  | JSON array of `{"property", "value"}` objects |
//!
//! Only the first occurrence of each parameter is used.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::read::SeriesRead;
use crate::window::PaginatedWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub property: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Paging/sorting/filtering options exactly as they were received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: Option<String>,
    pub start: usize,
    pub limit: usize,
    pub sort_property: Option<String>,
    pub sort_direction: Option<String>,
    pub filters: Option<Vec<Filter>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Normalized query handed to a data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub query: Option<String>,
    pub start: usize,
    pub limit: usize,
    pub sort_property: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl QueryRequest {
    /// Decode the request options from a parameter series.
    pub fn from_series<S: SeriesRead>(params: &S) -> Result<Self, QueryError> {
        let first = |name: &str| params.get_first_value(name, false, None);

        Ok(Self {
            query: first("query"),
            start: parse_number("start", first("start"))?,
            limit: parse_number("limit", first("limit"))?,
            sort_property: first("sort"),
            sort_direction: first("dir"),
            filters: first("filter")
                .map(|json| parse_filters(&json))
                .transpose()?
                .flatten(),
        })
    }

    /// First filter on the given property.
    pub fn filter(&self, property: &str) -> Option<&Filter> {
        if property.is_empty() {
            return None;
        }

        self.filters
            .as_deref()?
            .iter()
            .find(|filter| filter.property == property)
    }

    pub fn to_query(&self) -> Query {
        Query {
            query: self.query.clone(),
            start: self.start,
            limit: self.limit,
            sort_property: self.sort_property.clone(),
            sort_direction: self.sort_direction.as_deref().map(|dir| {
                if dir == "ASC" {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                }
            }),
        }
    }
}

impl Query {
    /// Page `rows` with this query's offset and limit, `rows` holding the
    /// whole result set.
    pub fn paginate<T: Clone>(&self, rows: Vec<T>) -> PaginatedWindow<T> {
        let page_size = i32::try_from(self.limit).unwrap_or(i32::MAX);
        PaginatedWindow::over(rows, page_size, self.start)
    }
}

fn parse_number(name: &'static str, value: Option<String>) -> Result<usize, QueryError> {
    match value {
        None => Ok(0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidNumber { name, value }),
    }
}

/// Parse a JSON filter list. Blank input means no filter.
pub fn parse_filters(json: &str) -> Result<Option<Vec<Filter>>, QueryError> {
    if json.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(json)?))
}
