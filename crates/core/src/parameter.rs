//! Parameter entries
//!
//! A parameter is a name with an optional value, the unit stored in every
//! [`ParameterSeries`](crate::series::ParameterSeries). A missing value
//! (`None`) is distinct from an empty one (`Some("")`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability set every entry stored in a series must provide
pub trait ParameterEntry: Clone {
    fn name(&self) -> &str;

    fn value(&self) -> Option<&str>;

    /// Replace the value in place, keeping the name.
    fn set_value(&mut self, value: Option<String>);
}

/// Name/value pair as decoded from a query string or form body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_owned),
        }
    }
}

impl ParameterEntry for Parameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Compare two names, optionally ignoring case
///
/// Case folding uses Unicode lowercase mapping so that non-ASCII names fold
/// the same way header names do in most HTTP stacks.
pub fn names_match(left: &str, right: &str, ignore_case: bool) -> bool {
    if left == right {
        return true;
    }

    ignore_case
        && left
            .chars()
            .flat_map(char::to_lowercase)
            .eq(right.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_exact() {
        assert!(names_match("Accept", "Accept", false));
        assert!(names_match("Accept", "Accept", true));
        assert!(!names_match("Accept", "accept", false));
    }

    #[test]
    fn test_names_match_ignore_case() {
        assert!(names_match("Content-Type", "content-type", true));
        assert!(names_match("STRASSE", "strasse", true));
        assert!(names_match("Émile", "émile", true));
        assert!(!names_match("Accept", "Accepts", true));
    }

    #[test]
    fn test_set_value_keeps_name() {
        let mut param = Parameter::new("limit", Some("10"));
        param.set_value(None);

        assert_eq!(param.name(), "limit");
        assert_eq!(param.value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Parameter::new("q", Some("rust")).to_string(), "q=rust");
        assert_eq!(Parameter::new("flag", None).to_string(), "flag");
        assert_eq!(Parameter::new("empty", Some("")).to_string(), "empty=");
    }
}
