//! Metric tag sets.
//!
//! Tags are DogStatsD-style `key:value` strings. Order is preserved because
//! downstream dashboards occasionally rely on it for display.

use std::fmt;

const STATUS_PREFIX: &str = "status:";

/// Outcome classification attached to every emission as `status:<value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    QueryFailure,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::QueryFailure => "query_failure",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered `key:value` tags with at most one `status` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `k:v,k:v` list.
    ///
    /// Entries are trimmed; empty entries and entries without a `:` are
    /// dropped silently.
    pub fn parse(input: &str) -> Self {
        input
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty() && pair.contains(':'))
            .map(str::to_string)
            .collect()
    }

    /// Return a copy of these tags carrying exactly one `status:<status>`.
    ///
    /// The first existing status tag is replaced in place, later ones are
    /// removed. Without one, the status is appended. `self` is untouched.
    pub fn with_status(&self, status: Status) -> TagSet {
        let status_tag = format!("{STATUS_PREFIX}{status}");
        let mut tags = Vec::with_capacity(self.tags.len() + 1);
        let mut placed = false;

        for tag in &self.tags {
            if tag.starts_with(STATUS_PREFIX) {
                if !placed {
                    tags.push(status_tag.clone());
                    placed = true;
                }
            } else {
                tags.push(tag.clone());
            }
        }

        if !placed {
            tags.push(status_tag);
        }

        TagSet { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(","))
    }
}
