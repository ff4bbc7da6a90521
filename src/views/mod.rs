// File: ./src/views/mod.rs
// Per-screen controllers: what to fetch, how to derive what is shown, how to mutate.
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod journals;
pub mod motivation;
pub mod profile;
pub mod therapists;

use crate::client::ApiError;
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("That action is not available for this session")]
    NotAllowed,
}

pub type ViewResult<T> = Result<T, ViewError>;

impl ViewError {
    pub fn user_message(&self) -> String {
        match self {
            ViewError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Selection over an enumerated value: everything, or exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: Copy + PartialEq + IntoEnumIterator> Filter<T> {
    /// A missing value only passes the `All` filter.
    pub fn matches(&self, value: Option<T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => value == Some(*wanted),
        }
    }

    pub fn apply<'a, I, F>(&self, items: &'a [I], key: F) -> Vec<&'a I>
    where
        F: Fn(&I) -> Option<T>,
    {
        items.iter().filter(|i| self.matches(key(i))).collect()
    }

    /// All, then each variant in declaration order, then back to All.
    pub fn next(self) -> Self {
        let mut variants = T::iter();
        match self {
            Filter::All => variants.next().map_or(Filter::All, Filter::Only),
            Filter::Only(current) => {
                let mut rest = variants.skip_while(|v| *v != current);
                rest.next();
                rest.next().map_or(Filter::All, Filter::Only)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "All"),
            Filter::Only(v) => write!(f, "{}", v),
        }
    }
}

/// Case-insensitive substring test used by every search box.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Blank input becomes `None`.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Optional whole number; blank is `None`, garbage is an error naming the field.
pub(crate) fn optional_number(s: &str, field: &str) -> ViewResult<Option<u32>> {
    match non_empty(s) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ViewError::Invalid(format!("{} must be a whole number", field))),
    }
}
