//! Domain types for the blog list with strong typing.
//!
//! Blog identifiers are a newtype over the store's integer key, parsed from
//! path segments. Candidate payloads and their validation live in the
//! [`blog`] and [`user`] submodules and do not depend on any wire format.

pub mod blog;
pub mod user;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use blog::{BlogChanges, BlogDraft, NewBlog, validate_blog_changes, validate_new_blog};
pub use user::{NewUser, UserDraft, validate_new_user};

/// Returned when a path segment cannot be read as a store identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed id: {0:?}")]
pub struct MalformedId(pub String);

/// Store-assigned identifier of a blog document.
///
/// ```rust
/// use bloglist::domain::BlogId;
///
/// let id: BlogId = "42".parse().unwrap();
/// assert_eq!(id.value(), 42);
/// assert!("0".parse::<BlogId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlogId(i32);

impl BlogId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BlogId> for i32 {
    fn from(id: BlogId) -> Self {
        id.0
    }
}

impl FromStr for BlogId {
    type Err = MalformedId;

    /// Only positive decimal integers are accepted; the store never
    /// assigns zero or negative keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(MalformedId(s.to_string())),
        }
    }
}

/// A single violated constraint on a candidate payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Non-empty list of violations produced by a validation function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![Violation::new(field, message)])
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation::new(field, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    /// Turns the collected violations into the outcome of a validation run.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_id_parses_positive_integers() {
        assert_eq!("7".parse::<BlogId>().unwrap(), BlogId::new(7));
        assert_eq!(BlogId::new(7).to_string(), "7");
    }

    #[test]
    fn blog_id_rejects_malformed_input() {
        for raw in ["0", "-3", "abc", "", "5a2f9c0e1d", "99999999999"] {
            let err = raw.parse::<BlogId>().unwrap_err();
            assert_eq!(err, MalformedId(raw.to_string()));
        }
    }

    #[test]
    fn violations_display_joins_messages() {
        let mut violations = Violations::default();
        violations.push("title", "title is required");
        violations.push("author", "author is required");
        assert_eq!(
            violations.to_string(),
            "title is required; author is required"
        );
        assert_eq!(violations.as_slice().len(), 2);
    }

    #[test]
    fn finish_succeeds_only_when_empty() {
        assert_eq!(Violations::default().finish(1), Ok(1));
        assert!(Violations::single("x", "bad").finish(1).is_err());
    }
}
