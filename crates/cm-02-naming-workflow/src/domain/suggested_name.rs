//! # Suggested Names
//!
//! A proposed cat name, parsed once at the edge.
//!
//! ## Rules
//!
//! 1. Leading and trailing whitespace is trimmed
//! 2. The trimmed name is 1 to [`MAX_NAME_LEN`] characters
//! 3. Only ASCII letters, space, hyphen and apostrophe are allowed
//!
//! Two suggestions are duplicates when their trimmed forms are byte-equal.
//! Case is significant: `"Luna"` and `"luna"` are distinct.

use shared_types::NamingError;
use std::fmt;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// A validated, trimmed suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestedName(String);

impl SuggestedName {
    pub fn parse(raw: &str) -> Result<Self, NamingError> {
        let name = raw.trim();

        let len = name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(NamingError::validation(format!(
                "Suggested name must be between 1 and {} characters",
                MAX_NAME_LEN
            )));
        }

        if !name.chars().all(is_name_char) {
            return Err(NamingError::validation(
                "Suggested name can only contain letters, spaces, hyphens, and apostrophes",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\'')
}

impl fmt::Display for SuggestedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SuggestedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
