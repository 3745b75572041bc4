//! # PEX Types
//!
//! Identifiers shared by the plant expert crates.
//!
//! Symptom and disease identifiers travel through the client as [`Code`] values so that a
//! malformed code is rejected once, at the boundary, instead of being checked by every consumer.

use std::borrow::Borrow;

/// Why a string is not a usable code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("code cannot be empty")]
    Empty,
    #[error("code '{0}' contains whitespace")]
    Whitespace(String),
}

/// Identifier of a symptom (`G01`) or a disease (`P01`).
///
/// Surrounding whitespace is trimmed; interior whitespace is rejected so that `"G01 G02"` is
/// never mistaken for a single code. Case is preserved and significant, matching how the rule
/// base keys its entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    pub fn new(input: impl AsRef<str>) -> Result<Self, CodeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CodeError::Empty);
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(CodeError::Whitespace(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Code {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad, so `{:<5}` lines codes up in tables
        f.pad(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Code {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
