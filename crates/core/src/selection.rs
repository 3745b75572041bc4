//! The set of symptom codes the user has chosen.

use pex_types::Code;
use std::collections::BTreeSet;

/// What a toggle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Unique symptom codes, changed only by [`Selection::toggle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    codes: BTreeSet<Code>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `code` if present, otherwise add it.
    pub fn toggle(&mut self, code: Code) -> Toggled {
        if self.codes.remove(&code) {
            Toggled::Removed
        } else {
            self.codes.insert(code);
            Toggled::Added
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// All selected codes. Order carries no meaning.
    pub fn current(&self) -> Vec<Code> {
        self.codes.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Code> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
