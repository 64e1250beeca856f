//! `HintOperation` and `Hint`: a named single-substring rewrite rule.

use serde::{Deserialize, Serialize};

/// The rewrite a hint performs.
///
/// Serialized as an internally tagged object so catalogs read naturally:
/// `{"type":"remove","target":"た"}` or
/// `{"type":"replace","target":"はみ","replacement":"き"}`.
///
/// Invariant: `target` is non-empty (enforced by [`Hint::validate`] and by
/// `HintCatalog::new`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HintOperation {
    /// Delete every occurrence of `target`.
    Remove { target: String },
    /// Substitute every occurrence of `target` with `replacement`.
    ///
    /// An empty `replacement` deletes, exactly like [`HintOperation::Remove`].
    Replace {
        target: String,
        #[serde(default)]
        replacement: String,
    },
}

impl HintOperation {
    /// The substring this operation looks for.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Remove { target } | Self::Replace { target, .. } => target,
        }
    }

    /// Whether applying this operation to `text` can change anything.
    ///
    /// A cheap pre-filter: an operation whose target does not occur in
    /// `text` is the identity on `text`.
    #[must_use]
    pub fn can_apply(&self, text: &str) -> bool {
        let target = self.target();
        !target.is_empty() && text.contains(target)
    }

    /// Apply the operation to `text`.
    ///
    /// Occurrences are matched left to right, non-overlapping, as whole
    /// substrings (no pattern syntax). The input is never mutated.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Remove { target } if !target.is_empty() => text.replace(target.as_str(), ""),
            Self::Replace {
                target,
                replacement,
            } if !target.is_empty() => text.replace(target.as_str(), replacement),
            // An empty target would match between every char; treat it as identity.
            _ => text.to_owned(),
        }
    }
}

/// A named hint: a unique key, display data, and its operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Unique key. The search uses it as path label.
    pub name: String,
    /// Phonetic reading of the name (display only).
    #[serde(default)]
    pub reading: String,
    /// Human-readable explanation of the rule.
    #[serde(default)]
    pub description: String,
    /// The rewrite itself.
    pub operation: HintOperation,
}

impl Hint {
    /// Build a `Remove` hint with empty display data.
    #[must_use]
    pub fn remove(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reading: String::new(),
            description: String::new(),
            operation: HintOperation::Remove {
                target: target.into(),
            },
        }
    }

    /// Build a `Replace` hint with empty display data.
    #[must_use]
    pub fn replace(
        name: impl Into<String>,
        target: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reading: String::new(),
            description: String::new(),
            operation: HintOperation::Replace {
                target: target.into(),
                replacement: replacement.into(),
            },
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the structural invariants of a single hint.
    ///
    /// # Errors
    ///
    /// Returns [`super::catalog::CatalogError::EmptyName`] or
    /// [`super::catalog::CatalogError::EmptyTarget`].
    pub fn validate(&self) -> Result<(), super::catalog::CatalogError> {
        if self.name.is_empty() {
            return Err(super::catalog::CatalogError::EmptyName);
        }
        if self.operation.target().is_empty() {
            return Err(super::catalog::CatalogError::EmptyTarget {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}
