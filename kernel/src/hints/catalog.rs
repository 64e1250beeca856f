//! `HintCatalog`: the named hint set consumed by search and decode.
//!
//! Lookup is by name; enumeration preserves the order the hints were given
//! in, which is also the order the search tries them in. Name uniqueness is
//! enforced at construction because paths identify hints by name alone.

use std::collections::HashMap;

use crate::digest::{canonical_hash, CatalogDigest, DOMAIN_HINT_CATALOG};
use crate::hints::operation::Hint;

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Error type for catalog construction and loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A hint has an empty name.
    EmptyName,
    /// A hint's operation has an empty target substring.
    EmptyTarget { name: String },
    /// Two hints share the same name.
    DuplicateName { name: String },
    /// The serialized catalog could not be parsed.
    Malformed { detail: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "hint with empty name"),
            Self::EmptyTarget { name } => {
                write!(f, "hint {name:?} has an empty target substring")
            }
            Self::DuplicateName { name } => write!(f, "duplicate hint name {name:?}"),
            Self::Malformed { detail } => write!(f, "malformed hint catalog: {detail}"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ---------------------------------------------------------------------------
// HintCatalog
// ---------------------------------------------------------------------------

/// An ordered, name-indexed set of hints.
#[derive(Debug, Clone, Default)]
pub struct HintCatalog {
    hints: Vec<Hint>,
    index: HashMap<String, usize>,
}

impl HintCatalog {
    /// Build a catalog from hints in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if two hints share a name, or
    /// the first [`Hint::validate`] failure.
    pub fn new(hints: Vec<Hint>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(hints.len());
        for (i, hint) in hints.iter().enumerate() {
            hint.validate()?;
            if index.insert(hint.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateName {
                    name: hint.name.clone(),
                });
            }
        }
        Ok(Self { hints, index })
    }

    /// Parse a JSON array of hints.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if the bytes are not a JSON array
    /// of hints, or any error from [`HintCatalog::new`].
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let hints: Vec<Hint> =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed {
                detail: e.to_string(),
            })?;
        Self::new(hints)
    }

    /// Look up a hint by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Hint> {
        self.index.get(name).map(|&i| &self.hints[i])
    }

    /// All hints, in enumeration order.
    #[must_use]
    pub fn list_all(&self) -> &[Hint] {
        &self.hints
    }

    /// Whether `name` is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Content digest of the catalog in enumeration order.
    ///
    /// Two catalogs with the same hints in the same order share a digest.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if serialization fails.
    pub fn digest(&self) -> Result<CatalogDigest, CatalogError> {
        // Struct fields serialize in declaration order, so the bytes are canonical.
        let bytes = serde_json::to_vec(&self.hints).map_err(|e| CatalogError::Malformed {
            detail: e.to_string(),
        })?;
        Ok(canonical_hash(DOMAIN_HINT_CATALOG, &bytes))
    }
}
