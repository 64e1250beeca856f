//! `apply_hint()`: the single rewrite primitive, plus `decode` and `replay`.
//!
//! Every application goes through the catalog: a name that is not declared
//! fails closed with [`ApplyFailure::HintNotFound`]. Application is purely
//! functional; inputs are never mutated.

use crate::hints::catalog::HintCatalog;

/// Typed failure for hint application. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyFailure {
    /// The hint name is not declared in the catalog.
    HintNotFound { name: String },
    /// `decode` was asked to apply an empty list of hints.
    EmptySelection,
}

impl std::fmt::Display for ApplyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HintNotFound { name } => write!(f, "hint {name:?} not found"),
            Self::EmptySelection => write!(f, "no hints selected"),
        }
    }
}

impl std::error::Error for ApplyFailure {}

/// Apply the hint called `name` to `text`.
///
/// # Errors
///
/// Returns [`ApplyFailure::HintNotFound`] if `name` is not in `catalog`.
pub fn apply_hint(text: &str, name: &str, catalog: &HintCatalog) -> Result<String, ApplyFailure> {
    let hint = catalog
        .lookup(name)
        .ok_or_else(|| ApplyFailure::HintNotFound {
            name: name.to_owned(),
        })?;
    Ok(hint.operation.apply(text))
}

/// Apply `names` to `text` in order and return the final string.
///
/// # Errors
///
/// Returns [`ApplyFailure::EmptySelection`] if `names` is empty, or
/// [`ApplyFailure::HintNotFound`] for the first undeclared name.
pub fn decode<S: AsRef<str>>(
    text: &str,
    names: &[S],
    catalog: &HintCatalog,
) -> Result<String, ApplyFailure> {
    if names.is_empty() {
        return Err(ApplyFailure::EmptySelection);
    }
    names.iter().try_fold(text.to_owned(), |current, name| {
        apply_hint(&current, name.as_ref(), catalog)
    })
}

/// Apply `names` to `start` in order, keeping every intermediate string.
///
/// The result always starts with `start` and has `names.len() + 1` entries.
/// An empty path is valid and yields `[start]`.
///
/// # Errors
///
/// Returns [`ApplyFailure::HintNotFound`] for the first undeclared name.
pub fn replay<S: AsRef<str>>(
    start: &str,
    names: &[S],
    catalog: &HintCatalog,
) -> Result<Vec<String>, ApplyFailure> {
    let mut steps = Vec::with_capacity(names.len() + 1);
    steps.push(start.to_owned());
    for name in names {
        let next = apply_hint(&steps[steps.len() - 1], name.as_ref(), catalog)?;
        steps.push(next);
    }
    Ok(steps)
}
