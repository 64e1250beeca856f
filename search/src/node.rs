//! Search states, moves, and the frontier ordering key.

use std::cmp::Ordering;

/// One hop in a path: a single hint, or two hints applied together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// Apply one named hint.
    Single(String),
    /// Apply two named hints in order as one hop.
    Compound(String, String),
}

impl Move {
    /// Names of the hints this move applies, in application order.
    #[must_use]
    pub fn hint_names(&self) -> Vec<&str> {
        match self {
            Self::Single(a) => vec![a.as_str()],
            Self::Compound(a, b) => vec![a.as_str(), b.as_str()],
        }
    }

    /// Display label used in reported paths (`"a"` or `"a+b"`).
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(a) => f.write_str(a),
            Self::Compound(a, b) => write!(f, "{a}+{b}"),
        }
    }
}

/// An immutable search state in the frontier.
///
/// Ordering for frontier extraction uses `(f_cost, depth, creation_order)`
/// where `f_cost = depth + h_cost`. Lower is better; ties broken by
/// shallower depth, then older creation order.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Current text.
    pub text: String,
    /// Moves applied since the start, in order.
    pub moves: Vec<Move>,
    /// Hop count (`moves.len()`), the `g` term.
    pub depth: u32,
    /// Heuristic distance to the target, the `h` term.
    pub h_cost: f64,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl SearchState {
    /// The root state of a run.
    #[must_use]
    pub fn root(text: impl Into<String>, h_cost: f64) -> Self {
        Self {
            text: text.into(),
            moves: Vec::new(),
            depth: 0,
            h_cost,
            creation_order: 0,
        }
    }

    /// Successor produced by applying `mv` to this state.
    #[must_use]
    pub fn child(&self, text: String, mv: Move, h_cost: f64, creation_order: u64) -> Self {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(mv);
        Self {
            text,
            moves,
            depth: self.depth.saturating_add(1),
            h_cost,
            creation_order,
        }
    }

    /// Compute `f_cost = g + h` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        f64::from(self.depth) + self.h_cost
    }

    /// Path labels, one per move.
    #[must_use]
    pub fn path(&self) -> Vec<String> {
        self.moves.iter().map(Move::label).collect()
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
/// `f_cost` is compared with [`f64::total_cmp`] so the order is total.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&SearchState> for FrontierKey {
    fn from(state: &SearchState) -> Self {
        Self {
            f_cost: state.f_cost(),
            depth: state.depth,
            creation_order: state.creation_order,
        }
    }
}
