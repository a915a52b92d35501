//! Feasibility pre-check, run once before the search.
//!
//! Every check here is a necessary condition: failing one proves that no
//! assignment exists, passing all of them proves nothing. The checks cost
//! O(patterns × symbols per pattern).

use std::fmt;

use log::debug;

use crate::model::{Model, Pattern, SymbolTable};

/// Why a problem has no solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// A referenced or declared symbol has no candidates
    EmptyCandidateSet { symbol: char },
    /// A pattern without symbols does not occur in the target
    LiteralPatternMissing { pattern: String },
    /// A pattern's shortest possible expansion is longer than the target
    PatternTooLong { pattern: String, min_len: usize, target_len: usize },
    /// The search tried every candidate combination
    SearchExhausted,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::EmptyCandidateSet { symbol } => {
                write!(f, "symbol {symbol} has no candidate replacements")
            }
            Infeasibility::LiteralPatternMissing { pattern } => {
                write!(f, "pattern \"{pattern}\" has no symbols and does not occur in the target")
            }
            Infeasibility::PatternTooLong { pattern, min_len, target_len } => write!(
                f,
                "pattern \"{pattern}\" expands to at least {min_len} bytes but the target has {target_len}"
            ),
            Infeasibility::SearchExhausted => write!(f, "no assignment satisfies every pattern"),
        }
    }
}

/// Lower bound on the expanded length of `pattern`: its literal bytes plus,
/// for every symbol occurrence, that symbol's shortest candidate.
///
/// Returns `None` if a referenced symbol has no candidates.
#[must_use]
pub fn min_len(pattern: &Pattern, symbols: &SymbolTable) -> Option<usize> {
    pattern.occurrences().iter().try_fold(pattern.literal_len(), |acc, &(symbol, n)| {
        symbols.shortest_len(symbol).map(|shortest| acc + n * shortest)
    })
}

/// Run every pre-check, reporting the first failure.
///
/// Order: empty candidate sets, then symbol-free patterns, then length
/// bounds.
///
/// # Errors
/// Returns the [`Infeasibility`] that proves the problem unsolvable.
pub fn check(model: &Model) -> Result<(), Infeasibility> {
    let symbols = model.symbols();

    // 1. every referenced symbol, and every declared one, needs a candidate
    let empty = model
        .referenced_symbols()
        .chain(symbols.iter().map(|(c, _)| c))
        .find(|&c| symbols.candidates(c).is_empty());
    if let Some(symbol) = empty {
        return Err(Infeasibility::EmptyCandidateSet { symbol });
    }

    // 2. symbol-free patterns are already final
    let target = model.target();
    if let Some(p) = model.patterns().iter().find(|p| p.is_literal_only() && !target.contains(p.raw.as_str())) {
        return Err(Infeasibility::LiteralPatternMissing { pattern: p.raw.clone() });
    }

    // 3. length bound per pattern
    let target_len = target.len();
    for p in model.patterns() {
        // candidates are non-empty after step 1
        let min_len = min_len(p, symbols).unwrap_or(usize::MAX);
        if min_len > target_len {
            return Err(Infeasibility::PatternTooLong { pattern: p.raw.clone(), min_len, target_len });
        }
    }

    Ok(())
}

/// True iff the pre-check proves the problem infeasible.
#[must_use]
pub fn quick_reject(model: &Model) -> bool {
    match check(model) {
        Ok(()) => false,
        Err(reason) => {
            debug!("pre-check rejected: {reason}");
            true
        }
    }
}
