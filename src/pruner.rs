//! Partial-assignment pruning and candidate length filtering.
//!
//! Both work from one observation: once an assignment is completed, every
//! pattern expands to a substring of the target. So a pattern whose bound
//! parts already cannot fit in the target, or whose fully-expanded pieces
//! are not themselves substrings of the target, rules out every completion.

use std::rc::Rc;

use crate::assignment::Assignment;
use crate::expander::{expand, expand_partial};
use crate::model::{Model, Pattern};
use crate::symbol_char::{symbol_index, NUM_SYMBOL_SLOTS};

/// Checks partial assignments against a [`Model`].
///
/// Holds a per-symbol index of the patterns referencing each symbol, built
/// once, so [`Pruner::feasible_after`] only looks at what a binding can
/// affect.
///
/// # Panics
/// Methods taking a `symbol` panic if it is not in 'A'..='Z'.
#[derive(Debug)]
pub struct Pruner<'a> {
    model: &'a Model,
    patterns_by_symbol: [Vec<usize>; NUM_SYMBOL_SLOTS],
}

impl<'a> Pruner<'a> {
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        let mut patterns_by_symbol: [Vec<usize>; NUM_SYMBOL_SLOTS] = Default::default();
        for (i, p) in model.patterns().iter().enumerate() {
            for symbol in p.symbols() {
                patterns_by_symbol[symbol_index(symbol)].push(i);
            }
        }
        Self { model, patterns_by_symbol }
    }

    /// Indices of the patterns that reference `symbol`
    #[must_use]
    pub fn patterns_referencing(&self, symbol: char) -> &[usize] {
        &self.patterns_by_symbol[symbol_index(symbol)]
    }

    /// True unless some pattern proves that no completion of `assignment`
    /// can succeed.
    #[must_use]
    pub fn feasible(&self, assignment: &Assignment) -> bool {
        self.model.patterns().iter().all(|p| self.pattern_feasible(p, assignment))
    }

    /// Like [`Pruner::feasible`], restricted to the patterns referencing
    /// `symbol`.
    ///
    /// Equivalent to `feasible` when `symbol` is the latest binding and the
    /// assignment before it was already feasible.
    #[must_use]
    pub fn feasible_after(&self, symbol: char, assignment: &Assignment) -> bool {
        let patterns = self.model.patterns();
        self.patterns_referencing(symbol)
            .iter()
            .all(|&i| self.pattern_feasible(&patterns[i], assignment))
    }

    fn pattern_feasible(&self, pattern: &Pattern, assignment: &Assignment) -> bool {
        let target = self.model.target();

        if assignment.contains_all(pattern.symbol_mask) {
            return target.contains(expand(pattern, assignment).as_str());
        }
        if !assignment.contains_any(pattern.symbol_mask) {
            return true;
        }

        let partial = expand_partial(pattern, assignment);
        let symbols = self.model.symbols();
        let min_len = partial.unbound.iter().try_fold(partial.fixed_len, |acc, &c| {
            symbols.shortest_len(c).map(|shortest| acc + shortest)
        });
        match min_len {
            Some(n) if n <= target.len() => {}
            // too long, or an unbound symbol with nothing to bind
            _ => return false,
        }

        partial.fragments.iter().all(|fragment| target.contains(fragment.as_str()))
    }

    /// Longest candidate for `symbol` that still lets every pattern
    /// referencing it fit in the target, given the other symbols' bound
    /// values and shortest candidates.
    ///
    /// `None` means unconstrained (no pattern references `symbol`).
    fn length_budget(&self, symbol: char, assignment: &Assignment) -> Option<Budget> {
        let target_len = self.model.target().len();
        let symbols = self.model.symbols();
        let patterns = self.model.patterns();

        self.patterns_referencing(symbol)
            .iter()
            .map(|&i| {
                let p = &patterns[i];
                let mut others = p.literal_len();
                for &(c, n) in p.occurrences() {
                    if c == symbol {
                        continue;
                    }
                    let len = match assignment.get(c) {
                        Some(value) => value.len(),
                        None => match symbols.shortest_len(c) {
                            Some(shortest) => shortest,
                            None => return Budget::Nothing,
                        },
                    };
                    others += n * len;
                }
                let m = p.occurrences_of(symbol);
                match target_len.checked_sub(others) {
                    Some(room) => Budget::AtMost(room / m),
                    None => Budget::Nothing,
                }
            })
            .min()
    }

    /// Drop the candidates of `symbol` that are too long for some pattern
    /// referencing it. Order is preserved.
    #[must_use]
    pub fn filter_candidates(
        &self,
        symbol: char,
        candidates: &[Rc<str>],
        assignment: &Assignment,
    ) -> Vec<Rc<str>> {
        match self.length_budget(symbol, assignment) {
            None => candidates.to_vec(),
            Some(Budget::Nothing) => Vec::new(),
            Some(Budget::AtMost(max)) => candidates.iter().filter(|c| c.len() <= max).cloned().collect(),
        }
    }
}

/// Length allowance for one symbol. `Nothing` orders below every
/// `AtMost`, so taking the minimum over patterns is the tightest bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Budget {
    Nothing,
    AtMost(usize),
}
