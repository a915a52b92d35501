//! Backtracking search for an assignment that makes every pattern a
//! substring of the target.
//!
//! # Error Handling
//!
//! The solver uses [`SolverError`] with two variants:
//!
//! - S001: `ParseFailure` (Problem text could not be parsed (wraps [`ParseError`]))
//! - S002: `InputUnreadable` (Problem source could not be read)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//! An unsolvable problem is not an error: it is reported as
//! [`SolveOutcome::Infeasible`] with the reason.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use swe::solver::{self, SolveOutcome};
//!
//! let result = solver::solve_input("1\nabcdef\nXc\nX:ab,abc\n")?;
//! match result.outcome {
//!     SolveOutcome::Solved(solution) => assert_eq!(solution.get('X'), Some("ab")),
//!     SolveOutcome::Infeasible(reason) => panic!("unexpected: {reason}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Handling Errors with Detailed Messages
//!
//! ```
//! use swe::solver;
//!
//! match solver::solve_input("two\nabc\n") {
//!     Ok(result) => println!("{:?}", result.outcome),
//!     Err(e) => {
//!         // Show detailed error with code and help
//!         eprintln!("{}", e.display_detailed());
//!         assert_eq!(e.code(), "S001");
//!     }
//! }
//! ```

use std::cmp::Reverse;
use std::fmt;
use std::io;
use std::rc::Rc;

use log::{debug, info};

use crate::assignment::{Assignment, Solution};
use crate::errors::ParseError;
use crate::expander::expand;
use crate::feasibility::{self, Infeasibility};
use crate::model::Model;
use crate::parser::{parse_model, InputSource};
use crate::pruner::Pruner;
use crate::symbol_char::NUM_SYMBOL_SLOTS;

/// What a solver run concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A verified assignment of every symbol
    Solved(Solution),
    /// No assignment exists, with the first reason found
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Infeasible(_) => None,
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate bindings tried
    pub nodes: u64,
    /// Bindings rejected by the pruner
    pub pruned: u64,
    /// Candidates dropped by the length filter before being tried
    pub filtered: u64,
    /// Bindings undone after their subtree failed or was pruned
    pub backtracks: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} node(s), {} pruned, {} filtered, {} backtrack(s)",
            self.nodes, self.pruned, self.filtered, self.backtracks
        )
    }
}

/// Result of a solver run that got as far as a parsed model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub outcome: SolveOutcome,
    /// All zero when the pre-check rejected the problem
    pub stats: SearchStats,
}

/// Unified error type for the solver pipeline.
///
/// Covers everything that can stop a run before there is a model to search,
/// so callers only need to handle a single `Result<_, SolverError>`.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The problem text could not be parsed into a [`Model`].
    ///
    /// These originate from the parser (`ParseError`), which we box to keep the
    /// error type size stable.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    /// The problem source could not be read.
    #[error("could not read input from {source_name}: {source}")]
    InputUnreadable {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "S001",
            SolverError::InputUnreadable { .. } => "S002",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::InputUnreadable { .. } => {
                Some("Pass the path of a readable UTF-8 problem file, or pipe the problem on standard input")
            }
            SolverError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            SolverError::InputUnreadable { .. } => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// The order in which symbols are assigned.
///
/// Every declared or referenced symbol appears once. Symbols referenced by
/// more patterns come first; ties go to the symbol with fewer candidates,
/// then to the alphabetically smaller one. Unreferenced symbols sort last.
#[must_use]
pub fn symbol_order(model: &Model) -> Vec<char> {
    let symbols = model.symbols();
    let mut order: Vec<char> = symbols.iter().map(|(c, _)| c).collect();
    order.extend(model.referenced_symbols().filter(|&c| !symbols.is_declared(c)));
    order.sort_by_key(|&c| (Reverse(model.occurrence_count(c)), symbols.candidates(c).len(), c));
    order
}

/// Depth-first search state.
///
/// Owns the only mutable [`Assignment`]; at depth `d` exactly the first `d`
/// symbols of `order` are bound.
struct SearchEngine<'a> {
    model: &'a Model,
    pruner: Pruner<'a>,
    order: Vec<char>,
    /// Candidates per position in `order`, shortest first
    candidates: Vec<Vec<Rc<str>>>,
    assignment: Assignment,
    stats: SearchStats,
}

impl<'a> SearchEngine<'a> {
    fn new(model: &'a Model, order: Vec<char>) -> Self {
        let candidates = order
            .iter()
            .map(|&c| {
                let mut list = model.symbols().candidates(c).to_vec();
                // stable: equal lengths keep declaration order
                list.sort_by_key(|s| s.len());
                list
            })
            .collect();

        Self {
            model,
            pruner: Pruner::new(model),
            order,
            candidates,
            assignment: Assignment::default(),
            stats: SearchStats::default(),
        }
    }

    /// Try to extend the assignment from `depth` onward. On success the
    /// assignment is left total and verified.
    fn search(&mut self, depth: usize) -> bool {
        debug_assert_eq!(
            self.assignment.len(),
            depth,
            "bound symbols ({}) must equal search depth ({})",
            self.assignment.len(),
            depth
        );

        let Some(&symbol) = self.order.get(depth) else {
            return self.verify();
        };

        let all = &self.candidates[depth];
        let viable = self.pruner.filter_candidates(symbol, all, &self.assignment);
        self.stats.filtered += (all.len() - viable.len()) as u64;

        for value in viable {
            self.stats.nodes += 1;
            self.assignment.push(symbol, value);

            if !self.pruner.feasible_after(symbol, &self.assignment) {
                self.stats.pruned += 1;
            } else if self.search(depth + 1) {
                return true;
            }

            self.assignment.pop();
            self.stats.backtracks += 1;
        }

        false
    }

    /// Full check of a total assignment against every pattern.
    fn verify(&self) -> bool {
        let target = self.model.target();
        self.model
            .patterns()
            .iter()
            .all(|p| target.contains(expand(p, &self.assignment).as_str()))
    }
}

/// Solve a parsed problem.
///
/// Runs the feasibility pre-check first; only if it passes is the search
/// started. The outcome is deterministic for a given model.
#[must_use]
pub fn solve(model: &Model) -> SolveResult {
    if let Err(reason) = feasibility::check(model) {
        debug!("pre-check rejected: {reason}");
        return SolveResult { outcome: SolveOutcome::Infeasible(reason), stats: SearchStats::default() };
    }

    let order = symbol_order(model);
    debug_assert!(order.len() <= NUM_SYMBOL_SLOTS);
    debug!("symbol order: {}", order.iter().collect::<String>());

    let mut engine = SearchEngine::new(model, order);
    let found = engine.search(0);
    info!("search finished: {}", engine.stats);

    let outcome = if found {
        SolveOutcome::Solved(engine.assignment.freeze())
    } else {
        debug_assert!(engine.assignment.is_empty(), "failed search must unwind every binding");
        SolveOutcome::Infeasible(Infeasibility::SearchExhausted)
    };
    SolveResult { outcome, stats: engine.stats }
}

/// Parse problem text and solve it.
///
/// # Errors
///
/// Returns [`SolverError::ParseFailure`] if the text is not a well-formed
/// problem.
pub fn solve_input(input: &str) -> Result<SolveResult, SolverError> {
    let model = parse_model(input)?;
    Ok(solve(&model))
}

/// Read a problem from `source`, parse it and solve it.
///
/// # Errors
///
/// Returns [`SolverError::InputUnreadable`] if the source cannot be read,
/// or [`SolverError::ParseFailure`] if its contents cannot be parsed.
pub fn solve_source(source: &InputSource) -> Result<SolveResult, SolverError> {
    let contents = source
        .read_to_string()
        .map_err(|e| SolverError::InputUnreadable { source_name: source.name(), source: e })?;
    solve_input(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn solve_text(input: &str) -> SolveResult {
        solve_input(input).unwrap()
    }

    #[test]
    fn test_single_symbol_solution() {
        let result = solve_text("1\nabcdef\nXc\nX:ab,abc\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.get('X'), Some("ab"));
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn test_only_combination_fails() {
        let result = solve_text("1\nxyz\nAB\nA:p\nB:q\n");
        assert_eq!(result.outcome, SolveOutcome::Infeasible(Infeasibility::SearchExhausted));
    }

    #[test]
    fn test_two_patterns_solved_together() {
        let result = solve_text("2\nhello world\nAo\nBd\nA:hell,he\nB:worl,wor\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.iter().collect::<Vec<_>>(), vec![('A', "hell"), ('B', "worl")]);
    }

    #[test]
    fn test_empty_candidate_list_is_infeasible() {
        let result = solve_text("1\nab\nX\nX:\n");
        assert_eq!(
            result.outcome,
            SolveOutcome::Infeasible(Infeasibility::EmptyCandidateSet { symbol: 'X' })
        );
        assert_eq!(result.stats, SearchStats::default());
    }

    #[test]
    fn test_failed_search_unwinds_assignment() {
        let model: Model = "1\nxyz\nAB\nA:p\nB:q\n".parse().unwrap();
        assert!(feasibility::check(&model).is_ok());

        let mut engine = SearchEngine::new(&model, symbol_order(&model));
        assert!(!engine.search(0));
        assert!(engine.assignment.is_empty());
        assert!(engine.stats.nodes > 0);
        assert_eq!(engine.stats.backtracks, engine.stats.nodes);
    }

    #[test]
    fn test_successful_search_leaves_total_assignment() {
        let model: Model = "2\nhello world\nAo\nBd\nA:hell,he\nB:worl,wor\n".parse().unwrap();
        let mut engine = SearchEngine::new(&model, symbol_order(&model));
        assert!(engine.search(0));
        assert_eq!(engine.assignment.len(), 2);
    }

    #[test]
    fn test_too_long_rejected_before_search() {
        let result = solve_text("1\nshort\nXYZ\nX:aaa,aaaa\nY:bbb,bbbb\nZ:ccc,cccc\n");
        assert!(matches!(
            result.outcome,
            SolveOutcome::Infeasible(Infeasibility::PatternTooLong { .. })
        ));
        assert_eq!(result.stats.nodes, 0);
    }

    #[test]
    fn test_no_symbols_gives_empty_solution() {
        let result = solve_text("2\nhello world\nhello\no w\n");
        let solution = result.outcome.solution().unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_shorter_candidate_preferred() {
        // both values work; the shorter one is tried first
        let result = solve_text("1\nabcabc\nX\nX:abca,ab\n");
        assert_eq!(result.outcome.solution().unwrap().get('X'), Some("ab"));
    }

    #[test]
    fn test_equal_lengths_keep_declaration_order() {
        let result = solve_text("1\nabcabc\nX\nX:ca,ab\n");
        assert_eq!(result.outcome.solution().unwrap().get('X'), Some("ca"));
    }

    #[test]
    fn test_backtracking_across_symbols() {
        // with A=ab, pattern AB needs B=c; B=x is tried first and pruned
        let result = solve_text("2\nabcd\nAc\nAB\nA:ab,zz\nB:x,c\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.get('A'), Some("ab"));
        assert_eq!(solution.get('B'), Some("c"));
        assert!(result.stats.backtracks >= 1);
    }

    #[test]
    fn test_unreferenced_symbol_is_assigned() {
        let result = solve_text("1\nabc\nX\nX:b\nQ:qq,q\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.get('X'), Some("b"));
        assert_eq!(solution.get('Q'), Some("q"));
    }

    #[test]
    fn test_replacement_text_is_not_rescanned() {
        // A's value "B" stays literal, so "AB" expands to "Bz"
        let result = solve_text("1\nxBzx\nAB\nA:B\nB:z\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.get('A'), Some("B"));
    }

    #[test]
    fn test_symbol_order() {
        let model: Model = "3\nxyz\nAB\nB\nC\nA:a,b,c\nB:a,b\nC:a\nQ:q\n".parse().unwrap();
        // B is in two patterns; A and C in one each, C has fewer candidates
        assert_eq!(symbol_order(&model), vec!['B', 'C', 'A', 'Q']);
    }

    #[test]
    fn test_symbol_order_breaks_ties_alphabetically() {
        let model: Model = "1\nxyz\nYX\nX:a\nY:b\n".parse().unwrap();
        assert_eq!(symbol_order(&model), vec!['X', 'Y']);
    }

    #[test]
    fn test_stats_count_work() {
        let result = solve_text("1\nabc\nXY\nX:a,b\nY:z,c\n");
        let solution = result.outcome.solution().unwrap();
        assert_eq!(solution.get('X'), Some("b"));
        assert_eq!(solution.get('Y'), Some("c"));
        assert!(result.stats.nodes >= 2);
        assert!(result.stats.to_string().contains("node(s)"));
    }

    #[test]
    fn test_parse_failure_is_s001() {
        let err = solve_input("two\nabc\n").unwrap_err();
        assert_eq!(err.code(), "S001");
        assert!(err.display_detailed().contains("E002"));
        assert!(err.help().is_none());
    }

    #[test]
    fn test_unreadable_source_is_s002() {
        let source = InputSource::File(PathBuf::from("/definitely/not/here.swe"));
        let err = solve_source(&source).unwrap_err();
        assert_eq!(err.code(), "S002");
        let detailed = err.display_detailed();
        assert!(detailed.contains("S002"));
        assert!(detailed.contains("here.swe"));
    }

    #[test]
    fn test_solve_is_deterministic() {
        let input = "2\nthe cat sat\nA B\nBt\nA:the,a,cat\nB:ca,sa,cat\n";
        let first = solve_text(input);
        let second = solve_text(input);
        assert_eq!(first, second);
    }
}
