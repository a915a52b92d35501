//! Text rendering of solver outcomes.

use crate::assignment::Solution;
use crate::solver::SolveOutcome;

/// Printed when there is no solution (or the input could not be used)
pub const INFEASIBLE_MARKER: &str = "NO";

/// Render an outcome as the text written to stdout.
#[must_use]
pub fn render(outcome: &SolveOutcome) -> String {
    match outcome {
        SolveOutcome::Solved(solution) => render_solution(solution),
        SolveOutcome::Infeasible(_) => render_infeasible(),
    }
}

/// `NO` followed by a newline
#[must_use]
pub fn render_infeasible() -> String {
    format!("{INFEASIBLE_MARKER}\n")
}

/// One `symbol:value` line per binding, in ascending symbol order.
/// An empty solution renders as the empty string.
#[must_use]
pub fn render_solution(solution: &Solution) -> String {
    solution.iter().map(|(symbol, value)| format!("{symbol}:{value}\n")).collect()
}
