//! Pattern substitution.
//!
//! Both functions walk the tokenized pattern exactly once, so bound text is
//! emitted verbatim and never looked at again for further symbols.

use crate::assignment::Assignment;
use crate::model::{Pattern, PatternPart};

/// Substitute every bound symbol in `pattern`. Unbound symbols are left in
/// place as their own reference character.
#[must_use]
pub fn expand(pattern: &Pattern, assignment: &Assignment) -> String {
    let mut out = String::with_capacity(pattern.raw.len());
    for part in pattern.parts() {
        match part {
            PatternPart::Lit(s) => out.push_str(s),
            PatternPart::Sym(c) => match assignment.get(*c) {
                Some(value) => out.push_str(value),
                None => out.push(*c),
            },
        }
    }
    out
}

/// A pattern expanded as far as the current assignment allows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialExpansion {
    /// Maximal runs of fully-expanded text between unbound symbol occurrences.
    /// Empty runs are not recorded.
    pub fragments: Vec<String>,
    /// Bytes contributed by literals and bound symbols
    pub fixed_len: usize,
    /// One entry per unbound symbol occurrence, in pattern order
    pub unbound: Vec<char>,
}

/// Expand `pattern` with `assignment`, splitting at unbound symbols.
#[must_use]
pub fn expand_partial(pattern: &Pattern, assignment: &Assignment) -> PartialExpansion {
    let mut expansion = PartialExpansion::default();
    let mut current = String::new();

    for part in pattern.parts() {
        let text: &str = match part {
            PatternPart::Lit(s) => s,
            PatternPart::Sym(c) => match assignment.get(*c) {
                Some(value) => value,
                None => {
                    if !current.is_empty() {
                        expansion.fragments.push(std::mem::take(&mut current));
                    }
                    expansion.unbound.push(*c);
                    continue;
                }
            },
        };
        expansion.fixed_len += text.len();
        current.push_str(text);
    }
    if !current.is_empty() {
        expansion.fragments.push(current);
    }

    expansion
}
