use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::symbol_char::{symbol_at, symbol_bit, symbol_index, NUM_SYMBOL_SLOTS};

/// `Assignment` maps a symbol (char) to the candidate string it's bound to.
///
/// Uses `Rc<str>` for values so binding a candidate never copies the string.
/// Uses array-based storage instead of `HashMap` since symbols are limited to 'A'-'Z',
/// plus a `bound` bitset and a trail of bound symbols so [`Assignment::pop`]
/// can undo exactly the most recent [`Assignment::push`].
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Array storage: index 0-25 for 'A'-'Z'
    slots: [Option<Rc<str>>; NUM_SYMBOL_SLOTS],
    /// Bit `i` is set iff `slots[i]` is bound
    bound: u32,
    /// Symbols in the order they were bound
    trail: Vec<char>,
}

impl PartialEq for Assignment {
    // binding order is bookkeeping, not part of the mapping
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for Assignment {}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}→{v}")).collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl Assignment {
    /// Bind `symbol` to `value`.
    ///
    /// A symbol may be bound at most once at a time; rebinding without a
    /// `pop` is a solver bug.
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    pub fn push(&mut self, symbol: char, value: Rc<str>) {
        let i = symbol_index(symbol);
        debug_assert!(self.slots[i].is_none(), "symbol '{symbol}' is already bound");
        self.slots[i] = Some(value);
        self.bound |= symbol_bit(symbol);
        self.trail.push(symbol);
    }

    /// Unbind the most recently bound symbol, returning it with its value.
    pub fn pop(&mut self) -> Option<(char, Rc<str>)> {
        let symbol = self.trail.pop()?;
        self.bound &= !symbol_bit(symbol);
        let value = self.slots[symbol_index(symbol)].take()?;
        Some((symbol, value))
    }

    /// Retrieve the binding for a symbol
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&Rc<str>> {
        self.slots[symbol_index(symbol)].as_ref()
    }

    /// True iff `symbol` currently has a binding
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn is_bound(&self, symbol: char) -> bool {
        self.bound & symbol_bit(symbol) != 0
    }

    /// True iff every symbol in `mask` is bound
    #[must_use]
    pub(crate) fn contains_all(&self, mask: u32) -> bool {
        self.bound & mask == mask
    }

    /// True iff at least one symbol in `mask` is bound
    #[must_use]
    pub(crate) fn contains_any(&self, mask: u32) -> bool {
        self.bound & mask != 0
    }

    /// Number of bound symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Iterate over the bindings in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (char, &Rc<str>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, opt)| opt.as_ref().map(|val| (symbol_at(i), val)))
    }

    /// Freeze the current bindings into an immutable [`Solution`].
    #[must_use]
    pub fn freeze(&self) -> Solution {
        Solution {
            bindings: self.iter().map(|(c, v)| (c, v.to_string())).collect(),
        }
    }
}

/// A verified total assignment. Once produced it never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: BTreeMap<char, String>,
}

impl Solution {
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.bindings.get(&symbol).map(String::as_str)
    }

    /// Bindings in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.bindings.iter().map(|(&c, v)| (c, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Rebuild an [`Assignment`] holding the same bindings (e.g. to expand
    /// patterns with it).
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        let mut assignment = Assignment::default();
        for (c, v) in self.iter() {
            assignment.push(c, Rc::from(v));
        }
        assignment
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}
