//! The read-only problem description: target text, patterns and the
//! candidate replacements for each symbol.
//!
//! A [`Model`] is built once (usually by [`crate::parser`]) and never mutated
//! afterwards; the search only ever changes an [`crate::assignment::Assignment`].

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::symbol_char::{symbol_at, symbol_bit, symbol_index, SymbolChar, NUM_SYMBOL_SLOTS};

/// A single token of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPart {
    Lit(String), // maximal run of literal characters
    Sym(char),   // 'A': one symbol reference
}

/// A pattern, tokenized once into literal runs and symbol references.
///
/// Lengths are byte lengths, matching the byte-exact substring test used
/// everywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The pattern exactly as it appeared in the input (trimmed)
    pub raw: String,
    pub(crate) parts: Vec<PatternPart>,
    /// Total bytes of literal text
    pub(crate) literal_len: usize,
    /// Distinct symbols with their number of occurrences, sorted by symbol
    pub(crate) occurrences: Vec<(char, usize)>,
    /// Bitset of the referenced symbols
    pub(crate) symbol_mask: u32,
}

impl Pattern {
    /// Tokenize a raw pattern. Uppercase ASCII letters are symbol
    /// references; every other character is a literal.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut counts = [0usize; NUM_SYMBOL_SLOTS];

        for c in raw.chars() {
            if c.is_symbol() {
                if !literal.is_empty() {
                    parts.push(PatternPart::Lit(std::mem::take(&mut literal)));
                }
                counts[symbol_index(c)] += 1;
                parts.push(PatternPart::Sym(c));
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            parts.push(PatternPart::Lit(literal));
        }

        let literal_len = parts
            .iter()
            .map(|part| match part {
                PatternPart::Lit(s) => s.len(),
                PatternPart::Sym(_) => 0,
            })
            .sum();

        let occurrences: Vec<(char, usize)> = counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(i, &n)| (symbol_at(i), n))
            .collect();
        let symbol_mask = occurrences.iter().fold(0, |mask, &(c, _)| mask | symbol_bit(c));

        Self { raw: raw.to_string(), parts, literal_len, occurrences, symbol_mask }
    }

    /// Iterate over the pattern's tokens
    pub fn parts(&self) -> std::slice::Iter<'_, PatternPart> {
        self.parts.iter()
    }

    /// Bytes of literal text in the pattern
    #[must_use]
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }

    /// Distinct referenced symbols, in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.occurrences.iter().map(|&(c, _)| c)
    }

    /// Distinct referenced symbols with their occurrence counts
    pub fn occurrences(&self) -> &[(char, usize)] {
        &self.occurrences
    }

    /// How many times `symbol` appears in the pattern
    #[must_use]
    pub fn occurrences_of(&self, symbol: char) -> usize {
        self.occurrences
            .iter()
            .find(|&&(c, _)| c == symbol)
            .map_or(0, |&(_, n)| n)
    }

    /// True iff the pattern mentions `symbol`
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn references(&self, symbol: char) -> bool {
        self.symbol_mask & symbol_bit(symbol) != 0
    }

    /// True iff the pattern references no symbol at all
    #[must_use]
    pub fn is_literal_only(&self) -> bool {
        self.symbol_mask == 0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Candidate replacement lists, one slot per symbol 'A'-'Z'.
///
/// An undeclared symbol has no slot value; [`SymbolTable::candidates`]
/// reports it as an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    slots: [Option<Vec<Rc<str>>>; NUM_SYMBOL_SLOTS],
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self { slots: [const { None }; NUM_SYMBOL_SLOTS] }
    }
}

impl SymbolTable {
    /// Declare `symbol` with the given candidates, returning the previous
    /// declaration if there was one.
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    pub fn declare<I, S>(&mut self, symbol: char, candidates: I) -> Option<Vec<Rc<str>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = candidates.into_iter().map(|s| Rc::from(s.as_ref())).collect();
        self.slots[symbol_index(symbol)].replace(list)
    }

    /// True iff `symbol` has a declaration (possibly empty)
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn is_declared(&self, symbol: char) -> bool {
        self.slots[symbol_index(symbol)].is_some()
    }

    /// Candidates of `symbol` in declaration order (empty if undeclared)
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn candidates(&self, symbol: char) -> &[Rc<str>] {
        self.slots[symbol_index(symbol)].as_deref().unwrap_or(&[])
    }

    /// Length of the shortest candidate, or `None` if there are none
    ///
    /// # Panics
    /// Panics if `symbol` is not in 'A'..='Z'.
    #[must_use]
    pub fn shortest_len(&self, symbol: char) -> Option<usize> {
        self.candidates(symbol).iter().map(|s| s.len()).min()
    }

    /// Declared symbols in ascending order with their candidates
    pub fn iter(&self) -> impl Iterator<Item = (char, &[Rc<str>])> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_deref().map(|list| (symbol_at(i), list)))
    }

    /// Number of declared symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The parsed problem: target text, patterns, and candidate lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    target: String,
    patterns: Vec<Pattern>,
    symbols: SymbolTable,
}

impl Model {
    #[must_use]
    pub fn new(target: impl Into<String>, patterns: Vec<Pattern>, symbols: SymbolTable) -> Self {
        Self { target: target.into(), patterns, symbols }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Number of patterns referencing `symbol`
    #[must_use]
    pub fn occurrence_count(&self, symbol: char) -> usize {
        self.patterns.iter().filter(|p| p.references(symbol)).count()
    }

    /// Bitset of every symbol referenced by some pattern
    #[must_use]
    pub(crate) fn referenced_mask(&self) -> u32 {
        self.patterns.iter().fold(0, |mask, p| mask | p.symbol_mask)
    }

    /// Symbols referenced by patterns, in ascending order
    pub fn referenced_symbols(&self) -> impl Iterator<Item = char> {
        let mask = self.referenced_mask();
        (0..NUM_SYMBOL_SLOTS)
            .filter(move |&i| mask & (1 << i) != 0)
            .map(symbol_at)
    }
}

impl FromStr for Model {
    type Err = Box<ParseError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_model(s)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "target ({} bytes): {}", self.target.len(), self.target)?;
        for (i, p) in self.patterns.iter().enumerate() {
            writeln!(f, "pattern {i}: {p}")?;
        }
        for (symbol, candidates) in self.symbols.iter() {
            let list: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();
            writeln!(f, "symbol {symbol}: [{}]", list.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_tokenizes_literals_and_symbols() {
        let p = Pattern::new("abXcdX Y");
        assert_eq!(
            p.parts().cloned().collect::<Vec<_>>(),
            vec![
                PatternPart::Lit("ab".to_string()),
                PatternPart::Sym('X'),
                PatternPart::Lit("cd".to_string()),
                PatternPart::Sym('X'),
                PatternPart::Lit(" ".to_string()),
                PatternPart::Sym('Y'),
            ]
        );
        assert_eq!(p.literal_len(), 5);
        assert_eq!(p.occurrences(), &[('X', 2), ('Y', 1)]);
        assert_eq!(p.occurrences_of('X'), 2);
        assert_eq!(p.occurrences_of('Z'), 0);
        assert!(p.references('Y'));
        assert!(!p.references('A'));
    }

    #[test]
    fn test_pattern_literal_only() {
        let p = Pattern::new("hello, world");
        assert!(p.is_literal_only());
        assert_eq!(p.literal_len(), 12);
        assert_eq!(p.symbols().count(), 0);
    }

    #[test]
    fn test_empty_pattern() {
        let p = Pattern::new("");
        assert!(p.is_literal_only());
        assert_eq!(p.parts().count(), 0);
        assert_eq!(p.literal_len(), 0);
    }

    #[test]
    fn test_pattern_literal_len_counts_bytes() {
        let p = Pattern::new("éX");
        assert_eq!(p.literal_len(), 'é'.len_utf8());
    }

    #[test]
    fn test_symbol_table_declare_and_lookup() {
        let mut table = SymbolTable::default();
        assert!(table.is_empty());
        assert!(table.declare('X', ["abc", "ab"]).is_none());

        assert!(table.is_declared('X'));
        assert!(!table.is_declared('Y'));
        assert_eq!(table.candidates('X').len(), 2);
        assert!(table.candidates('Y').is_empty());
        assert_eq!(table.shortest_len('X'), Some(2));
        assert_eq!(table.shortest_len('Y'), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_symbol_table_redeclare_replaces() {
        let mut table = SymbolTable::default();
        table.declare('X', ["a"]);
        let old = table.declare('X', ["bb", "cc"]);
        assert_eq!(old.map(|v| v.len()), Some(1));
        assert_eq!(table.shortest_len('X'), Some(2));
    }

    #[test]
    fn test_symbol_table_iter_is_sorted() {
        let mut table = SymbolTable::default();
        table.declare('Q', ["q"]);
        table.declare('B', ["b"]);
        table.declare('Z', Vec::<&str>::new());
        let symbols: Vec<char> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(symbols, vec!['B', 'Q', 'Z']);
    }

    #[test]
    fn test_model_occurrence_counts() {
        let model = Model::new(
            "target",
            vec![Pattern::new("AB"), Pattern::new("AA"), Pattern::new("c")],
            SymbolTable::default(),
        );
        assert_eq!(model.occurrence_count('A'), 2);
        assert_eq!(model.occurrence_count('B'), 1);
        assert_eq!(model.occurrence_count('C'), 0);
        assert_eq!(model.referenced_symbols().collect::<Vec<_>>(), vec!['A', 'B']);
    }

    #[test]
    fn test_model_display_lists_everything() {
        let mut symbols = SymbolTable::default();
        symbols.declare('X', ["ab", "abc"]);
        let model = Model::new("abcdef", vec![Pattern::new("Xc")], symbols);
        let shown = model.to_string();
        assert!(shown.contains("abcdef"));
        assert!(shown.contains("pattern 0: Xc"));
        assert!(shown.contains("symbol X: [ab, abc]"));
    }
}
