// Character-set constants
pub(crate) const SYMBOL_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
#[cfg(test)]
pub(crate) const SYMBOL_RANGE: std::ops::RangeInclusive<char> = 'A'..='Z';

/// Number of distinct symbols a problem can use ('A'-'Z').
pub const NUM_SYMBOL_SLOTS: usize = SYMBOL_CHARS.len();

pub(crate) trait SymbolChar {
    fn is_symbol(&self) -> bool;
}

impl SymbolChar for char {
    fn is_symbol(&self) -> bool {
        self.is_ascii_uppercase()
    }
}

/// Convert a symbol character to its dense slot index
/// 'A' -> 0, 'B' -> 1, ..., 'Z' -> 25
///
/// # Panics
/// Panics if `c` is not in 'A'..='Z'. Symbols are validated when the model
/// is built, so anything else here is a programming error.
#[inline]
pub(crate) fn symbol_index(c: char) -> usize {
    match c {
        'A'..='Z' => (c as u8 - b'A') as usize,
        _ => panic!("Invalid symbol character: '{c}' (parser should have validated this)"),
    }
}

/// Inverse of [`symbol_index`].
#[inline]
pub(crate) fn symbol_at(i: usize) -> char {
    debug_assert!(i < NUM_SYMBOL_SLOTS, "slot index {i} out of range");
    SYMBOL_CHARS.as_bytes()[i] as char
}

/// Bit for `c` in a `u32` symbol set.
#[inline]
pub(crate) fn symbol_bit(c: char) -> u32 {
    1u32 << symbol_index(c)
}
