use crate::errors::ParseError;
use crate::symbol_char::SymbolChar;
use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list0,
    sequence::separated_pair,
    IResult,
    Parser,
};

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// The separator between a symbol and its options
pub const SYMBOL_SEPARATOR: char = ':';
/// The separator between options
pub const OPTION_SEPARATOR: char = ',';

/// One parsed expansion line: `X:opt1,opt2,...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub symbol: char,
    /// Trimmed, non-empty options in input order
    pub options: Vec<String>,
}

// === Token parsers ===

fn symbol_field(input: &str) -> PResult<'_, &str> {
    take_till(|c: char| c == SYMBOL_SEPARATOR).parse(input)
}

fn option_field(input: &str) -> PResult<'_, &str> {
    take_till(|c: char| c == OPTION_SEPARATOR).parse(input)
}

fn expansion_line(input: &str) -> PResult<'_, (&str, Vec<&str>)> {
    all_consuming(separated_pair(
        symbol_field,
        char(SYMBOL_SEPARATOR),
        separated_list0(char(OPTION_SEPARATOR), option_field),
    ))
    .parse(input)
}

/// Parse a single expansion line.
///
/// Returns `Ok(None)` for lines that carry no declaration (blank, or with no
/// `':'`). Only the first `':'` separates the symbol; later ones belong to
/// the options. Empty options are dropped, so `X:` declares no candidates.
///
/// # Errors
/// - [`ParseError::InvalidSymbolName`] if the symbol is not one of `A`-`Z`.
/// - [`ParseError::MalformedExpansion`] if the line cannot be split.
pub fn parse_expansion(raw_line: &str) -> Result<Option<Expansion>, Box<ParseError>> {
    let line = raw_line.trim();
    if line.is_empty() || !line.contains(SYMBOL_SEPARATOR) {
        return Ok(None);
    }

    let malformed = || Box::new(ParseError::MalformedExpansion { line: line.to_string() });
    let (_, (symbol_raw, options_raw)) = expansion_line(line).map_err(|e| match e {
        // keep specific errors, replace bare nom kinds with the offending line
        nom::Err::Failure(pe) | nom::Err::Error(pe) if !matches!(*pe, ParseError::NomError(_)) => pe,
        _ => malformed(),
    })?;

    let symbol_str = symbol_raw.trim();
    let mut chars = symbol_str.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_symbol() => c,
        _ => {
            return Err(Box::new(ParseError::InvalidSymbolName { symbol: symbol_str.to_string() }));
        }
    };

    let options = options_raw
        .into_iter()
        .map(str::trim)
        .filter(|opt| !opt.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Some(Expansion { symbol, options }))
}
