//! `input` — reads the line-oriented problem format into a [`Model`].
//!
//! Layout:
//! - line 1: the number of patterns `k`
//! - line 2: the target text
//! - the next `k` lines: one pattern each
//! - any remaining lines: expansion declarations (`X:opt1,opt2,...`)
//!
//! Every line is trimmed. Blank lines, lines without `':'` and lines
//! naming an invalid symbol in the declaration section are skipped.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::ParseError;
use crate::model::{Model, Pattern, SymbolTable};
use crate::parser::expansion::parse_expansion;

/// Where problem text is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Pick a file when a path is given, standard input otherwise.
    #[must_use]
    pub fn from_path(path: Option<&Path>) -> Self {
        path.map_or(InputSource::Stdin, |p| InputSource::File(p.to_path_buf()))
    }

    /// A readable name for diagnostics
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole source into a string.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the source cannot be read or is not UTF-8.
    pub fn read_to_string(&self) -> io::Result<String> {
        match self {
            InputSource::Stdin => {
                let mut data = String::new();
                io::stdin().lock().read_to_string(&mut data)?;
                Ok(data)
            }
            InputSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("failed to read problem from '{}': {}", path.display(), e),
                )
            }),
        }
    }
}

/// Parse problem text into a [`Model`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the count line is missing or not a
/// non-negative integer, or when the target or any announced pattern line
/// is missing. Declaration lines naming anything but a single `A`-`Z` symbol
/// are skipped with a warning.
pub fn parse_model(contents: &str) -> Result<Model, Box<ParseError>> {
    let mut lines = contents.lines().map(str::trim);

    let count_line = lines.next().ok_or_else(|| Box::new(ParseError::EmptyInput))?;
    let k = count_line.parse::<usize>().map_err(|source| {
        Box::new(ParseError::InvalidPatternCount { line: count_line.to_string(), source })
    })?;

    let target = lines.next().ok_or_else(|| Box::new(ParseError::MissingTarget))?;

    let mut patterns = Vec::with_capacity(k.min(1024));
    for found in 0..k {
        let raw = lines
            .next()
            .ok_or_else(|| Box::new(ParseError::MissingPattern { expected: k, found }))?;
        patterns.push(Pattern::new(raw));
    }

    let mut symbols = SymbolTable::default();
    for line in lines {
        let expansion = match parse_expansion(line) {
            Ok(Some(expansion)) => expansion,
            Ok(None) => continue,
            Err(e) if matches!(*e, ParseError::InvalidSymbolName { .. }) => {
                warn!("skipping declaration line \"{line}\": {e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        if symbols.declare(expansion.symbol, &expansion.options).is_some() {
            warn!(
                "symbol {} declared more than once; keeping the last declaration",
                expansion.symbol
            );
        }
    }

    debug!(
        "parsed {} pattern(s) and {} symbol declaration(s)",
        patterns.len(),
        symbols.len()
    );

    Ok(Model::new(target, patterns, symbols))
}
