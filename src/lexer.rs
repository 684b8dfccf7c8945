//! lexer.rs
//!
//! This module provides a simple lexical analyzer (lexer) for calculator expressions.
//! It splits an input string into a sequence of `Lexeme`s, each representing a
//! continuous piece of text with its corresponding position in the original string.
//!
//! The lexer handles identifiers, numeric literals (decimal and scientific
//! notation) and single-character operators or punctuation. Display glyphs
//! for multiply, divide and minus (`×`, `÷`, `−`) are normalized to their
//! ASCII operator forms here, so later stages only ever see `*`, `/` and `-`.

use std::ops::Range;

/// Represents a single lexeme extracted from the input string.
///
/// A `Lexeme` stores a text slice and its span (start..end byte indices) within
/// the original input string. The text of a normalized glyph differs from the
/// input, but its span still points at the glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    text: String,
    span: Range<usize>,
}

impl Lexeme {
    /// Create a new `Lexeme`.
    ///
    /// # Argument
    ///
    /// * `text` - The slice of text corresponding to the lexeme.
    /// * `span` - The range of the lexeme in the original input string.
    pub fn new(text: &str, span: Range<usize>) -> Self {
        Self {
            text: text.to_string(),
            span,
        }
    }

    /// Returns the text of the lexeme.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the start index of the lexeme in the original input string.
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Returns the end index of the lexeme in the original input string.
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Returns the span index (start, end) of the lexeme in the original input string.
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }
}

impl std::fmt::Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{name} at {start}..{end}", name=self.text, start=self.span.start, end=self.span.end)
    }
}

/// Type alias for a collection of lexemes.
pub type Lexemes = Vec<Lexeme>;

type CharIter<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

/// Maps display-only glyphs to their canonical operator text.
fn normalize_glyph(ch: char) -> Option<&'static str> {
    match ch {
        '×' => Some("*"),
        '÷' => Some("/"),
        '−' => Some("-"),
        _ => None,
    }
}

/// Parses an identifier starting at `start_idx`.
///
/// An identifier is a sequence of alphanumeric characters or underscores.
///
/// # Returns
///
/// The ending index of the identifier.
fn parse_ident(start_idx: usize, first: char, chars: &mut CharIter) -> usize {
    let mut end = start_idx + first.len_utf8();
    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_alphanumeric() || ch == '_' {
            chars.next();
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }

    end
}

/// Parses a numeric literal starting at `start_idx`.
///
/// Supports integers, decimals and scientific notation. A sign is only
/// part of the literal when it directly follows the exponent marker, so
/// `1e5-3` is split into `1e5`, `-`, `3`.
///
/// # Returns
///
/// The ending index of the numeric literal.
fn parse_number(start_idx: usize, chars: &mut CharIter) -> usize {
    let mut end = start_idx + 1;
    let mut seen_e = false;
    let mut prev_is_e = false;

    while let Some(&(idx, ch)) = chars.peek() {
        let accept = match ch {
            d if d.is_ascii_digit() || d == '.' => true,
            'e' | 'E' if !seen_e => { seen_e = true; true },
            '+' | '-' => prev_is_e,
            _ => false,
        };
        if !accept {
            break;
        }

        prev_is_e = matches!(ch, 'e' | 'E');
        chars.next();
        end = idx + ch.len_utf8();
    }

    end
}

/// Splits the input string into a sequence of `Lexeme`s.
///
/// # Arguments
///
/// * `input` - The input string to lex.
///
/// # Returns
///
/// A vector of lexemes representing identifiers, numbers, and single-character tokens.
pub fn from(input: &str) -> Lexemes {
    let mut lexemes = Lexemes::default();
    let mut chars = input.char_indices().peekable();

    while let Some((start_idx, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        if let Some(text) = normalize_glyph(ch) {
            lexemes.push(Lexeme::new(text, start_idx..start_idx + ch.len_utf8()));
            continue;
        }

        let end_idx = match ch {
            '0'..='9' | '.' => parse_number(start_idx, &mut chars),
            c if c.is_alphabetic() || c == '_' => parse_ident(start_idx, c, &mut chars),
            _ => start_idx + ch.len_utf8(),
        };

        lexemes.push(Lexeme::new(&input[start_idx..end_idx], start_idx..end_idx));
    }

    lexemes
}
