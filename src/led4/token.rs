//! Splitting text into display cells.
//!
//! A decimal point shares a cell with the character before it, so `"1.5"` is two cells, not
//! three. [`Tokens`] does the split; [`scroll_frame`] decides which cells are visible while a
//! sentence scrolls past.

use core::str::Chars;

use crate::Result;
use crate::constants::CELL_COUNT;
use crate::error::Error::MalformedToken;

/// One display cell: a character, optionally with its decimal point lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Token {
    pub ch: char,
    pub decimal: bool,
}

impl Token {
    /// An unlit cell.
    pub const BLANK: Self = Self::new(' ');

    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self { ch, decimal: false }
    }

    #[must_use]
    pub const fn with_decimal(ch: char) -> Self {
        Self { ch, decimal: true }
    }

    /// Parses a single cell: one character, or one character followed by `'.'`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedToken`] for anything else, including the empty string and a lone `"."`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(ch), None, None) if ch != '.' => Ok(Self::new(ch)),
            (Some(ch), Some('.'), None) if ch != '.' => Ok(Self::with_decimal(ch)),
            _ => Err(MalformedToken),
        }
    }
}

impl From<char> for Token {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}

/// Iterator over the cells of a string, left to right.
///
/// A `'.'` right after another character fuses with it. A `'.'` with nothing to fuse with
/// (leading, or a second dot in a row) comes out as a bare `'.'` token, which has no glyph, so
/// rendering it fails instead of giving the decimal point a digit of its own.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: core::iter::Peekable<Chars<'a>>,
}

impl<'a> Tokens<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let ch = self.chars.next()?;
        if ch == '.' {
            // Nothing to fuse with; `Leds::glyph` rejects it.
            return Some(Token::new('.'));
        }
        if self.chars.next_if_eq(&'.').is_some() {
            Some(Token::with_decimal(ch))
        } else {
            Some(Token::new(ch))
        }
    }
}

/// The cells shown during scroll frame `frame`, indexed by digit position (0 = rightmost).
///
/// Position `i` shows token `frame - i` when that token exists, so each token enters on the
/// right and moves one position left per frame.
#[must_use]
pub fn scroll_frame(text: &str, frame: usize) -> [Token; CELL_COUNT] {
    let mut cells = [Token::BLANK; CELL_COUNT];
    for (position, cell) in cells.iter_mut().enumerate() {
        if let Some(token) = frame
            .checked_sub(position)
            .and_then(|index| Tokens::new(text).nth(index))
        {
            *cell = token;
        }
    }
    cells
}
