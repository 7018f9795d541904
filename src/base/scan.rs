//! Parsing of data from its presentation format.
//!
//! Zone files present record data as a sequence of tokens separated by
//! blanks. This module contains the [`Symbol`] type for the characters
//! within such a token together with the escape sequences they may
//! contain, the [`Token`] type produced by a lexer, and the [`Scanner`]
//! trait record data types use to consume tokens.
//!
//! The [`ScanError`] type describes everything that can go wrong while
//! scanning record data. It carries the position of the offending token so
//! that errors can be reported to whoever wrote the zone file.

use super::charstr::FromStrError;
use super::name::NameError;
use super::wire::ParseError;
use core::fmt;

//------------ Scanner -------------------------------------------------------

/// A source of tokens for a single entry of a zone file.
///
/// The scanner hands out tokens one by one. Once the entry is exhausted,
/// every further call returns a token of kind [`TokenKind::EndOfEntry`].
/// There is no way to put a token back.
pub trait Scanner {
    /// Returns the next token of the entry.
    fn next_token(&mut self) -> Token;
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

//------------ Token ---------------------------------------------------------

/// A token of an entry together with its position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    kind: TokenKind,
    line: usize,
    col: usize,
}

impl Token {
    /// Creates a new token of the given kind starting at a position.
    ///
    /// Lines and columns are counted from one.
    pub fn new(kind: TokenKind, line: usize, col: usize) -> Self {
        Token { kind, line, col }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns whether the token is a blank.
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Blank)
    }

    /// Returns whether the token ends the entry, either regularly or not.
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfEntry | TokenKind::Error(_))
    }

    /// Converts the token into a scan error of the given kind.
    pub fn error(&self, kind: ScanErrorKind) -> ScanError {
        ScanError::new(kind, self.line, self.col)
    }
}

//------------ TokenKind -----------------------------------------------------

/// The kinds of tokens a lexer produces.
///
/// Word and quoted tokens keep escape sequences verbatim. They are resolved
/// into symbols by the type that consumes the token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// One or more space or tab characters.
    Blank,

    /// A sequence of non-blank characters.
    Word(String),

    /// The content of a sequence enclosed in double quotes.
    Quoted(String),

    /// The end of the entry.
    EndOfEntry,

    /// The lexer encountered malformed input.
    Error(&'static str),
}

//------------ Symbol --------------------------------------------------------

/// The zone file representation of a single character.
///
/// This is either a regular character or an escape sequence. See the
/// variants for more details.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped Unicode character.
    Char(char),

    /// A character escaped via a preceding backslash.
    ///
    /// This escape sequence is only allowed for printable ASCII characters.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly three
    /// decimal digits with the value of the octets.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from a character source.
    ///
    /// Returns the next symbol in the source, `Ok(None)` if the source has
    /// been exhausted, or an error if there wasn’t a valid symbol.
    pub fn from_chars<C>(chars: C) -> Result<Option<Self>, SymbolCharsError>
    where
        C: IntoIterator<Item = char>,
    {
        use self::SymbolCharsError::*;

        let mut chars = chars.into_iter();
        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        if ch != '\\' {
            return Ok(Some(Symbol::Char(ch)));
        }
        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Err(ShortInput),
        };
        if let Some(digit) = ch.to_digit(10) {
            let mut res = digit;
            for _ in 0..2 {
                let digit = match chars.next() {
                    Some(ch) => ch.to_digit(10).ok_or(BadEscape)?,
                    None => return Err(ShortInput),
                };
                res = res * 10 + digit;
            }
            let res = u8::try_from(res).map_err(|_| BadEscape)?;
            return Ok(Some(Symbol::DecimalEscape(res)));
        }
        let ch = u8::try_from(ch).map_err(|_| BadEscape)?;
        if !(0x20..0x7F).contains(&ch) {
            Err(BadEscape)
        } else {
            Ok(Some(Symbol::SimpleEscape(ch)))
        }
    }

    /// Returns the symbol used to present an octet.
    ///
    /// Space, double quote, backslash, and semicolon get a simple escape,
    /// other printable ASCII is plain, everything else a decimal escape.
    #[must_use]
    pub fn from_octet(ch: u8) -> Self {
        if ch == b' ' || ch == b'"' || ch == b'\\' || ch == b';' {
            Symbol::SimpleEscape(ch)
        } else if !(0x20..0x7F).contains(&ch) {
            Symbol::DecimalEscape(ch)
        } else {
            Symbol::Char(ch as char)
        }
    }

    /// Returns the octet the symbol stands for.
    ///
    /// Plain characters must be printable ASCII, U+0020 to U+007E.
    pub fn into_octet(self) -> Result<u8, BadSymbol> {
        match self {
            Symbol::Char(ch) => {
                if ('\u{20}'..='\u{7E}').contains(&ch) {
                    Ok(ch as u8)
                } else {
                    Err(BadSymbol(self))
                }
            }
            Symbol::SimpleEscape(ch) | Symbol::DecimalEscape(ch) => Ok(ch),
        }
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ Symbols -------------------------------------------------------

/// An iterator over the symbols in a char sequence.
#[derive(Clone, Debug)]
pub struct Symbols<Chars> {
    /// The chars of the sequence.
    ///
    /// This is an option so we can fuse the iterator on error.
    chars: Option<Chars>,
}

impl<Chars> Symbols<Chars> {
    /// Creates a new symbols iterator atop a char iterator.
    pub fn new(chars: Chars) -> Self {
        Symbols { chars: Some(chars) }
    }
}

impl<Chars: Iterator<Item = char>> Iterator for Symbols<Chars> {
    type Item = Result<Symbol, SymbolCharsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chars = self.chars.as_mut()?;
        match Symbol::from_chars(chars) {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => {
                self.chars = None;
                None
            }
            Err(err) => {
                self.chars = None;
                Some(Err(err))
            }
        }
    }
}

//============ Error Types ===================================================

//------------ SymbolCharsError ----------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolCharsError {
    /// An illegal escape sequence was encountered.
    BadEscape,

    /// Unexpected end of input.
    ///
    /// This can only happen in a decimal escape sequence.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SymbolCharsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolCharsError::BadEscape => {
                f.write_str("illegal escape sequence")
            }
            SymbolCharsError::ShortInput => ParseError::ShortInput.fmt(f),
        }
    }
}

impl std::error::Error for SymbolCharsError {}

//------------ BadSymbol -----------------------------------------------------

/// A symbol with an unexpected value was encountered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadSymbol(pub Symbol);

//--- Display and Error

impl fmt::Display for BadSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unexpected symbol '{}'", self.0)
    }
}

impl std::error::Error for BadSymbol {}

//------------ ScanError -----------------------------------------------------

/// An error happened while scanning record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanError {
    kind: ScanErrorKind,
    line: usize,
    col: usize,
}

impl ScanError {
    /// Creates a new error of the given kind at a position.
    pub fn new(kind: ScanErrorKind, line: usize, col: usize) -> Self {
        ScanError { kind, line, col }
    }

    pub fn kind(&self) -> &ScanErrorKind {
        &self.kind
    }

    /// Returns the line of the token that caused the error.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the column of the token that caused the error.
    pub fn col(&self) -> usize {
        self.col
    }
}

//--- Display and Error

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.col)
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            ScanErrorKind::BadName(ref err) => Some(err),
            ScanErrorKind::BadCharStr(ref err) => Some(err),
            _ => None,
        }
    }
}

//------------ ScanErrorKind -------------------------------------------------

/// The reason scanning record data failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScanErrorKind {
    /// The entry contained no record data at all.
    NoRdata,

    /// The selector of a SELECT record was empty.
    EmptySelector,

    /// The entry ended before the base name of a SELECT record.
    MissingBase,

    /// The selector of a SELECT record wasn’t followed by a blank.
    MissingBlank,

    /// The entry ended where a domain name was expected.
    MissingName,

    /// A domain name was malformed.
    BadName(NameError),

    /// A character string was malformed.
    BadCharStr(FromStrError),

    /// A word didn’t name a record type.
    BadRtype(String),

    /// A token of the wrong kind was encountered.
    UnexpectedToken,

    /// The lexer failed to produce a token.
    Lexer(&'static str),
}

//--- Display

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ScanErrorKind::NoRdata => f.write_str("SELECT has no RDATA"),
            ScanErrorKind::EmptySelector => {
                f.write_str("empty SELECT selector")
            }
            ScanErrorKind::MissingBase => {
                f.write_str("missing SELECT base name")
            }
            ScanErrorKind::MissingBlank => {
                f.write_str("SELECT selector must be followed by a blank")
            }
            ScanErrorKind::MissingName => f.write_str("missing domain name"),
            ScanErrorKind::BadName(ref err) => {
                write!(f, "bad domain name: {}", err)
            }
            ScanErrorKind::BadCharStr(ref err) => {
                write!(f, "bad character string: {}", err)
            }
            ScanErrorKind::BadRtype(ref word) => {
                write!(f, "unknown record type '{}'", word)
            }
            ScanErrorKind::UnexpectedToken => f.write_str("unexpected token"),
            ScanErrorKind::Lexer(msg) => f.write_str(msg),
        }
    }
}

//============ Testing =======================================================
