//! Splitting zonefile text into tokens.
//!
//! The [`Lexer`] turns the text of a zonefile into the [`Token`]s consumed
//! by the scanning functions of the record data types. It knows about the
//! lexical rules of zonefiles:
//!
//! * Blanks separate tokens. A blank is only reported if another token
//!   follows it within the same entry.
//! * Tokens starting with a double quote end at the next double quote that
//!   isn’t escaped. Escape sequences are kept verbatim in both quoted and
//!   unquoted tokens.
//! * A semicolon starts a comment that runs to the end of the line.
//! * A line feed ends an entry unless it appears inside parentheses, in
//!   which case it counts as a blank.

use crate::base::scan::{Scanner, Token, TokenKind};

//------------ Lexer ---------------------------------------------------------

/// A lexer for zonefile text.
///
/// The lexer implements [`Scanner`]. Each call to
/// [`next_token`][Scanner::next_token] returns the next token of the
/// current entry. Once an entry ends, the following call continues with
/// the next one. At the end of the text the lexer keeps returning end of
/// entry tokens.
#[derive(Clone, Debug)]
pub struct Lexer {
    /// The characters of the text.
    buf: Vec<char>,

    /// The index of the next character to look at.
    start: usize,

    /// The current line number, starting at one.
    line_num: usize,

    /// The index of the first character of the current line.
    line_start: usize,

    /// The number of currently open parentheses.
    parens: usize,
}

impl Lexer {
    /// Creates a new lexer for the given text.
    pub fn new(text: &str) -> Self {
        Lexer {
            buf: text.chars().collect(),
            start: 0,
            line_num: 1,
            line_start: 0,
            parens: 0,
        }
    }

    /// Returns whether all text has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.start >= self.buf.len()
    }

    fn peek(&self) -> Option<char> {
        self.buf.get(self.start).copied()
    }

    fn col(&self, pos: usize) -> usize {
        pos - self.line_start + 1
    }

    fn token(&self, kind: TokenKind, pos: usize) -> Token {
        Token::new(kind, self.line_num, self.col(pos))
    }

    /// Advances past a line feed at the current position.
    fn line_feed(&mut self) {
        self.start += 1;
        self.line_num += 1;
        self.line_start = self.start;
    }

    /// Skips everything that separates tokens.
    ///
    /// Returns the line and column where skipping started and whether
    /// anything was skipped at all. Stops at a line feed that ends an entry,
    /// an unbalanced closing parenthesis, the end of the text, or the start
    /// of a token.
    fn skip_blanks(&mut self) -> (usize, usize, bool) {
        let line = self.line_num;
        let col = self.col(self.start);
        let mut has_space = false;
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => self.start += 1,
                '(' => {
                    self.parens += 1;
                    self.start += 1;
                }
                ')' if self.parens > 0 => {
                    self.parens -= 1;
                    self.start += 1;
                }
                ';' => {
                    while let Some(true) = self.peek().map(|ch| ch != '\n') {
                        self.start += 1;
                    }
                }
                '\n' if self.parens > 0 => self.line_feed(),
                _ => break,
            }
            has_space = true;
        }
        (line, col, has_space)
    }

    fn scan_word(&mut self) -> TokenKind {
        let mut res = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\n' | '(' | ')' | ';' | '"' => break,
                '\\' => {
                    res.push(ch);
                    self.start += 1;
                    if let Some(ch) = self.peek() {
                        res.push(ch);
                        if ch == '\n' {
                            self.line_feed();
                        } else {
                            self.start += 1;
                        }
                    }
                }
                _ => {
                    res.push(ch);
                    self.start += 1;
                }
            }
        }
        TokenKind::Word(res)
    }

    /// Scans a quoted token. The opening quote has been consumed.
    fn scan_quoted(&mut self) -> TokenKind {
        let mut res = String::new();
        loop {
            let ch = match self.peek() {
                Some(ch) => ch,
                None => return TokenKind::Error("unterminated quoted string"),
            };
            match ch {
                '"' => {
                    self.start += 1;
                    return TokenKind::Quoted(res);
                }
                '\\' => {
                    res.push(ch);
                    self.start += 1;
                    if let Some(ch) = self.peek() {
                        res.push(ch);
                        if ch == '\n' {
                            self.line_feed();
                        } else {
                            self.start += 1;
                        }
                    }
                }
                '\n' => {
                    res.push(ch);
                    self.line_feed();
                }
                _ => {
                    res.push(ch);
                    self.start += 1;
                }
            }
        }
    }
}

//--- Scanner

impl Scanner for Lexer {
    fn next_token(&mut self) -> Token {
        let (line, col, has_space) = self.skip_blanks();
        let pos = self.start;
        let ch = match self.peek() {
            Some(ch) => ch,
            None => {
                if self.parens > 0 {
                    self.parens = 0;
                    return self
                        .token(TokenKind::Error("unbalanced parens"), pos);
                }
                return self.token(TokenKind::EndOfEntry, pos);
            }
        };
        match ch {
            '\n' => {
                let res = self.token(TokenKind::EndOfEntry, pos);
                self.line_feed();
                res
            }
            ')' => {
                self.start += 1;
                self.token(TokenKind::Error("unbalanced parens"), pos)
            }
            _ if has_space => Token::new(TokenKind::Blank, line, col),
            '"' => {
                let (line, col) = (self.line_num, self.col(pos));
                self.start += 1;
                Token::new(self.scan_quoted(), line, col)
            }
            _ => {
                let (line, col) = (self.line_num, self.col(pos));
                Token::new(self.scan_word(), line, col)
            }
        }
    }
}

//============ Testing =======================================================
