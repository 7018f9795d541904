//! Reading of zonefile text.
//!
//! Record data types scan their data from a sequence of tokens provided
//! through the [`Scanner`][crate::base::scan::Scanner] trait. The
//! [`lexer`] module provides a scanner that produces these tokens from
//! zonefile text.

pub mod lexer;

pub use self::lexer::Lexer;
