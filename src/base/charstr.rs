//! Character strings.
//!
//! [RFC 1035] uses `<character-string>` for up to 255 octets of arbitrary
//! data. The SELECT selector is one. On the wire a length octet precedes
//! the data; [`CharStr`] holds the data without it.
//!
//! In presentation format, printable ASCII stands for itself. Any octet
//! can be written as a backslash and three decimal digits, and a backslash
//! before a printable character other than a digit escapes that character.
//! [`CharStr::from_chars`] and the `FromStr` impl read this form, `Display`
//! writes it.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::scan::{BadSymbol, Symbol, SymbolCharsError, Symbols};
use super::wire::{Compose, ParseError};
use bytes::Bytes;
use core::{fmt, hash, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ CharStr -------------------------------------------------------

/// The data of a character string.
///
/// Wraps a bytes value of at most 255 octets. Comparison and hashing
/// ignore ASCII case, following [RFC 1035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
#[derive(Clone, Default)]
pub struct CharStr(Bytes);

impl CharStr {
    /// Creates a new empty character string.
    #[must_use]
    pub fn empty() -> Self {
        CharStr(Bytes::new())
    }

    /// Creates a new character string from a bytes value.
    ///
    /// Returns succesfully if `bytes` can indeed be used as a
    /// character string, i.e., it is not longer than 255 bytes.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, CharStrError> {
        if bytes.len() > 255 {
            Err(CharStrError)
        } else {
            Ok(CharStr(bytes))
        }
    }

    /// Creates a new character string from a copy of an octets slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CharStrError> {
        Self::from_bytes(Bytes::copy_from_slice(slice))
    }

    /// Creates a character string from a sequence of presentation chars.
    ///
    /// The chars may contain escape sequences.
    pub fn from_chars(
        chars: impl Iterator<Item = char>,
    ) -> Result<Self, FromStrError> {
        let mut res = Vec::new();
        for symbol in Symbols::new(chars) {
            if res.len() == 255 {
                return Err(FromStrError::LongString);
            }
            res.push(symbol?.into_octet()?);
        }
        Ok(CharStr(res.into()))
    }

    /// Returns a reference to the underlying bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Converts the character string into its underlying bytes value.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns a reference to a slice of the character string’s data.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the content in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the character string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an object that displays the string in double quotes.
    pub fn display_quoted(&self) -> DisplayQuoted<'_> {
        DisplayQuoted(self)
    }
}

//--- Parse and Compose

impl CharStr {
    /// Parses a length-prefixed character string.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        let res = Bytes::copy_from_slice(parser.peek(len)?);
        parser.advance(len)?;
        Ok(CharStr(res))
    }

    /// Returns the length of the wire format including the length octet.
    pub fn compose_len(&self) -> u16 {
        // The content is at most 255 octets.
        self.0.len() as u16 + 1
    }

    /// Appends the wire format to a target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (self.0.len() as u8).compose(target)?;
        target.append_slice(self.0.as_ref())
    }
}

//--- AsRef

impl AsRef<[u8]> for CharStr {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- FromStr

impl str::FromStr for CharStr {
    type Err = FromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_chars(s.chars())
    }
}

//--- PartialEq and Eq

impl PartialEq for CharStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for CharStr {}

//--- Hash

impl hash::Hash for CharStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0
            .iter()
            .map(u8::to_ascii_lowercase)
            .for_each(|ch| ch.hash(state))
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.as_ref() {
            fmt::Display::fmt(&Symbol::from_octet(ch), f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CharStr")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for CharStr {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_newtype_struct(
                "CharStr",
                &format_args!("{}", self),
            )
        } else {
            serializer.serialize_newtype_struct("CharStr", &self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CharStr {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct InnerVisitor;

        impl<'de> serde::de::Visitor<'de> for InnerVisitor {
            type Value = CharStr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a character string")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(
                self,
                v: &[u8],
            ) -> Result<Self::Value, E> {
                CharStr::from_slice(v).map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> serde::de::Visitor<'de> for NewtypeVisitor {
            type Value = CharStr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a character string")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(InnerVisitor)
                } else {
                    deserializer.deserialize_bytes(InnerVisitor)
                }
            }
        }

        deserializer.deserialize_newtype_struct("CharStr", NewtypeVisitor)
    }
}

//------------ DisplayQuoted -------------------------------------------------

/// Helper struct for displaying a character string in double quotes.
#[derive(Clone, Copy, Debug)]
pub struct DisplayQuoted<'a>(&'a CharStr);

impl<'a> fmt::Display for DisplayQuoted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

//============ Error Types ===================================================

//------------ CharStrError --------------------------------------------------

/// A byte sequence does not represent a valid character string.
///
/// This can only mean that the sequence is longer than 255 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharStrError;

impl fmt::Display for CharStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long character string")
    }
}

impl std::error::Error for CharStrError {}

//------------ FromStrError --------------------------------------------------

/// An error happened when converting a Rust string to a DNS character string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// A character string has more than 255 octets.
    LongString,

    /// An escape sequence was malformed.
    SymbolChars(SymbolCharsError),

    /// An illegal character was encountered.
    ///
    /// Only printable ASCII characters are allowed.
    BadSymbol(BadSymbol),
}

//--- From

impl From<SymbolCharsError> for FromStrError {
    fn from(err: SymbolCharsError) -> FromStrError {
        FromStrError::SymbolChars(err)
    }
}

impl From<BadSymbol> for FromStrError {
    fn from(err: BadSymbol) -> FromStrError {
        FromStrError::BadSymbol(err)
    }
}

//--- Display and Error

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FromStrError::LongString => {
                f.write_str("character string with more than 255 octets")
            }
            FromStrError::SymbolChars(ref err) => err.fmt(f),
            FromStrError::BadSymbol(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;

    #[test]
    fn from_slice() {
        assert_eq!(
            CharStr::from_slice(b"01234").unwrap().as_slice(),
            b"01234"
        );
        assert_eq!(CharStr::from_slice(b"").unwrap().as_slice(), b"");
        assert!(CharStr::from_slice(&[0; 255]).is_ok());
        assert!(CharStr::from_slice(&[0; 256]).is_err());
    }

    #[test]
    fn from_str() {
        use core::str::FromStr;

        assert_eq!(CharStr::from_str("foo").unwrap().as_slice(), b"foo");
        assert_eq!(
            CharStr::from_str(r"f\oo\032\\").unwrap().as_slice(),
            b"foo \\"
        );
        assert_eq!(CharStr::from_str("").unwrap().as_slice(), b"");
        assert!(matches!(
            CharStr::from_str(r"\2"),
            Err(FromStrError::SymbolChars(_))
        ));
        assert!(matches!(
            CharStr::from_str("ö"),
            Err(FromStrError::BadSymbol(_))
        ));
        assert!(CharStr::from_str(&"a".repeat(255)).is_ok());
        assert_eq!(
            CharStr::from_str(&"a".repeat(256)),
            Err(FromStrError::LongString)
        );
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(
            CharStr::from_slice(b"ExAmPlE").unwrap(),
            CharStr::from_slice(b"example").unwrap()
        );
        assert_ne!(
            CharStr::from_slice(b"example").unwrap(),
            CharStr::from_slice(b"examples").unwrap()
        );
    }

    #[test]
    fn compose_parse() {
        let charstr = CharStr::from_slice(b"example").unwrap();
        let mut buf = Vec::new();
        infallible(charstr.compose(&mut buf));
        assert_eq!(buf, b"\x07example");
        assert_eq!(usize::from(charstr.compose_len()), buf.len());

        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(CharStr::parse(&mut parser).unwrap(), charstr);
        assert_eq!(parser.remaining(), 0);

        let mut parser = Parser::from_ref(&b"\x07exam"[..]);
        assert_eq!(CharStr::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn display() {
        let charstr = CharStr::from_slice(b"a b\"c\\d;\x01\xff").unwrap();
        assert_eq!(charstr.to_string(), r#"a\ b\"c\\d\;\001\255"#);
        assert_eq!(
            charstr.display_quoted().to_string(),
            r#""a\ b\"c\\d\;\001\255""#
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(
            &CharStr::from_slice(b"fo\x12 bar").unwrap().compact(),
            &[
                Token::NewtypeStruct { name: "CharStr" },
                Token::Bytes(b"fo\x12 bar"),
            ],
        );

        assert_tokens(
            &CharStr::from_slice(b"fo\x12 bar").unwrap().readable(),
            &[
                Token::NewtypeStruct { name: "CharStr" },
                Token::Str("fo\\018\\ bar"),
            ],
        );
    }
}
