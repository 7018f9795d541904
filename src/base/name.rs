//! Domain names.
//!
//! This module provides [`Name`], an owned, absolute domain name kept in
//! uncompressed wire format. It is the only kind of name record data in
//! this crate deals with. Relative names only appear in presentation format
//! and are made absolute against an origin while scanning via
//! [`Name::from_symbols`].
//!
//! Names compare and hash ignoring ASCII case. Their presentation keeps the
//! case they were created with.

use super::scan::{BadSymbol, Symbol, SymbolCharsError, Symbols};
use super::wire::{FormError, ParseError};
use bytes::Bytes;
use core::{fmt, hash, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name is stored as a sequence of labels in wire format, each label
/// being preceded by its length octet. The last label is always the empty
/// root label. A name has at most 255 octets and each label at most 63.
#[derive(Clone)]
pub struct Name(Bytes);

impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(Bytes::from_static(b"\0"))
    }

    /// Creates a name from a bytes value in uncompressed wire format.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, NameError> {
        Self::check_slice(bytes.as_ref())?;
        Ok(Name(bytes))
    }

    /// Creates a name from a copy of a slice in uncompressed wire format.
    pub fn from_slice(slice: &[u8]) -> Result<Self, NameError> {
        Self::check_slice(slice)?;
        Ok(Name(Bytes::copy_from_slice(slice)))
    }

    /// Creates a name from presentation format relative to an origin.
    ///
    /// If `text` ends in an unescaped dot, it is taken as an absolute name.
    /// Otherwise `origin` is appended to it. The single character `@`
    /// stands for the origin itself.
    pub fn from_symbols(text: &str, origin: &Name) -> Result<Self, NameError> {
        if text == "@" {
            return Ok(origin.clone());
        }
        let mut res = Vec::new();
        if text != "." && !labels_from_chars(text.chars(), &mut res)? {
            res.extend_from_slice(origin.as_slice());
        } else {
            res.push(0);
        }
        Self::from_vec(res)
    }

    /// Creates a name from presentation format characters.
    ///
    /// The name is always taken to be absolute. A trailing dot is allowed
    /// but not required.
    pub fn from_chars(
        chars: impl Iterator<Item = char>,
    ) -> Result<Self, NameError> {
        let mut chars = chars.peekable();
        let mut res = Vec::new();
        if chars.peek() == Some(&'.') {
            chars.next();
            if chars.peek().is_some() {
                return Err(NameError::EmptyLabel);
            }
        } else {
            labels_from_chars(chars, &mut res)?;
        }
        res.push(0);
        Self::from_vec(res)
    }

    fn from_vec(vec: Vec<u8>) -> Result<Self, NameError> {
        if vec.len() > 255 {
            Err(NameError::LongName)
        } else {
            Ok(Name(vec.into()))
        }
    }

    fn check_slice(mut slice: &[u8]) -> Result<(), NameError> {
        if slice.len() > 255 {
            return Err(NameError::LongName);
        }
        loop {
            let (&len, tail) = match slice.split_first() {
                Some(some) => some,
                None => return Err(NameError::RelativeName),
            };
            if len == 0 {
                if tail.is_empty() {
                    return Ok(());
                }
                return Err(NameError::TrailingData);
            }
            if len > 63 {
                return Err(NameError::BadLabel);
            }
            let len = usize::from(len);
            if tail.len() < len {
                return Err(NameError::RelativeName);
            }
            slice = &tail[len..];
        }
    }

    /// Returns a reference to the underlying bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Returns the name’s wire format as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The last label returned is the empty root label.
    pub fn iter_labels(&self) -> Labels<'_> {
        Labels {
            slice: self.as_slice(),
        }
    }

    /// Returns the number of labels including the root label.
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns an iterator over the suffixes of the name.
    ///
    /// Each suffix is returned as its wire format. The first suffix is the
    /// name itself, the root name is not included.
    pub fn iter_suffixes(&self) -> Suffixes<'_> {
        Suffixes {
            slice: self.as_slice(),
        }
    }

    /// Returns whether two names are equal ignoring ASCII case.
    ///
    /// Since length octets are never ASCII letters, comparing the wire
    /// format ignoring case compares the labels.
    pub fn name_eq(&self, other: &Name) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }

    /// Returns an object that displays the name with a final dot.
    pub fn fmt_with_dot(&self) -> DisplayWithDot<'_> {
        DisplayWithDot(self)
    }
}

//--- Parse and Compose

impl Name {
    /// Parses a name from wire format.
    ///
    /// Compression pointers are followed. They must point to an earlier
    /// position in the underlying octets than the pointer itself.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Self, ParseError> {
        let mut res = Vec::new();
        let mut jumped: Option<Parser<'a, Octs>> = None;
        loop {
            let cur = match jumped.as_mut() {
                Some(jumped) => jumped,
                None => &mut *parser,
            };
            let ltype = cur.parse_u8()?;
            match ltype {
                0 => {
                    res.push(0);
                    return Ok(Name(res.into()));
                }
                1..=0x3F => {
                    let len = usize::from(ltype);
                    // Leave room for the root label.
                    if res.len() + len + 2 > 255 {
                        return Err(NameError::LongName.into());
                    }
                    res.push(ltype);
                    res.extend_from_slice(cur.peek(len)?);
                    cur.advance(len)?;
                }
                0xC0..=0xFF => {
                    let ptr = usize::from(ltype & 0x3F) << 8
                        | usize::from(cur.parse_u8()?);
                    if ptr >= cur.pos() - 2 {
                        return Err(NameError::ExcessiveCompression.into());
                    }
                    let mut next = *cur;
                    next.seek(ptr)?;
                    jumped = Some(next);
                }
                _ => return Err(NameError::BadLabel.into()),
            }
        }
    }

    /// Returns the length of the uncompressed wire format.
    pub fn compose_len(&self) -> u16 {
        // Names are at most 255 octets.
        self.0.len() as u16
    }

    /// Appends the uncompressed wire format to a target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.as_slice())
    }
}

//--- Default

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

//--- AsRef

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_chars(s.chars())
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.name_eq(other)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0
            .iter()
            .map(u8::to_ascii_lowercase)
            .for_each(|ch| ch.hash(state))
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    /// Formats the name without a final dot.
    ///
    /// The root name is formatted as a single dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        let mut first = true;
        for label in self.iter_labels() {
            if label.is_empty() {
                break;
            }
            if !first {
                f.write_str(".")?;
            }
            first = false;
            for &ch in label {
                if ch == b'.' {
                    f.write_str("\\.")?;
                } else {
                    fmt::Display::fmt(&Symbol::from_octet(ch), f)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self.fmt_with_dot())
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_newtype_struct(
                "Name",
                &format_args!("{}", self.fmt_with_dot()),
            )
        } else {
            serializer.serialize_newtype_struct("Name", &self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct InnerVisitor;

        impl<'de> serde::de::Visitor<'de> for InnerVisitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an absolute domain name")
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
                Name::from_slice(v).map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> serde::de::Visitor<'de> for NewtypeVisitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an absolute domain name")
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

        deserializer.deserialize_newtype_struct("Name", NewtypeVisitor)
    }
}

//------------ labels_from_chars ---------------------------------------------

/// Appends the labels of a presentation format name to `target`.
///
/// Returns whether the name ended in an unescaped dot and is therefore
/// absolute. The root label is never appended.
fn labels_from_chars(
    chars: impl Iterator<Item = char>,
    target: &mut Vec<u8>,
) -> Result<bool, NameError> {
    let mut label_start = target.len();
    let mut label_len = 0u8;
    let mut absolute = false;
    target.push(0);
    for symbol in Symbols::new(chars) {
        match symbol? {
            Symbol::Char('.') => {
                if label_len == 0 {
                    return Err(NameError::EmptyLabel);
                }
                target[label_start] = label_len;
                label_start = target.len();
                label_len = 0;
                absolute = true;
                target.push(0);
            }
            symbol => {
                if label_len == 63 {
                    return Err(NameError::LongLabel);
                }
                if target.len() >= 255 {
                    return Err(NameError::LongName);
                }
                target.push(symbol.into_octet()?);
                label_len += 1;
                absolute = false;
            }
        }
    }
    if label_len == 0 {
        // Drop the length octet of the label that never started.
        target.pop();
        if absolute {
            Ok(true)
        } else {
            Err(NameError::EmptyName)
        }
    } else {
        target[label_start] = label_len;
        Ok(false)
    }
}

//------------ Labels --------------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.slice.split_first()?;
        let len = usize::from(len);
        let label = tail.get(..len)?;
        self.slice = &tail[len..];
        Some(label)
    }
}

//------------ Suffixes ------------------------------------------------------

/// An iterator over the non-root suffixes of a name.
#[derive(Clone, Debug)]
pub struct Suffixes<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for Suffixes<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = usize::from(*self.slice.first()?);
        if len == 0 {
            return None;
        }
        let res = self.slice;
        self.slice = self.slice.get(len + 1..)?;
        Some(res)
    }
}

//------------ DisplayWithDot ------------------------------------------------

/// Helper struct for displaying a name with a final dot.
#[derive(Clone, Copy, Debug)]
pub struct DisplayWithDot<'a>(&'a Name);

impl<'a> fmt::Display for DisplayWithDot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_root() {
            f.write_str(".")
        } else {
            write!(f, "{}.", self.0)
        }
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label type other than a normal label or a pointer was found.
    BadLabel,

    /// A compression pointer didn’t point backwards.
    ExcessiveCompression,

    /// The name ended without a root label.
    RelativeName,

    /// There was data after the root label.
    TrailingData,

    /// The name had no labels at all.
    EmptyName,

    /// A label other than the root label was empty.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// An escape sequence was malformed.
    SymbolChars(SymbolCharsError),

    /// A character that can’t be part of a name was encountered.
    BadSymbol(BadSymbol),
}

//--- From

impl From<SymbolCharsError> for NameError {
    fn from(err: SymbolCharsError) -> Self {
        NameError::SymbolChars(err)
    }
}

impl From<BadSymbol> for NameError {
    fn from(err: BadSymbol) -> Self {
        NameError::BadSymbol(err)
    }
}

impl From<NameError> for FormError {
    fn from(err: NameError) -> FormError {
        FormError::new(match err {
            NameError::BadLabel => "invalid label type",
            NameError::ExcessiveCompression => "excessive compression",
            NameError::LongName => "long domain name",
            _ => "invalid domain name",
        })
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> ParseError {
        ParseError::Form(err.into())
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::BadLabel => f.write_str("invalid label type"),
            NameError::ExcessiveCompression => {
                f.write_str("excessive compression")
            }
            NameError::RelativeName => f.write_str("missing root label"),
            NameError::TrailingData => {
                f.write_str("trailing data after root label")
            }
            NameError::EmptyName => f.write_str("empty domain name"),
            NameError::EmptyLabel => f.write_str("empty label"),
            NameError::LongLabel => f.write_str("long label"),
            NameError::LongName => f.write_str("long domain name"),
            NameError::SymbolChars(ref err) => err.fmt(f),
            NameError::BadSymbol(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use octseq::builder::infallible;
    use std::collections::HashSet;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name("example.com").as_slice(), b"\x07example\x03com\0");
        assert_eq!(name("example.com.").as_slice(), b"\x07example\x03com\0");
        assert_eq!(name(".").as_slice(), b"\0");
        assert_eq!(name(r"a\.b.c").as_slice(), b"\x03a.b\x01c\0");
        assert_eq!(name(r"a\032b").as_slice(), b"\x03a b\0");
        assert_eq!(Name::from_str(""), Err(NameError::EmptyName));
        assert_eq!(Name::from_str("a..b"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str(".a"), Err(NameError::EmptyLabel));
        assert!(Name::from_str(&"a".repeat(63)).is_ok());
        assert_eq!(
            Name::from_str(&"a".repeat(64)),
            Err(NameError::LongLabel)
        );
        let long = ["a".repeat(63).as_str(); 4].join(".");
        assert_eq!(Name::from_str(&long), Err(NameError::LongName));
        let max = format!("{}.{}", ["a".repeat(63).as_str(); 3].join("."),
                          "a".repeat(61));
        assert_eq!(Name::from_str(&max).unwrap().as_slice().len(), 255);
    }

    #[test]
    fn from_symbols() {
        let origin = name("example.com");
        assert_eq!(Name::from_symbols("foo", &origin).unwrap(),
                   name("foo.example.com"));
        assert_eq!(Name::from_symbols("foo.", &origin).unwrap(), name("foo"));
        assert_eq!(Name::from_symbols("@", &origin).unwrap(), origin);
        assert_eq!(Name::from_symbols(".", &origin).unwrap(), Name::root());
        assert_eq!(
            Name::from_symbols("foo..", &origin),
            Err(NameError::EmptyLabel)
        );
    }

    #[test]
    fn from_slice() {
        assert!(Name::from_slice(b"\x03foo\0").is_ok());
        assert_eq!(Name::from_slice(b"\x03foo"),
                   Err(NameError::RelativeName));
        assert_eq!(Name::from_slice(b"\x03fo"), Err(NameError::RelativeName));
        assert_eq!(Name::from_slice(b"\x03foo\0\0"),
                   Err(NameError::TrailingData));
        assert_eq!(Name::from_slice(b"\x40foo\0"), Err(NameError::BadLabel));
    }

    #[test]
    fn display() {
        assert_eq!(name("foo.Example.com").to_string(), "foo.Example.com");
        assert_eq!(
            name("foo.example.com").fmt_with_dot().to_string(),
            "foo.example.com."
        );
        assert_eq!(Name::root().to_string(), ".");
        assert_eq!(Name::root().fmt_with_dot().to_string(), ".");
        assert_eq!(name(r"a\.b\032c.d").to_string(), r"a\.b\ c.d");
    }

    #[test]
    fn eq_and_hash_ignore_case() {
        assert_eq!(name("Example.COM"), name("example.com"));
        assert!(name("Example.COM").name_eq(&name("example.com")));
        assert_ne!(name("example.com"), name("example.org"));

        let mut set = HashSet::new();
        set.insert(name("Example.COM"));
        assert!(set.contains(&name("example.com")));
    }

    #[test]
    fn labels_and_suffixes() {
        let n = name("foo.example.com");
        assert_eq!(
            n.iter_labels().collect::<Vec<_>>(),
            [b"foo".as_ref(), b"example", b"com", b""]
        );
        assert_eq!(n.label_count(), 4);
        assert_eq!(
            n.iter_suffixes().collect::<Vec<_>>(),
            [
                b"\x03foo\x07example\x03com\0".as_ref(),
                b"\x07example\x03com\0",
                b"\x03com\0",
            ]
        );
        assert_eq!(Name::root().iter_suffixes().count(), 0);
    }

    #[test]
    fn compose() {
        let n = name("foo.example.com");
        let mut buf = Vec::new();
        infallible(n.compose(&mut buf));
        assert_eq!(buf, b"\x03foo\x07example\x03com\0");
        assert_eq!(usize::from(n.compose_len()), buf.len());
    }

    #[test]
    fn parse() {
        // Uncompressed.
        let mut parser =
            Parser::from_ref(&b"\x03foo\x07example\x03com\0\x01"[..]);
        assert_eq!(Name::parse(&mut parser).unwrap(), name("foo.example.com"));
        assert_eq!(parser.remaining(), 1);

        // Compressed.
        let buf = b"\x07example\x03com\0\x03foo\xc0\x00\x03bar\xc0\x0d!";
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Name::parse(&mut parser).unwrap(), name("example.com"));
        assert_eq!(Name::parse(&mut parser).unwrap(), name("foo.example.com"));
        assert_eq!(
            Name::parse(&mut parser).unwrap(),
            name("bar.foo.example.com")
        );
        assert_eq!(parser.remaining(), 1);

        // Pointer to itself.
        let mut parser = Parser::from_ref(&b"\x03foo\xc0\x04"[..]);
        assert_eq!(
            Name::parse(&mut parser),
            Err(NameError::ExcessiveCompression.into())
        );

        // Forward pointer.
        let mut parser = Parser::from_ref(&b"\xc0\x02\x03foo\0"[..]);
        assert_eq!(
            Name::parse(&mut parser),
            Err(NameError::ExcessiveCompression.into())
        );

        // Short input.
        let mut parser = Parser::from_ref(&b"\x03foo\x03co"[..]);
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));

        // Bad label type.
        let mut parser = Parser::from_ref(&b"\x03foo\x41"[..]);
        assert_eq!(
            Name::parse(&mut parser),
            Err(NameError::BadLabel.into())
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(
            &name("www.example.com").readable(),
            &[
                Token::NewtypeStruct { name: "Name" },
                Token::Str("www.example.com."),
            ],
        );
        assert_tokens(
            &name("example").compact(),
            &[
                Token::NewtypeStruct { name: "Name" },
                Token::Bytes(b"\x07example\0"),
            ],
        );
    }
}
