//! Record data for the SELECT record type.
//!
//! A SELECT record names a *base* domain name together with a list of
//! record types that are selected beneath it. A short *selector* character
//! string says what the selection is for. The record data is laid out
//! like NSEC record data with the selector in front:
//!
//! ```text
//! +------------------+------------------+---------------------+
//! | selector         | base name        | type bitmap         |
//! | (charstr)        | (uncompressed)   | (window blocks)     |
//! +------------------+------------------+---------------------+
//! ```
//!
//! Record data received from the network may be cut short after the
//! selector or after the base name. Such data is accepted and results in
//! a truncated value, see [`Select::parse`].

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{
    ComposeRecordData, IsDuplicate, ParseRecordData, RecordData,
};
use crate::base::scan::{ScanError, ScanErrorKind, Scanner, TokenKind};
use crate::base::wire::{Composer, ParseError};
use crate::rdata::rtype_bitmap::{scan_name_and_types, RtypeBitmap};
use core::fmt;
use octseq::parse::Parser;
use tracing::{debug, trace};

//------------ Select --------------------------------------------------------

/// SELECT record data.
///
/// A complete value has a selector, a base name, and a possibly empty
/// list of types. A value parsed from truncated wire data may lack the base
/// name and types. A value without a base name never has any types.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SelectFields")
)]
pub struct Select {
    selector: CharStr,
    base: Option<Name>,
    types: RtypeBitmap,
}

impl Select {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::SELECT;

    /// Creates complete SELECT record data.
    pub fn new(selector: CharStr, base: Name, types: RtypeBitmap) -> Self {
        Select {
            selector,
            base: Some(base),
            types,
        }
    }

    /// Creates truncated SELECT record data without types.
    pub fn new_truncated(selector: CharStr, base: Option<Name>) -> Self {
        Select {
            selector,
            base,
            types: RtypeBitmap::new(),
        }
    }

    pub fn selector(&self) -> &CharStr {
        &self.selector
    }

    /// Returns the base name if present.
    pub fn base(&self) -> Option<&Name> {
        self.base.as_ref()
    }

    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    /// Returns whether the record data lacks the base name.
    pub fn is_truncated(&self) -> bool {
        self.base.is_none()
    }

    /// Returns whether two values describe the same zone entry.
    ///
    /// Base names are compared ignoring ASCII case, the types need to be
    /// in the same order. The selector is ignored.
    pub fn is_duplicate(&self, other: &Self) -> bool {
        self.base == other.base && self.types == other.types
    }
}

/// # Parsing and Scanning
///
impl Select {
    /// Parses SELECT record data.
    ///
    /// The parser must be limited to the record data. Parsing stops early
    /// without error if the data ends right after the selector or right
    /// after the base name.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Self, ParseError> {
        let selector = CharStr::parse(parser)?;
        if parser.remaining() == 0 {
            trace!(%selector, "SELECT record data ends after selector");
            return Ok(Self::new_truncated(selector, None));
        }
        let base = Name::parse(parser)?;
        if parser.remaining() == 0 {
            trace!(
                %selector,
                base = %base.fmt_with_dot(),
                "SELECT record data ends after base name"
            );
            return Ok(Self::new_truncated(selector, Some(base)));
        }
        let types = RtypeBitmap::parse(parser)?;
        Ok(Self::new(selector, base, types))
    }

    /// Scans SELECT record data from a zone file entry.
    ///
    /// The selector has to be followed by exactly one blank. Relative base
    /// names are made absolute using `origin`.
    pub fn scan<S: Scanner + ?Sized>(
        scanner: &mut S,
        origin: &Name,
    ) -> Result<Self, ScanError> {
        Self::scan_rdata(scanner, origin).map_err(|err| {
            debug!(
                line = err.line(),
                col = err.col(),
                "failed to scan SELECT record data: {}",
                err.kind()
            );
            err
        })
    }

    fn scan_rdata<S: Scanner + ?Sized>(
        scanner: &mut S,
        origin: &Name,
    ) -> Result<Self, ScanError> {
        let mut token = scanner.next_token();
        while token.is_blank() {
            token = scanner.next_token();
        }
        let selector = match token.kind() {
            TokenKind::Word(text) | TokenKind::Quoted(text) => {
                CharStr::from_chars(text.chars()).map_err(|err| {
                    token.error(ScanErrorKind::BadCharStr(err))
                })?
            }
            TokenKind::EndOfEntry => {
                return Err(token.error(ScanErrorKind::NoRdata))
            }
            TokenKind::Error(msg) => {
                return Err(token.error(ScanErrorKind::Lexer(*msg)))
            }
            TokenKind::Blank => {
                return Err(token.error(ScanErrorKind::UnexpectedToken))
            }
        };
        if selector.is_empty() {
            return Err(token.error(ScanErrorKind::EmptySelector));
        }

        let token = scanner.next_token();
        if token.is_end() {
            return Err(token.error(ScanErrorKind::MissingBase));
        }
        if !token.is_blank() {
            return Err(token.error(ScanErrorKind::MissingBlank));
        }

        let (base, types) = scan_name_and_types(scanner, origin)?;
        Ok(Self::new(selector, base, types))
    }
}

//--- TryFrom

/// The fields of a [`Select`] as they appear when deserializing.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "Select")]
struct SelectFields {
    selector: CharStr,
    base: Option<Name>,
    types: RtypeBitmap,
}

#[cfg(feature = "serde")]
impl TryFrom<SelectFields> for Select {
    type Error = TypesWithoutBase;

    fn try_from(fields: SelectFields) -> Result<Self, Self::Error> {
        if fields.base.is_none() && !fields.types.is_empty() {
            return Err(TypesWithoutBase);
        }
        Ok(Select {
            selector: fields.selector,
            base: fields.base,
            types: fields.types,
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Select {
    fn rtype(&self) -> Rtype {
        Select::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Select {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Select::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Select {
    fn rdlen(&self, _compress: bool) -> u16 {
        // The base name is never compressed.
        self.selector.compose_len()
            + self.base.as_ref().map_or(0, Name::compose_len)
            + self.types.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.selector.compose(target)?;
        if let Some(base) = self.base.as_ref() {
            base.compose(target)?;
        }
        self.types.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        // The base name keeps its case.
        self.compose_rdata(target)
    }
}

//--- IsDuplicate

impl IsDuplicate for Select {
    fn is_duplicate(&self, other: &Self) -> bool {
        Select::is_duplicate(self, other)
    }
}

//--- Display

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.selector.display_quoted())?;
        if let Some(base) = self.base.as_ref() {
            write!(f, " {}", base.fmt_with_dot())?;
        }
        for rtype in &self.types {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ TypesWithoutBase ----------------------------------------------

/// SELECT record data listed types but had no base name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypesWithoutBase;

impl fmt::Display for TypesWithoutBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SELECT record data with types but without base name")
    }
}

impl std::error::Error for TypesWithoutBase {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen, test_scan};
    use crate::zonefile::lexer::Lexer;
    use core::str::FromStr;
    use octseq::array::Array;
    use octseq::builder::infallible;
    use rstest::rstest;

    const EXAMPLE_WIRE: &[u8] = b"\x07example\
        \x03foo\x07example\x03com\x00\
        \x00\x03\x40\x01\x80";

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn example() -> Select {
        Select::new(
            CharStr::from_str("example").unwrap(),
            name("foo.example.com"),
            RtypeBitmap::from_types([Rtype::A, Rtype::MX, Rtype::TXT]),
        )
    }

    #[test]
    fn select_compose_parse_scan() {
        let rdata = example();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser| Select::parse(parser));
        test_scan(
            r#""example" foo.example.com. A MX TXT"#,
            |scanner| Select::scan(scanner, &Name::root()),
            &rdata,
        );
        assert_eq!(rdata.to_string(), r#""example" foo.example.com. A MX TXT"#);
    }

    #[test]
    fn example_wire() {
        let mut buf = Vec::new();
        infallible(example().compose_rdata(&mut buf));
        assert_eq!(buf, EXAMPLE_WIRE);
        assert_eq!(usize::from(example().rdlen(false)), EXAMPLE_WIRE.len());
    }

    #[test]
    fn base_never_compressed() {
        let mut buf = crate::base::Compressor::new(Vec::new());
        infallible(buf.append_compressed_name(&name("foo.example.com")));
        let start = buf.as_slice().len();
        let table = buf.table_len();
        infallible(example().compose_rdata(&mut buf));
        assert_eq!(&buf.as_slice()[start..], EXAMPLE_WIRE);
        assert_eq!(buf.table_len(), table);
        assert_eq!(usize::from(example().rdlen(true)), EXAMPLE_WIRE.len());
    }

    #[test]
    fn parse_truncated() {
        crate::logging::init_logging();

        let mut parser = Parser::from_ref(&b"\x07example"[..]);
        let rdata = Select::parse(&mut parser).unwrap();
        assert_eq!(rdata.selector().as_slice(), b"example");
        assert!(rdata.is_truncated());
        assert!(rdata.base().is_none());
        assert!(rdata.types().is_empty());

        let mut parser = Parser::from_ref(&EXAMPLE_WIRE[..25]);
        let rdata = Select::parse(&mut parser).unwrap();
        assert_eq!(rdata.base(), Some(&name("foo.example.com")));
        assert!(rdata.types().is_empty());
        assert_eq!(rdata.to_string(), r#""example" foo.example.com."#);

        let wire = b"\x07example\x00\x00\x01\x40";
        let mut parser = Parser::from_ref(&wire[..]);
        let rdata = Select::parse(&mut parser).unwrap();
        assert_eq!(rdata.base(), Some(&Name::root()));
        assert_eq!(rdata.types().as_slice(), [Rtype::A]);
    }

    #[rstest]
    #[case::empty(b"", ParseError::ShortInput)]
    #[case::short_selector(b"\x07exam", ParseError::ShortInput)]
    #[case::short_base(b"\x07example\x03foo", ParseError::ShortInput)]
    #[case::bad_label(b"\x07example\x41", ParseError::form_error(""))]
    #[case::short_bitmap(b"\x07example\x00\x00\x02\x40", ParseError::ShortInput)]
    #[case::empty_window(b"\x07example\x00\x00\x00", ParseError::form_error(""))]
    fn parse_errors(#[case] wire: &[u8], #[case] expected: ParseError) {
        let mut parser = Parser::from_ref(wire);
        let err = Select::parse(&mut parser).unwrap_err();
        assert_eq!(
            core::mem::discriminant(&err),
            core::mem::discriminant(&expected)
        );
    }

    #[test]
    fn compose_truncated() {
        let selector = CharStr::from_str("example").unwrap();
        let rdata = Select::new_truncated(selector.clone(), None);
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser| Select::parse(parser));
        assert_eq!(rdata.to_string(), r#""example""#);

        let rdata = Select::new_truncated(selector, Some(name("example.com")));
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser| Select::parse(parser));
    }

    #[test]
    fn selector_keeps_case() {
        let rdata = Select::new(
            CharStr::from_str("ExAmple").unwrap(),
            name("Foo.Example.com"),
            RtypeBitmap::from_types([Rtype::A]),
        );

        let mut buf = Vec::new();
        infallible(rdata.compose_rdata(&mut buf));
        assert_eq!(&buf[..8], b"\x07ExAmple");
        let parsed = Select::parse(&mut Parser::from_ref(&buf[..])).unwrap();
        assert_eq!(parsed.selector().as_slice(), b"ExAmple");
        assert_eq!(
            parsed.base().map(|base| base.as_slice()),
            Some(&b"\x03Foo\x07Example\x03com\x00"[..])
        );

        let text = rdata.to_string();
        assert_eq!(text, r#""ExAmple" Foo.Example.com. A"#);
        let scanned =
            Select::scan(&mut Lexer::new(&text), &Name::root()).unwrap();
        assert_eq!(scanned.selector().as_slice(), b"ExAmple");
        assert_eq!(scanned.to_string(), text);

        let scanned =
            Select::scan(&mut Lexer::new("SeLeCt foo. A"), &Name::root())
                .unwrap();
        assert_eq!(scanned.selector().as_slice(), b"SeLeCt");
    }

    #[test]
    fn compose_short_buf() {
        let mut buf = Array::<16>::new();
        assert!(example().compose_rdata(&mut buf).is_err());
    }

    #[rstest]
    #[case::no_rdata("", ScanErrorKind::NoRdata, 1, 1)]
    #[case::comment_only("; nothing here", ScanErrorKind::NoRdata, 1, 15)]
    #[case::empty_selector(r#""" foo. A"#, ScanErrorKind::EmptySelector, 1, 1)]
    #[case::missing_base(r#""example""#, ScanErrorKind::MissingBase, 1, 10)]
    #[case::missing_base_comment(
        "\"example\" ; no base",
        ScanErrorKind::MissingBase,
        1,
        20
    )]
    #[case::missing_blank(
        r#""example"foo. A"#,
        ScanErrorKind::MissingBlank,
        1,
        10
    )]
    #[case::quoted_base(
        r#""example" "foo." A"#,
        ScanErrorKind::UnexpectedToken,
        1,
        11
    )]
    #[case::bad_type(
        r#""example" foo. A NOPE"#,
        ScanErrorKind::BadRtype("NOPE".into()),
        1,
        18
    )]
    #[case::unbalanced(
        r#""example" ( foo. A"#,
        ScanErrorKind::Lexer("unbalanced parens"),
        1,
        19
    )]
    fn scan_errors(
        #[case] input: &str,
        #[case] kind: ScanErrorKind,
        #[case] line: usize,
        #[case] col: usize,
    ) {
        crate::logging::init_logging();
        let err = Select::scan(&mut Lexer::new(input), &Name::root())
            .unwrap_err();
        assert_eq!(*err.kind(), kind);
        assert_eq!((err.line(), err.col()), (line, col));
    }

    #[test]
    fn scan_variants() {
        let origin = name("example.com");

        // Unquoted selector, relative base, repeated and mixed-case types.
        let rdata = Select::scan(
            &mut Lexer::new("ex\\032ample foo mx a MX ( txt\n )"),
            &origin,
        )
        .unwrap();
        assert_eq!(rdata.selector().as_slice(), b"ex ample");
        assert_eq!(rdata.base(), Some(&name("foo.example.com")));
        assert_eq!(rdata.types().as_slice(), [Rtype::MX, Rtype::A, Rtype::TXT]);
        assert_eq!(
            rdata.to_string(),
            r#""ex\ ample" foo.example.com. MX A TXT"#
        );

        // No types at all.
        let rdata =
            Select::scan(&mut Lexer::new(r#""sel" @"#), &origin).unwrap();
        assert_eq!(rdata.base(), Some(&origin));
        assert!(rdata.types().is_empty());
    }

    #[test]
    fn duplicates() {
        let a = example();
        let other_selector = Select::new(
            CharStr::from_str("other").unwrap(),
            name("FOO.example.COM"),
            a.types().clone(),
        );
        assert!(a.is_duplicate(&other_selector));
        assert!(other_selector.is_duplicate(&a));

        let reordered = Select::new(
            a.selector().clone(),
            name("foo.example.com"),
            RtypeBitmap::from_types([Rtype::MX, Rtype::A, Rtype::TXT]),
        );
        assert!(!a.is_duplicate(&reordered));
        assert!(!reordered.is_duplicate(&a));

        let other_base = Select::new(
            a.selector().clone(),
            name("bar.example.com"),
            a.types().clone(),
        );
        assert!(!a.is_duplicate(&other_base));

        let truncated = Select::new_truncated(a.selector().clone(), None);
        assert!(!a.is_duplicate(&truncated));
        assert!(!truncated.is_duplicate(&a));
        assert!(truncated.is_duplicate(&Select::new_truncated(
            CharStr::from_str("x").unwrap(),
            None
        )));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(
            &example().readable(),
            &[
                Token::Struct {
                    name: "Select",
                    len: 3,
                },
                Token::Str("selector"),
                Token::NewtypeStruct { name: "CharStr" },
                Token::Str("example"),
                Token::Str("base"),
                Token::Some,
                Token::NewtypeStruct { name: "Name" },
                Token::Str("foo.example.com."),
                Token::Str("types"),
                Token::Seq { len: Some(3) },
                Token::Str("A"),
                Token::Str("MX"),
                Token::Str("TXT"),
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );

        assert_tokens(
            &Select::new_truncated(CharStr::from_str("x").unwrap(), None)
                .readable(),
            &[
                Token::Struct {
                    name: "Select",
                    len: 3,
                },
                Token::Str("selector"),
                Token::NewtypeStruct { name: "CharStr" },
                Token::Str("x"),
                Token::Str("base"),
                Token::None,
                Token::Str("types"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn de_types_without_base() {
        use serde_test::{assert_de_tokens_error, Readable, Token};

        assert_de_tokens_error::<Readable<Select>>(
            &[
                Token::Struct {
                    name: "Select",
                    len: 3,
                },
                Token::Str("selector"),
                Token::NewtypeStruct { name: "CharStr" },
                Token::Str("x"),
                Token::Str("base"),
                Token::None,
                Token::Str("types"),
                Token::Seq { len: Some(1) },
                Token::Str("A"),
                Token::SeqEnd,
                Token::StructEnd,
            ],
            "SELECT record data with types but without base name",
        );
    }
}
