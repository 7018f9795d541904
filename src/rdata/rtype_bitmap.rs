//! Record type bitmaps.
//!
//! A record type bitmap is a set of record types encoded in the window
//! block format of [RFC 4034, section 4.1.2]. NSEC records use them to list
//! the types present at a name, SELECT records to list the types selected
//! beneath their base name.
//!
//! [RFC 4034, section 4.1.2]: https://tools.ietf.org/html/rfc4034#section-4.1.2

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::scan::{ScanError, ScanErrorKind, Scanner, TokenKind};
use crate::base::wire::{FormError, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ RtypeBitmap ---------------------------------------------------

/// A sequence of distinct record types.
///
/// The bitmap keeps the types in the order they were given in. This order
/// is used for presentation and comparison. The wire format always lists
/// the types in ascending order as required by the window block encoding,
/// so a bitmap parsed from wire format is always sorted.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Rtype>", into = "Vec<Rtype>")
)]
pub struct RtypeBitmap(Vec<Rtype>);

impl RtypeBitmap {
    /// Creates an empty bitmap.
    #[must_use]
    pub fn new() -> Self {
        RtypeBitmap(Vec::new())
    }

    /// Creates a bitmap from a sequence of types.
    ///
    /// Repeated types are dropped, only the first occurence is kept.
    pub fn from_types(types: impl IntoIterator<Item = Rtype>) -> Self {
        let mut res = RtypeBitmap::new();
        for rtype in types {
            res.add(rtype);
        }
        res
    }

    /// Adds a type to the end of the bitmap unless it is present already.
    ///
    /// Returns whether the type was added.
    pub fn add(&mut self, rtype: Rtype) -> bool {
        if self.contains(rtype) {
            false
        } else {
            self.0.push(rtype);
            true
        }
    }

    /// Returns whether the bitmap contains the given type.
    pub fn contains(&self, rtype: Rtype) -> bool {
        self.0.contains(&rtype)
    }

    /// Returns an iterator over the types in stored order.
    pub fn iter(&self) -> core::slice::Iter<'_, Rtype> {
        self.0.iter()
    }

    /// Returns the types as a slice in stored order.
    pub fn as_slice(&self) -> &[Rtype] {
        &self.0
    }

    /// Returns the number of types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no types.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the window blocks for the bitmap.
    ///
    /// Each window has room for all 32 bitmap octets. Windows are in
    /// ascending order and only present if they contain a type.
    fn windows(&self) -> Vec<(u8, [u8; 32])> {
        let mut res: Vec<(u8, [u8; 32])> = Vec::new();
        for &rtype in &self.0 {
            let (block, octet, mask) = split_rtype(rtype);
            let idx = match res.binary_search_by_key(&block, |w| w.0) {
                Ok(idx) => idx,
                Err(idx) => {
                    res.insert(idx, (block, [0; 32]));
                    idx
                }
            };
            res[idx].1[octet] |= mask;
        }
        res
    }
}

/// # Parsing and Composing
///
impl RtypeBitmap {
    /// Parses a bitmap from the remaining octets of a parser.
    ///
    /// Window blocks must be in ascending order, must not be empty, and
    /// must not exceed 32 octets.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let len = parser.remaining();
        let res = Self::from_wire(parser.peek_all())?;
        parser.advance(len)?;
        Ok(res)
    }

    fn from_wire(mut data: &[u8]) -> Result<Self, RtypeBitmapError> {
        let mut res = Vec::new();
        let mut last_window = None;
        while !data.is_empty() {
            let ((window_num, window), next_data) = read_window(data)?;
            if last_window.map_or(false, |last| last >= window_num) {
                return Err(RtypeBitmapError::BadRtypeBitmap);
            }
            last_window = Some(window_num);
            for (octet_num, &octet) in window.iter().enumerate() {
                for bit in 0..8u16 {
                    if octet & (0b1000_0000 >> bit) != 0 {
                        res.push(Rtype::from_int(
                            u16::from(window_num) << 8
                                | (octet_num as u16) << 3
                                | bit,
                        ));
                    }
                }
            }
            data = next_data;
        }
        Ok(RtypeBitmap(res))
    }

    /// Returns the length of the wire format.
    pub fn compose_len(&self) -> u16 {
        self.windows()
            .iter()
            .map(|(_, bitmap)| 2 + u16::from(bitmap_len(bitmap)))
            .sum()
    }

    /// Appends the wire format to a target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for (window_num, bitmap) in self.windows() {
            let len = bitmap_len(&bitmap);
            target.append_slice(&[window_num, len])?;
            target.append_slice(&bitmap[..usize::from(len)])?;
        }
        Ok(())
    }
}

/// # Scanning
///
impl RtypeBitmap {
    /// Scans the rest of the entry as a list of type mnemonics.
    ///
    /// Repeated types are dropped.
    pub fn scan<S: Scanner + ?Sized>(
        scanner: &mut S,
    ) -> Result<Self, ScanError> {
        let mut res = RtypeBitmap::new();
        loop {
            let token = scanner.next_token();
            match token.kind() {
                TokenKind::Blank => {}
                TokenKind::EndOfEntry => return Ok(res),
                TokenKind::Word(word) => {
                    let rtype =
                        Rtype::from_bytes(word.as_bytes()).ok_or_else(|| {
                            token.error(ScanErrorKind::BadRtype(word.clone()))
                        })?;
                    res.add(rtype);
                }
                TokenKind::Quoted(_) => {
                    return Err(token.error(ScanErrorKind::UnexpectedToken))
                }
                TokenKind::Error(msg) => {
                    return Err(token.error(ScanErrorKind::Lexer(*msg)))
                }
            }
        }
    }
}

//--- From

impl From<Vec<Rtype>> for RtypeBitmap {
    fn from(types: Vec<Rtype>) -> Self {
        Self::from_types(types)
    }
}

impl From<RtypeBitmap> for Vec<Rtype> {
    fn from(bitmap: RtypeBitmap) -> Self {
        bitmap.0
    }
}

impl FromIterator<Rtype> for RtypeBitmap {
    fn from_iter<I: IntoIterator<Item = Rtype>>(iter: I) -> Self {
        Self::from_types(iter)
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a RtypeBitmap {
    type Item = &'a Rtype;
    type IntoIter = core::slice::Iter<'a, Rtype>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display

impl fmt::Display for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(rtype) = iter.next() {
            write!(f, "{}", rtype)?;
        }
        for rtype in iter {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

//------------ scan_name_and_types -------------------------------------------

/// Scans a domain name followed by a list of record types.
///
/// This is the record data format shared by NSEC and SELECT. The scanner
/// needs to be positioned right before the token holding the name. Relative
/// names are made absolute using `origin`.
pub fn scan_name_and_types<S: Scanner + ?Sized>(
    scanner: &mut S,
    origin: &Name,
) -> Result<(Name, RtypeBitmap), ScanError> {
    let token = scanner.next_token();
    let name = match token.kind() {
        TokenKind::Word(text) => Name::from_symbols(text, origin)
            .map_err(|err| token.error(ScanErrorKind::BadName(err)))?,
        TokenKind::EndOfEntry => {
            return Err(token.error(ScanErrorKind::MissingName))
        }
        TokenKind::Error(msg) => {
            return Err(token.error(ScanErrorKind::Lexer(*msg)))
        }
        TokenKind::Blank | TokenKind::Quoted(_) => {
            return Err(token.error(ScanErrorKind::UnexpectedToken))
        }
    };
    let types = RtypeBitmap::scan(scanner)?;
    Ok((name, types))
}

//============ Error Types ===================================================

//------------ RtypeBitmapError ----------------------------------------------

/// Record type bitmap data was malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RtypeBitmapError {
    /// A window block was cut short.
    ShortInput,

    /// A window block was empty, too long, or out of order.
    BadRtypeBitmap,
}

//--- From

impl From<RtypeBitmapError> for ParseError {
    fn from(err: RtypeBitmapError) -> ParseError {
        match err {
            RtypeBitmapError::ShortInput => ParseError::ShortInput,
            RtypeBitmapError::BadRtypeBitmap => {
                FormError::new("invalid record type bitmap").into()
            }
        }
    }
}

//--- Display and Error

impl fmt::Display for RtypeBitmapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RtypeBitmapError::ShortInput => ParseError::ShortInput.fmt(f),
            RtypeBitmapError::BadRtypeBitmap => {
                f.write_str("invalid record type bitmap")
            }
        }
    }
}

impl std::error::Error for RtypeBitmapError {}

//============ Friendly Helper Functions =====================================

/// Splits an Rtype value into window number, octet number, and octet mask.
fn split_rtype(rtype: Rtype) -> (u8, usize, u8) {
    let rtype = rtype.to_int();
    (
        (rtype >> 8) as u8,
        ((rtype & 0xFF) >> 3) as usize,
        0b1000_0000 >> (rtype & 0x07),
    )
}

/// Returns the number of octets of a bitmap up to the last non-zero one.
fn bitmap_len(bitmap: &[u8; 32]) -> u8 {
    bitmap.iter().rposition(|&octet| octet != 0).map_or(0, |pos| pos as u8 + 1)
}

/// Splits the next bitmap window from the data.
///
/// Returns the window number, the window’s bitmap octets, and the
/// remaining data.
#[allow(clippy::type_complexity)]
fn read_window(data: &[u8]) -> Result<((u8, &[u8]), &[u8]), RtypeBitmapError> {
    let (&window_num, data) =
        data.split_first().ok_or(RtypeBitmapError::ShortInput)?;
    let (&len, data) =
        data.split_first().ok_or(RtypeBitmapError::ShortInput)?;
    let len = usize::from(len);
    // https://tools.ietf.org/html/rfc4034#section-4.1.2:
    //  Blocks with no types present MUST NOT be included.
    if len == 0 || len > 32 {
        return Err(RtypeBitmapError::BadRtypeBitmap);
    }
    if data.len() < len {
        return Err(RtypeBitmapError::ShortInput);
    }
    let (window, data) = data.split_at(len);
    Ok(((window_num, window), data))
}

//============ Testing =======================================================
