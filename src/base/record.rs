//! Resource records.
//!
//! A [`Record`] pairs record data with the owner name, class, and TTL it
//! is stored under. [`RecordHeader`] is everything on the wire before the
//! record data, including its length. [`Ttl`] wraps the time-to-live.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::wire::{Compose, Composer, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Record --------------------------------------------------------

/// A resource record.
///
/// The owner name, record type, and class form the key of a record. The
/// record type comes from the data, so `Data` decides what kind of record
/// this is. The TTL says how long the record may be cached.
///
/// Records are built via [`new`][Self::new], typically around data
/// scanned from a zonefile entry, or read via [`parse`][Self::parse].
#[derive(Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<Data> {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: Ttl,

    /// The record data, which also determines the record type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Data> Record<Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Name, class: Class, ttl: Ttl, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Returns the header of the record as it would appear in wire format.
    pub fn header(&self, compress: bool) -> RecordHeader
    where
        Data: ComposeRecordData,
    {
        RecordHeader::new(
            self.owner.clone(),
            self.data.rtype(),
            self.class,
            self.ttl,
            self.data.rdlen(compress),
        )
    }
}

/// # Parsing and Composing
///
impl<Data> Record<Data> {
    /// Parses a complete record.
    ///
    /// Fails if the record type in the header is not one `Data` accepts or
    /// if the record data doesn’t exactly fill its announced length.
    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Self, ParseError>
    where
        Data: ParseRecordData<'a, Octs>,
    {
        let header = RecordHeader::parse(parser)?;
        header
            .parse_into_record(parser)?
            .ok_or_else(|| ParseError::form_error("unexpected record type"))
    }

    /// Appends the wire format of the record to a target.
    ///
    /// The owner name is compressed if the target supports it.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>
    where
        Data: ComposeRecordData,
    {
        target.append_compressed_name(&self.owner)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }

    /// Returns the number of octets `compose` would append to `target`.
    ///
    /// The target isn’t changed.
    pub fn compose_len<Target: Composer + ?Sized>(
        &self,
        target: &Target,
    ) -> usize
    where
        Data: ComposeRecordData,
    {
        RecordHeader::compose_len_for(&self.owner, target)
            + usize::from(self.data.rdlen(target.can_compress()))
    }
}

//--- Display and Debug

impl<Data> fmt::Display for Record<Data>
where
    Data: RecordData + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.owner.fmt_with_dot(),
            self.ttl.as_secs(),
            self.class,
            self.data.rtype(),
            self.data
        )
    }
}

impl<Data: fmt::Debug> fmt::Debug for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("owner", &self.owner)
            .field("class", &self.class)
            .field("ttl", &self.ttl)
            .field("data", &self.data)
            .finish()
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type encapsulates the common header of a resource record. It
/// consists of the owner, record type, class, TTL, and the length of the
/// record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordHeader {
    owner: Name,
    rtype: Rtype,
    class: Class,
    ttl: Ttl,
    rdlen: u16,
}

impl RecordHeader {
    /// The length of the header without the owner name.
    const FIXED_LEN: usize = 10;

    /// Creates a new record header from its components.
    pub fn new(
        owner: Name,
        rtype: Rtype,
        class: Class,
        ttl: Ttl,
        rdlen: u16,
    ) -> Self {
        RecordHeader {
            owner,
            rtype,
            class,
            ttl,
            rdlen,
        }
    }

    /// Returns a reference to the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }
}

impl RecordHeader {
    /// Parses a record header.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(RecordHeader::new(
            Name::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
            Ttl::parse(parser)?,
            u16::parse(parser)?,
        ))
    }

    /// Parses the record data following this header.
    ///
    /// `parser` must be positioned right after the header. The record data
    /// is skipped in any case. If `Data` accepts the header’s record type,
    /// the complete record is returned. Record data that `Data` doesn’t
    /// consume completely is a form error.
    pub fn parse_into_record<'a, Octs, Data>(
        self,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Record<Data>>, ParseError>
    where
        Octs: AsRef<[u8]> + ?Sized,
        Data: ParseRecordData<'a, Octs>,
    {
        let mut parser = parser.parse_parser(usize::from(self.rdlen))?;
        let res = Data::parse_rdata(self.rtype, &mut parser)?
            .map(|data| Record::new(self.owner, self.class, self.ttl, data));
        if res.is_some() && parser.remaining() > 0 {
            return Err(ParseError::form_error("trailing data in record"));
        }
        Ok(res)
    }

    /// Appends the header to a target, compressing the owner if possible.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_compressed_name(&self.owner)?;
        self.rtype.compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.rdlen.compose(target)
    }

    /// Returns the length `compose` would add to `target`.
    pub fn compose_len<Target: Composer + ?Sized>(
        &self,
        target: &Target,
    ) -> usize {
        Self::compose_len_for(&self.owner, target)
    }

    fn compose_len_for<Target: Composer + ?Sized>(
        owner: &Name,
        target: &Target,
    ) -> usize {
        target.compressed_name_len(owner) + Self::FIXED_LEN
    }
}

//--- Display

impl fmt::Display for RecordHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.owner.fmt_with_dot(),
            self.ttl.as_secs(),
            self.class,
            self.rtype
        )
    }
}

//------------ Ttl -----------------------------------------------------------

/// The time-to-live of a record in seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of zero seconds.
    pub const ZERO: Ttl = Ttl(0);

    /// A time-to-live of one hour.
    pub const HOUR: Ttl = Ttl(3600);

    pub const COMPOSE_LEN: u16 = 4;

    /// Creates a new time-to-live from seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Ttl(secs)
    }

    /// Returns the number of seconds.
    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.as_secs().compose(target)
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        u32::parse(parser).map(Ttl::from_secs)
    }
}

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        Ttl::from_secs(secs)
    }
}

//============ Testing =======================================================
