//! Traits for record data.
//!
//! Every record type defines the layout of its data differently. The types
//! in the top-level [rdata][crate::rdata] module implement the traits
//! defined here so that [`Record`][super::Record] can present, compose and
//! parse them without knowing which type it holds.
//!
//! [`RecordData`] reports the record type of a value. [`ComposeRecordData`]
//! writes the data in wire format and knows its length beforehand.
//! [`ParseRecordData`] reads data of the record types it accepts from a
//! parser. [`IsDuplicate`] tells whether two values describe the same zone
//! entry.

use super::iana::Rtype;
use super::wire::{Compose, Composer, ParseError};
use octseq::parse::Parser;

//----------- RecordData -----------------------------------------------------

/// Record data of some record type.
pub trait RecordData {
    /// Returns the record type of the value.
    ///
    /// Enums over several record data types return the type of the variant
    /// they currently hold.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// Record data that can be written in wire format.
pub trait ComposeRecordData: RecordData {
    /// Returns the length of the record data.
    ///
    /// If `compress` is `true`, name compression is available in the
    /// target. Record data types whose names are never compressed return
    /// the same value either way.
    fn rdlen(&self, compress: bool) -> u16;

    /// Appends the record data to `target`.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;

    /// Appends the record data in its canonical form to `target`.
    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;

    /// Appends RDLENGTH followed by the record data.
    fn compose_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.rdlen(target.can_compress()).compose(target)?;
        self.compose_rdata(target)
    }

    /// Appends the canonical record data prefixed with its length.
    fn compose_canonical_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.rdlen(false).compose(target)?;
        self.compose_canonical_rdata(target)
    }
}

impl<'a, T: ComposeRecordData> ComposeRecordData for &'a T {
    fn rdlen(&self, compress: bool) -> u16 {
        (*self).rdlen(compress)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_rdata(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose_canonical_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// Record data that can be read from wire format.
pub trait ParseRecordData<'a, Octs: ?Sized>: RecordData + Sized {
    /// Parses record data of type `rtype`.
    ///
    /// Returns `Ok(None)` without moving the parser if the type doesn’t
    /// handle `rtype`. Otherwise `parser` starts at the record data and is
    /// limited to RDLENGTH octets. Octets left over after parsing are the
    /// caller’s business.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ IsDuplicate ---------------------------------------------------

/// A record data type that can tell whether two values are duplicates.
///
/// Two records are duplicates if a zone should only keep one of them. This
/// is a weaker relation than equality: a type may decide to ignore some of
/// its fields.
pub trait IsDuplicate<Other: ?Sized = Self> {
    /// Returns whether `self` and `other` are duplicate entries.
    fn is_duplicate(&self, other: &Other) -> bool;
}

//============ Testing =======================================================
