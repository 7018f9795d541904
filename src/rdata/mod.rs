//! Record data implementations.
//!
//! This module contains the record data for the SELECT record type and the
//! NSEC record type whose layout it shares. The types are named after the
//! [`Rtype`] they implement and are re-exported here, so you can simply
//! `use domain_select::rdata::Select`.
//!
//! [`ZoneRecordData`] is an enum over all these types. It can be used where
//! records of either type are processed together, for instance when
//! parsing records from a message section.

pub mod nsec;
pub mod rtype_bitmap;
pub mod select;

pub use self::nsec::Nsec;
pub use self::rtype_bitmap::RtypeBitmap;
pub use self::select::Select;

use crate::base::iana::Rtype;
use crate::base::rdata::{
    ComposeRecordData, IsDuplicate, ParseRecordData, RecordData,
};
use crate::base::wire::{Composer, ParseError};
use core::fmt;
use octseq::parse::Parser;

//------------ ZoneRecordData ------------------------------------------------

/// Record data for all record types implemented by this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneRecordData {
    Select(Select),
    Nsec(Nsec),
}

//--- From

impl From<Select> for ZoneRecordData {
    fn from(value: Select) -> Self {
        ZoneRecordData::Select(value)
    }
}

impl From<Nsec> for ZoneRecordData {
    fn from(value: Nsec) -> Self {
        ZoneRecordData::Nsec(value)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for ZoneRecordData {
    fn rtype(&self) -> Rtype {
        match *self {
            ZoneRecordData::Select(ref inner) => inner.rtype(),
            ZoneRecordData::Nsec(ref inner) => inner.rtype(),
        }
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for ZoneRecordData
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        match rtype {
            Rtype::SELECT => Select::parse(parser).map(|data| Some(data.into())),
            Rtype::NSEC => Nsec::parse(parser).map(|data| Some(data.into())),
            _ => Ok(None),
        }
    }
}

impl ComposeRecordData for ZoneRecordData {
    fn rdlen(&self, compress: bool) -> u16 {
        match *self {
            ZoneRecordData::Select(ref inner) => inner.rdlen(compress),
            ZoneRecordData::Nsec(ref inner) => inner.rdlen(compress),
        }
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        match *self {
            ZoneRecordData::Select(ref inner) => inner.compose_rdata(target),
            ZoneRecordData::Nsec(ref inner) => inner.compose_rdata(target),
        }
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        match *self {
            ZoneRecordData::Select(ref inner) => {
                inner.compose_canonical_rdata(target)
            }
            ZoneRecordData::Nsec(ref inner) => {
                inner.compose_canonical_rdata(target)
            }
        }
    }
}

//--- IsDuplicate

impl IsDuplicate for ZoneRecordData {
    /// Values of different record types are never duplicates.
    fn is_duplicate(&self, other: &Self) -> bool {
        match (self, other) {
            (ZoneRecordData::Select(left), ZoneRecordData::Select(right)) => {
                left.is_duplicate(right)
            }
            (ZoneRecordData::Nsec(left), ZoneRecordData::Nsec(right)) => {
                IsDuplicate::is_duplicate(left, right)
            }
            _ => false,
        }
    }
}

//--- Display

impl fmt::Display for ZoneRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ZoneRecordData::Select(ref inner) => inner.fmt(f),
            ZoneRecordData::Nsec(ref inner) => inner.fmt(f),
        }
    }
}

//============ Testing =======================================================
