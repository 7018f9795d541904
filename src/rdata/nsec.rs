//! Record data for the NSEC record type.
//!
//! NSEC record data is the next owner name in canonical order followed by
//! the types present at the record’s owner. SELECT record data reuses its
//! name and type layout.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{
    ComposeRecordData, IsDuplicate, ParseRecordData, RecordData,
};
use crate::base::scan::{ScanError, Scanner};
use crate::base::wire::{Composer, ParseError};
use crate::rdata::rtype_bitmap::{scan_name_and_types, RtypeBitmap};
use core::fmt;
use octseq::parse::Parser;
use tracing::debug;

//------------ Nsec ----------------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsec {
    next_name: Name,
    types: RtypeBitmap,
}

impl Nsec {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC;

    pub fn new(next_name: Name, types: RtypeBitmap) -> Self {
        Nsec { next_name, types }
    }

    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    pub fn set_next_name(&mut self, next_name: Name) {
        self.next_name = next_name
    }

    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn scan<S: Scanner + ?Sized>(
        scanner: &mut S,
        origin: &Name,
    ) -> Result<Self, ScanError> {
        let (next_name, types) = scan_name_and_types(scanner, origin)
            .map_err(|err| {
                debug!(
                    line = err.line(),
                    col = err.col(),
                    "failed to scan NSEC record data: {}",
                    err.kind()
                );
                err
            })?;
        Ok(Self::new(next_name, types))
    }

    pub fn parse<'a, Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Nsec::new(Name::parse(parser)?, RtypeBitmap::parse(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec {
    fn rtype(&self) -> Rtype {
        Nsec::RTYPE
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Nsec {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nsec::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec {
    fn rdlen(&self, _compress: bool) -> u16 {
        self.next_name.compose_len() + self.types.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.next_name.compose(target)?;
        self.types.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        // Deferring to compose_rdata is correct as we keep the case.
        self.compose_rdata(target)
    }
}

//--- IsDuplicate

impl IsDuplicate for Nsec {
    fn is_duplicate(&self, other: &Self) -> bool {
        self.next_name.name_eq(&other.next_name) && self.types == other.types
    }
}

//--- Display

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.next_name.fmt_with_dot())?;
        for rtype in &self.types {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen, test_scan};
    use core::str::FromStr;

    #[test]
    fn nsec_compose_parse_scan() {
        let rdata = Nsec::new(
            Name::from_str("example.com").unwrap(),
            RtypeBitmap::from_types([Rtype::A, Rtype::SELECT]),
        );
        test_rdlen(&rdata);
        test_compose_parse(&rdata, |parser| Nsec::parse(parser));
        test_scan(
            "example.com. A SELECT",
            |scanner| Nsec::scan(scanner, &Name::root()),
            &rdata,
        );
        assert_eq!(rdata.to_string(), "example.com. A SELECT");
    }

    #[test]
    fn duplicates() {
        let types = RtypeBitmap::from_types([Rtype::A]);
        let a = Nsec::new(Name::from_str("a.example").unwrap(), types.clone());
        let b = Nsec::new(Name::from_str("A.EXAMPLE").unwrap(), types);
        assert!(a.is_duplicate(&b));
        assert!(!a.is_duplicate(&Nsec::new(
            Name::from_str("a.example").unwrap(),
            RtypeBitmap::new()
        )));
    }
}
