//! Handling of DNS data.
//!
//! This module provides types and traits for working with DNS data as far
//! as record data types like SELECT need it. The types fall into a number
//! of groups.
//!
//! # IANA Parameters
//!
//! The [iana] module contains the record types and classes as newtypes
//! over their integer values with conversions from and to their
//! mnemonics.
//!
//! # Basic Values
//!
//! Domain names are represented by [`Name`], an owned absolute name kept in
//! uncompressed wire format. Character strings are represented by
//! [`CharStr`].
//!
//! # Wire Format
//!
//! The [wire] module contains the traits for composing data into and
//! parsing it from wire format. Name compression happens through the
//! [`Compressor`] which wraps a compose target and keeps the compression
//! table for it.
//!
//! # Records
//!
//! The [record] module contains [`Record`], the combination of an owner
//! name, class, time-to-live, and record data. The traits record data needs
//! to implement live in [rdata].
//!
//! # Representation Format
//!
//! The [scan] module contains symbols, the tokens produced from zonefile
//! text, and the [`Scanner`][scan::Scanner] trait record data uses to
//! consume those tokens.

pub use self::charstr::CharStr;
pub use self::compress::Compressor;
pub use self::iana::{Class, Rtype};
pub use self::name::Name;
pub use self::record::{Record, RecordHeader, Ttl};

pub mod charstr;
pub mod compress;
pub mod iana;
pub mod name;
pub mod rdata;
pub mod record;
pub mod scan;
pub mod wire;
