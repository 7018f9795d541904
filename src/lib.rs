//! SELECT record data for the DNS.
//!
//! This crate provides the record data type for SELECT records together
//! with the building blocks it needs to be useful on its own. A SELECT
//! record carries a short selector string, a base domain name, and a bitmap
//! of record types. The crate can present such record data in zonefile
//! format, scan it from a zonefile token stream, compose and parse it in
//! wire format, and decide whether two records are duplicates.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: record types and classes,
//!   domain names, character strings, wire format composition and parsing,
//!   name compression, records, and the traits all record data implements.
//! * [rdata] contains the record data types: [`Select`][rdata::Select]
//!   itself and [`Nsec`][rdata::Nsec] which shares the type bitmap with it.
//! * [zonefile] contains a lexer turning zonefile text into the tokens
//!   consumed by the scanning functions.
#![cfg_attr(feature = "logging", doc = "* [logging]:")]
#![cfg_attr(not(feature = "logging"), doc = "* logging:")]
//!   setup of a `tracing` subscriber for applications and tests.
//!
//! # Reference of Feature Flags
//!
//! * `logging`: enables the `logging` module which installs a
//!   [tracing-subscriber](https://github.com/tokio-rs/tracing) based
//!   subscriber configured via the `RUST_LOG` environment variable.
//! * `serde`: adds implementations of `Serialize` and `Deserialize` for
//!   the types of this crate via [serde](https://serde.rs/).

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
#[cfg(any(test, feature = "logging"))]
pub mod logging;
pub mod rdata;
pub mod zonefile;
