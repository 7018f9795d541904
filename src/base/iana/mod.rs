//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for this crate. Both are newtypes around their integer
//! value with associated constants for the well-known values.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` convert from the mnemonics to the
//! values and back. Values without a mnemonic use a generic prefix form,
//! e.g., `TYPE65534`.
//!
//! Types also implement `parse()` and `compose()` functions for the wire
//! format.

pub use self::class::Class;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;
