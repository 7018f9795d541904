//! Domain name compression.
//!
//! A [`Compressor`] wraps a compose target and remembers where the suffixes
//! of names composed through [`Composer::append_compressed_name`] were
//! placed. Later names that share a known suffix are then written with a
//! compression pointer to it.
//!
//! Positions are relative to the start of the target, so the target should
//! start with the DNS message. Pointers can only reach the first 16 KiB of
//! a message. Names beyond that are written in full and not remembered.

use super::name::Name;
use super::wire::{Compose, Composer};
use octseq::builder::{OctetsBuilder, Truncate};
use std::collections::HashMap;
use tracing::trace;

//------------ Compressor ----------------------------------------------------

/// A compose target that compresses domain names.
///
/// The compressor keeps a table of name suffixes, compared ignoring ASCII
/// case, and their positions in the target.
#[derive(Clone, Debug, Default)]
pub struct Compressor<Target> {
    /// The underlying octets builder.
    target: Target,

    /// Lowercase suffixes in wire format and their positions.
    map: HashMap<Vec<u8>, u16>,
}

impl<Target> Compressor<Target> {
    /// Creates a new compressor from an underlying octets builder.
    pub fn new(target: Target) -> Self {
        Compressor {
            target,
            map: HashMap::new(),
        }
    }

    /// Returns a reference to the underlying octets builder.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the compressor into the underlying octets builder.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns an octets slice of the data.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }

    /// Returns the number of suffixes in the compression table.
    pub fn table_len(&self) -> usize {
        self.map.len()
    }

    fn get(&self, suffix: &[u8]) -> Option<u16> {
        self.map.get(&suffix.to_ascii_lowercase()).copied()
    }

    fn insert(&mut self, suffix: &[u8], pos: u16) {
        self.map.entry(suffix.to_ascii_lowercase()).or_insert(pos);
    }
}

//--- AsRef, AsMut, and OctetsBuilder

impl<Target: AsRef<[u8]>> AsRef<[u8]> for Compressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for Compressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

impl<Target: OctetsBuilder> OctetsBuilder for Compressor<Target> {
    type AppendError = Target::AppendError;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.target.append_slice(slice)
    }
}

//--- Composer

impl<Target: Composer> Composer for Compressor<Target> {
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        for suffix in name.iter_suffixes() {
            // If we already know this suffix, point to it.
            if let Some(pos) = self.get(suffix) {
                return (pos | 0xC000).compose(self);
            }

            // Positions beyond the pointer range can’t be remembered, so
            // write out what’s left.
            let pos = match u16::try_from(self.target.as_ref().len()) {
                Ok(pos) if pos < 0x4000 => pos,
                _ => {
                    trace!(
                        name = %name.fmt_with_dot(),
                        "target exceeds compression range, name not \
                         remembered"
                    );
                    return self.target.append_slice(suffix);
                }
            };

            // Suffixes start with a non-zero length octet.
            let label = &suffix[..usize::from(suffix[0]) + 1];
            self.target.append_slice(label)?;
            self.insert(suffix, pos);
        }
        0u8.compose(self)
    }

    fn compressed_name_len(&self, name: &Name) -> usize {
        let mut len = 0;
        for suffix in name.iter_suffixes() {
            if self.get(suffix).is_some() {
                return len + 2;
            }
            len += usize::from(suffix[0]) + 1;
        }
        len + 1
    }

    fn can_compress(&self) -> bool {
        true
    }
}

//--- Truncate

impl<Target: Composer> Truncate for Compressor<Target> {
    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        self.map.retain(|_, pos| usize::from(*pos) < len);
    }
}

//============ Testing =======================================================
