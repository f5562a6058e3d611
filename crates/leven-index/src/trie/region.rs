//! Growable anonymous memory map addressed by byte offsets.
//!
//! The region hands out offsets, never references into the map. Growth creates a larger
//! mapping, copies the used prefix and drops the old one, so any borrowed slice would dangle
//! while every offset stays valid.

use std::ops::Range;

use memmap2::MmapMut;
use tracing::debug;

use crate::IndexError;

/// Size of the first mapping in bytes.
pub const MIN_CAPACITY: usize = 1024;

/// Marker written at offset 0.
const MAGIC: [u8; 4] = *b"LVTR";

/// Layout version written after the marker.
const VERSION: u32 = 1;

/// Bytes reserved at the start of the region. Offset 0 is therefore never a record.
pub const HEADER_SIZE: usize = 8;

/// An append-only byte region backed by an anonymous memory map.
#[derive(Debug)]
pub struct Region {
    /// The current mapping.
    map: MmapMut,
    /// First unused byte. Always strictly less than the mapping length.
    free: usize,
}

impl Region {
    /// Maps a region of [`MIN_CAPACITY`] bytes and writes the header.
    pub fn new() -> Result<Self, IndexError> {
        let map = map_anon(MIN_CAPACITY)?;
        let mut region = Self { map, free: 0 };
        let mut header = [0u8; HEADER_SIZE];
        header[..4].copy_from_slice(&MAGIC);
        header[4..].copy_from_slice(&VERSION.to_le_bytes());
        region.append(&header)?;
        Ok(region)
    }

    /// Total mapped bytes.
    pub fn capacity(&self) -> usize {
        self.map.len()
    }

    /// Bytes in use, header included.
    pub fn used(&self) -> usize {
        self.free
    }

    /// Copies `bytes` to the end of the region and returns their offset.
    ///
    /// Grows the mapping first when the append would reach its end.
    pub fn append(&mut self, bytes: &[u8]) -> Result<u32, IndexError> {
        // Every byte of the record must stay addressable by a u32 offset.
        let end = self.free + bytes.len();
        let offset = u32::try_from(self.free)
            .ok()
            .filter(|_| u32::try_from(end).is_ok())
            .ok_or_else(|| IndexError::corrupted("trie region exceeds 4 GiB of offsets"))?;
        while end >= self.map.len() {
            self.grow()?;
        }
        self.map[self.free..self.free + bytes.len()].copy_from_slice(bytes);
        self.free += bytes.len();
        Ok(offset)
    }

    /// Doubles the mapping, keeping all used bytes at the same offsets.
    fn grow(&mut self) -> Result<(), IndexError> {
        let new_size = self
            .map
            .len()
            .checked_mul(2)
            .unwrap_or(usize::MAX)
            .max(MIN_CAPACITY);
        let mut grown = map_anon(new_size)?;
        grown[..self.free].copy_from_slice(&self.map[..self.free]);
        self.map = grown;
        debug!(capacity = new_size, used = self.free, "Grew trie region");
        Ok(())
    }

    /// Reads a little-endian `u32` at `offset`.
    pub fn read_u32(&self, offset: usize) -> Result<u32, IndexError> {
        let bytes = self.slot(offset)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.map[bytes]);
        Ok(u32::from_le_bytes(buf))
    }

    /// Overwrites the little-endian `u32` at `offset`.
    pub fn write_u32(&mut self, offset: usize, value: u32) -> Result<(), IndexError> {
        let bytes = self.slot(offset)?;
        self.map[bytes].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Byte range of the `u32` at `offset`, checked against the used part of the region.
    fn slot(&self, offset: usize) -> Result<Range<usize>, IndexError> {
        match offset.checked_add(4) {
            Some(end) if offset >= HEADER_SIZE && end <= self.free => Ok(offset..end),
            _ => Err(IndexError::corrupted(format!(
                "offset {offset} outside used region of {} bytes",
                self.free
            ))),
        }
    }
}

/// Creates an anonymous read-write mapping.
fn map_anon(len: usize) -> Result<MmapMut, IndexError> {
    MmapMut::map_anon(len).map_err(|source| IndexError::Grow {
        requested: len,
        source,
    })
}
