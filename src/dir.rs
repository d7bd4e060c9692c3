//! Directory iteration over the root region or a cluster chain.
//!
//! The root directory is a fixed, non-chained sector range; subdirectories
//! are ordinary cluster chains. `DirLocation` folds both into one type so
//! callers never branch on "is this the root" themselves (§9).

use crate::bpb::Geometry;
use crate::chain;
use crate::device::Image;
use crate::entry::{DirEntry, ATTR_LONG_NAME, ENTRY_LEN, NAME_DELETED, NAME_FREE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirLocation {
    Root,
    Chain(u32),
}

#[derive(Debug, Clone)]
pub enum DirSlot {
    Terminator,
    Deleted,
    LongName,
    Live(DirEntry),
}

fn slot_offsets(image: &mut dyn Image, geometry: &Geometry, location: DirLocation) -> Result<Vec<u64>> {
    match location {
        DirLocation::Root => {
            let base = geometry.root_dir_offset();
            Ok((0..geometry.rde as u64)
                .map(|i| base + i * ENTRY_LEN as u64)
                .collect())
        }
        DirLocation::Chain(start) => {
            let clusters = chain::walk(image, geometry, start)?;
            let per_cluster = geometry.cluster_size as u64 / ENTRY_LEN as u64;
            let mut offsets = Vec::new();
            for cluster in clusters {
                let base = geometry.cluster_to_offset(cluster);
                for i in 0..per_cluster {
                    offsets.push(base + i * ENTRY_LEN as u64);
                }
            }
            Ok(offsets)
        }
    }
}

fn classify_slot(buf: &[u8], offset: u64) -> DirSlot {
    if buf[0] == NAME_FREE {
        DirSlot::Terminator
    } else if buf[0] == NAME_DELETED {
        DirSlot::Deleted
    } else if buf[11] == ATTR_LONG_NAME {
        DirSlot::LongName
    } else {
        DirSlot::Live(DirEntry::from_bytes(buf, offset))
    }
}

/// Returns every `Live` entry in the directory, in on-disk order, stopping at
/// the first `Terminator` slot.
pub fn scan_live(
    image: &mut dyn Image,
    geometry: &Geometry,
    location: DirLocation,
) -> Result<Vec<DirEntry>> {
    let offsets = slot_offsets(image, geometry, location)?;
    let mut out = Vec::new();
    for offset in offsets {
        let buf = image.read_at(offset, ENTRY_LEN)?;
        match classify_slot(&buf, offset) {
            DirSlot::Terminator => break,
            DirSlot::Deleted | DirSlot::LongName => continue,
            DirSlot::Live(entry) => out.push(entry),
        }
    }
    Ok(out)
}

/// Returns the byte offset of the first `Terminator` or `Deleted` slot, i.e.
/// a spot that may be overwritten with a new directory entry.
pub fn find_slot_for_write(
    image: &mut dyn Image,
    geometry: &Geometry,
    location: DirLocation,
) -> Result<u64> {
    let offsets = slot_offsets(image, geometry, location)?;
    for offset in offsets {
        let buf = image.read_at(offset, ENTRY_LEN)?;
        match classify_slot(&buf, offset) {
            DirSlot::Terminator | DirSlot::Deleted => return Ok(offset),
            DirSlot::LongName | DirSlot::Live(_) => continue,
        }
    }
    Err(Error::DirFull)
}
