//! FAT12 volume engine: boot-sector decoding, the packed 12-bit FAT codec,
//! cluster-chain walking/allocation, directory iteration over the
//! root/chain duality, path resolution, and the four operation drivers
//! (`info`, `list`, `get`, `put`) that sit on top of them.
//!
//! This crate treats the backing image purely as a byte-addressable
//! container: no kernel driver, mount, or multi-process coordination is
//! involved (see `DESIGN.md`).

pub mod bpb;
pub mod chain;
pub mod device;
pub mod dir;
pub mod entry;
pub mod error;
pub mod fat;
pub mod ops;
pub mod path;
pub mod volume;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
