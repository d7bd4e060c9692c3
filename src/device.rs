//! Positioned byte I/O against the backing image file.
//!
//! No FAT semantics live here: callers seek-and-read or seek-and-write
//! arbitrary byte ranges. Every call is self-contained; no sequential state
//! is assumed between calls.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{Error, Result};

pub trait Image {
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>>;
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;
    fn len(&mut self) -> Result<u64>;
}

/// Bridges a host `File` to the `Image` contract.
pub struct FileImage {
    file: File,
}

impl FileImage {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl Image for FileImage {
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::io("seek", e))?;
        let mut buf = vec![0u8; len];
        self.file
            .read_exact(&mut buf)
            .map_err(|e| Error::io("read", e))?;
        Ok(buf)
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::io("seek", e))?;
        self.file
            .write_all(bytes)
            .map_err(|e| Error::io("write", e))?;
        Ok(())
    }

    fn len(&mut self) -> Result<u64> {
        self.file
            .seek(SeekFrom::End(0))
            .map_err(|e| Error::io("seek", e))
    }
}
