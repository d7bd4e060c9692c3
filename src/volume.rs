//! Per-invocation volume handle: an opened image plus its decoded geometry.
//!
//! Nothing here outlives one driver call; there is no persistent cache or
//! shared global state (see DESIGN.md on the `spin`/`lazy_static`/`lru` drop).

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::bpb::{BootSector, Geometry};
use crate::device::{FileImage, Image};
use crate::error::{Error, Result};

pub struct Volume {
    pub image: Box<dyn Image>,
    pub boot_sector: BootSector,
    pub geometry: Geometry,
}

impl Volume {
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io("open", e))?;
        Self::from_file(file)
    }

    pub fn open_read_write(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::io("open", e))?;
        Self::from_file(file)
    }

    fn from_file(file: File) -> Result<Self> {
        let mut image: Box<dyn Image> = Box::new(FileImage::new(file));
        let boot_bytes = image.read_at(0, 512)?;
        let boot_sector = BootSector::from_bytes(&boot_bytes)?;
        let geometry = Geometry::from_boot_sector(&boot_sector)?;
        log::debug!(
            "decoded geometry: bps={} spc={} total_clusters={}",
            geometry.bps,
            geometry.spc,
            geometry.total_clusters
        );
        Ok(Volume {
            image,
            boot_sector,
            geometry,
        })
    }
}
