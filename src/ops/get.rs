//! `get` driver: extract a root-directory file to the host. Grounded on
//! `examples/original_source/diskget.c` (the live implementation, not the
//! commented-out draft preceding it).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::dir::{self, DirLocation};
use crate::entry::normalize_input_name;
use crate::error::{Error, NotFoundKind, Result};
use crate::fat::{self, FatValue};

pub fn run(volume: &mut crate::volume::Volume, name: &str, output_path: &Path) -> Result<()> {
    let geometry = volume.geometry;
    let wanted = normalize_input_name(name);

    let entries = dir::scan_live(volume.image.as_mut(), &geometry, DirLocation::Root)?;
    let entry = entries
        .into_iter()
        .find(|e| !e.is_directory() && e.normalized_name() == wanted)
        .ok_or(Error::NotFound {
            what: NotFoundKind::File,
        })?;

    let mut output = File::create(output_path).map_err(|e| Error::io("create", e))?;

    let mut bytes_remaining = entry.file_size as u64;
    let mut current = entry.first_cluster as u32;

    while bytes_remaining > 0 {
        let to_read = (geometry.cluster_size as u64).min(bytes_remaining);
        let buf = volume
            .image
            .read_at(geometry.cluster_to_offset(current), to_read as usize)?;
        output.write_all(&buf).map_err(|e| Error::io("write", e))?;
        bytes_remaining -= to_read;

        if bytes_remaining == 0 {
            break;
        }

        match fat::classify(fat::get(volume.image.as_mut(), &geometry, current)?) {
            FatValue::Next(next) => current = next,
            FatValue::EndOfChain => return Err(Error::ShortFile),
            _ => {
                return Err(Error::BadChain {
                    reason: "chain referenced a non-link value before file_size bytes were read",
                })
            }
        }
    }

    Ok(())
}
