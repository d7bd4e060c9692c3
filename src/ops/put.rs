//! `put` driver: insert a host file into a target directory. Grounded on
//! `examples/original_source/diskput.c` (the live implementation), corrected
//! per DESIGN.md (FAT mirroring, uppercase normalization, proper time
//! encoding, and the authoritative free-space bound instead of the source's
//! looser one).

use std::fs;
use std::path::Path;

use crate::chain;
use crate::dir::{self, DirLocation};
use crate::entry::{self, is_reserved_base_name, ENTRY_LEN};
use crate::error::{Error, NotFoundKind, Result};
use crate::fat;
use crate::path;

/// `target` is the raw `[DIR/]NAME` CLI argument; `host_source` is the host
/// file to read (the CLI binary resolves this to `./NAME` relative to its
/// own working directory — see `src/bin/put.rs`).
pub fn run(volume: &mut crate::volume::Volume, target: &str, host_source: &Path) -> Result<()> {
    let (dir_path, base_name) = match target.rsplit_once('/') {
        Some((prefix, suffix)) => (prefix, suffix),
        None => ("", target),
    };

    if is_reserved_base_name(base_name) {
        return Err(Error::NotFound {
            what: NotFoundKind::File,
        });
    }

    let geometry = volume.geometry;

    let dir_cluster =
        path::resolve(volume.image.as_mut(), &geometry, dir_path).map_err(|_| Error::NotFound {
            what: NotFoundKind::Directory,
        })?;
    let location = if dir_cluster == 0 {
        DirLocation::Root
    } else {
        DirLocation::Chain(dir_cluster)
    };

    let data = fs::read(host_source).map_err(|_| Error::HostFileNotFound {
        path: host_source.to_path_buf(),
    })?;
    let size = data.len() as u32;

    let needed = (data.len() as u32).div_ceil(geometry.cluster_size);
    let available = fat::count_free(volume.image.as_mut(), &geometry)?;
    if needed > available {
        return Err(Error::NotEnoughSpace { needed, available });
    }

    let write_offset = dir::find_slot_for_write(volume.image.as_mut(), &geometry, location)?;

    let (name, ext) = entry::split_to_short_name(base_name);

    let first_cluster = if data.is_empty() {
        0
    } else {
        chain::write_new_chain(volume.image.as_mut(), &geometry, &data)? as u16
    };

    let (write_time, write_date) = entry::encode_current_time();
    let entry_bytes = entry::build_entry_bytes(
        &name,
        &ext,
        crate::entry::ATTR_ARCHIVE,
        write_time,
        write_date,
        first_cluster,
        size,
    );
    debug_assert_eq!(entry_bytes.len(), ENTRY_LEN);
    volume.image.write_at(write_offset, &entry_bytes)?;

    Ok(())
}
