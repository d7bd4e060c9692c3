//! Resolves a `/`-separated path to a directory cluster (0 = root).

use crate::bpb::Geometry;
use crate::device::Image;
use crate::dir::{self, DirLocation};
use crate::entry::normalize_input_name;
use crate::error::{Error, NotFoundKind, Result};

/// `""` and `"/"` both resolve to the root (cluster `0`). Each path component
/// must match a live, `Directory`-attributed entry.
pub fn resolve(image: &mut dyn Image, geometry: &Geometry, path: &str) -> Result<u32> {
    let mut current = 0u32;

    for component in path.split('/').filter(|c| !c.is_empty()) {
        let location = if current == 0 {
            DirLocation::Root
        } else {
            DirLocation::Chain(current)
        };
        let entries = dir::scan_live(image, geometry, location)?;
        let wanted = normalize_input_name(component);

        let found = entries
            .iter()
            .find(|e| e.is_directory() && e.normalized_name() == wanted);

        match found {
            Some(entry) => current = entry.first_cluster as u32,
            None => {
                return Err(Error::NotFound {
                    what: NotFoundKind::Directory,
                })
            }
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bpb::BootSector;
    use crate::device::testutil::MemImage;
    use crate::testutil::{build_image_bytes, RawDirEntry};

    #[test]
    fn resolves_root_for_empty_and_slash() {
        let bytes = build_image_bytes(512, 1, 1, 2, 16, 9, 2880, &[]);
        let bs = BootSector::from_bytes(&bytes).unwrap();
        let geom = Geometry::from_boot_sector(&bs).unwrap();
        let mut img = MemImage::new(bytes);
        assert_eq!(resolve(&mut img, &geom, "").unwrap(), 0);
        assert_eq!(resolve(&mut img, &geom, "/").unwrap(), 0);
    }

    #[test]
    fn resolves_one_level_subdirectory() {
        let entries = vec![RawDirEntry::dir("SUB", 2)];
        let bytes = build_image_bytes(512, 1, 1, 2, 16, 9, 2880, &entries);
        let bs = BootSector::from_bytes(&bytes).unwrap();
        let geom = Geometry::from_boot_sector(&bs).unwrap();
        let mut img = MemImage::new(bytes);
        assert_eq!(resolve(&mut img, &geom, "sub").unwrap(), 2);
    }

    #[test]
    fn missing_component_is_not_found() {
        let bytes = build_image_bytes(512, 1, 1, 2, 16, 9, 2880, &[]);
        let bs = BootSector::from_bytes(&bytes).unwrap();
        let geom = Geometry::from_boot_sector(&bs).unwrap();
        let mut img = MemImage::new(bytes);
        assert!(resolve(&mut img, &geom, "missing").is_err());
    }
}
