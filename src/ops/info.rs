//! `info` driver: volume summary. Grounded on
//! `examples/original_source/diskinfo.c` (`count_files_recursive`,
//! `get_volume_label`).

use std::collections::HashSet;

use crate::bpb;
use crate::device::Image;
use crate::dir::{self, DirLocation};
use crate::error::Result;
use crate::fat;

#[derive(Debug)]
pub struct InfoReport {
    pub oem_name: String,
    pub label: String,
    pub total_size: u64,
    pub free_size: u64,
    pub file_count: u32,
    pub num_fats: u32,
    pub sectors_per_fat: u32,
}

pub fn run(volume: &mut crate::volume::Volume) -> Result<InfoReport> {
    let geometry = volume.geometry;
    let label = bpb::resolve_volume_label(volume.image.as_mut(), &volume.boot_sector, &geometry)?;

    let free_clusters = fat::count_free(volume.image.as_mut(), &geometry)?;
    let free_size = free_clusters as u64 * geometry.cluster_size as u64;

    let mut file_count = 0u32;
    let mut visited = HashSet::new();
    count_files_recursive(
        volume.image.as_mut(),
        &geometry,
        DirLocation::Root,
        &mut file_count,
        &mut visited,
    )?;

    Ok(InfoReport {
        oem_name: volume.boot_sector.oem_name_str(),
        label,
        total_size: geometry.total_size_bytes(),
        free_size,
        file_count,
        num_fats: geometry.nfats,
        sectors_per_fat: geometry.fatsz,
    })
}

fn count_files_recursive(
    image: &mut dyn Image,
    geometry: &bpb::Geometry,
    location: DirLocation,
    count: &mut u32,
    visited: &mut HashSet<u32>,
) -> Result<()> {
    let entries = dir::scan_live(image, geometry, location)?;
    for entry in entries {
        if entry.is_volume_label() || entry.is_dot_or_dotdot() {
            continue;
        }
        if entry.is_directory() {
            if entry.first_cluster == 0 || entry.first_cluster == 1 {
                continue;
            }
            let cluster = entry.first_cluster as u32;
            if !visited.insert(cluster) {
                continue;
            }
            count_files_recursive(image, geometry, DirLocation::Chain(cluster), count, visited)?;
        } else if entry.first_cluster != 0 && entry.first_cluster != 1 {
            *count += 1;
        }
    }
    Ok(())
}
