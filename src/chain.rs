//! Cluster-chain walking and allocation.

use std::collections::HashSet;

use crate::bpb::Geometry;
use crate::device::Image;
use crate::error::{Error, Result};
use crate::fat::{self, FatValue};

/// Returns the full list of cluster numbers in the chain starting at `start`,
/// in order. Fails on cycles or on a mid-chain value that isn't a valid
/// successor link.
pub fn walk(image: &mut dyn Image, geometry: &Geometry, start: u32) -> Result<Vec<u32>> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    let mut current = start;

    loop {
        if !visited.insert(current) {
            return Err(Error::BadChain {
                reason: "cycle detected",
            });
        }
        out.push(current);

        match fat::classify(fat::get(image, geometry, current)?) {
            FatValue::EndOfChain => break,
            FatValue::Next(next) => {
                if !geometry.cluster_range().contains(&next) {
                    return Err(Error::BadChain {
                        reason: "chain referenced an out-of-range cluster",
                    });
                }
                current = next;
            }
            FatValue::Free => {
                return Err(Error::BadChain {
                    reason: "chain referenced a free cluster",
                })
            }
            FatValue::Reserved | FatValue::ReservedHigh => {
                return Err(Error::BadChain {
                    reason: "chain referenced a reserved cluster",
                })
            }
            FatValue::Bad => {
                return Err(Error::BadChain {
                    reason: "chain referenced a bad cluster",
                })
            }
        }
    }

    Ok(out)
}

/// Writes `data` across a newly allocated chain, zero-padding the unused tail
/// of the last cluster (see DESIGN.md open-question resolution #3). Returns
/// the first cluster number of the chain.
///
/// `data` must be non-empty; callers represent a zero-byte file with no
/// chain at all (starting cluster `0`).
///
/// Write order follows §5: every data block lands on disk first, then the
/// FAT link for each completed cluster, then the final EOC — so a crash
/// mid-call leaves only dangling clusters, never a link into unwritten data.
pub fn write_new_chain(image: &mut dyn Image, geometry: &Geometry, data: &[u8]) -> Result<u32> {
    let cluster_size = geometry.cluster_size as usize;
    let needed = data.len().div_ceil(cluster_size);

    // Phase 1: pick cluster numbers without touching the FAT yet.
    let mut reserved = HashSet::new();
    let mut clusters = Vec::with_capacity(needed);
    for _ in 0..needed {
        let c = allocate_free_excluding(image, geometry, &reserved)?;
        reserved.insert(c);
        clusters.push(c);
    }

    // Phase 2: data blocks.
    for (i, &cluster) in clusters.iter().enumerate() {
        let start = i * cluster_size;
        let end = (start + cluster_size).min(data.len());
        let mut payload = vec![0u8; cluster_size];
        payload[..end - start].copy_from_slice(&data[start..end]);
        image.write_at(geometry.cluster_to_offset(cluster), &payload)?;
    }

    // Phase 3: FAT links, then the final EOC.
    for pair in clusters.windows(2) {
        fat::put(image, geometry, pair[0], pair[1] as u16)?;
    }
    fat::put(image, geometry, *clusters.last().unwrap(), fat::EOC)?;

    Ok(clusters[0])
}

fn allocate_free_excluding(
    image: &mut dyn Image,
    geometry: &Geometry,
    reserved: &HashSet<u32>,
) -> Result<u32> {
    for c in geometry.cluster_range() {
        if reserved.contains(&c) {
            continue;
        }
        if fat::classify(fat::get(image, geometry, c)?) == FatValue::Free {
            return Ok(c);
        }
    }
    Err(Error::NoFreeCluster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bpb::{BootSector, Geometry};
    use crate::device::testutil::MemImage;
    use crate::testutil::{build_image_bytes, set_fat12};

    fn geometry_with_image() -> (MemImage, Geometry) {
        let bytes = build_image_bytes(512, 1, 1, 2, 224, 9, 2880, &[]);
        let bs = BootSector::from_bytes(&bytes).unwrap();
        let geom = Geometry::from_boot_sector(&bs).unwrap();
        (MemImage::new(bytes), geom)
    }

    #[test]
    fn walks_simple_chain() {
        let (mut img, geom) = geometry_with_image();
        {
            let bytes = &mut img.data.get_mut();
            set_fat12(bytes, &geom, 2, 3);
            set_fat12(bytes, &geom, 3, fat::EOC);
        }
        let chain = walk(&mut img, &geom, 2).unwrap();
        assert_eq!(chain, vec![2, 3]);
    }

    #[test]
    fn detects_cycle() {
        let (mut img, geom) = geometry_with_image();
        {
            let bytes = &mut img.data.get_mut();
            set_fat12(bytes, &geom, 2, 3);
            set_fat12(bytes, &geom, 3, 2);
        }
        assert!(walk(&mut img, &geom, 2).is_err());
    }

    #[test]
    fn rejects_out_of_range_successor() {
        let (mut img, geom) = geometry_with_image();
        {
            let bytes = &mut img.data.get_mut();
            // total_clusters+1 is the last valid cluster; point past it.
            set_fat12(bytes, &geom, 2, (geom.total_clusters + 2) as u16);
        }
        assert!(walk(&mut img, &geom, 2).is_err());
    }

    #[test]
    fn write_new_chain_spans_two_clusters() {
        let (mut img, geom) = geometry_with_image();
        let data = vec![0xAB; geom.cluster_size as usize + 10];
        let start = write_new_chain(&mut img, &geom, &data).unwrap();
        let chain = walk(&mut img, &geom, start).unwrap();
        assert_eq!(chain.len(), 2);
    }
}
