//! `list` driver: breadth-first directory listing. Grounded on
//! `examples/original_source/disklist.c` (BFS queue, last-write field choice).

use std::collections::{HashSet, VecDeque};

use crate::dir::{self, DirLocation};
use crate::entry::DirEntry;
use crate::error::Result;

#[derive(Debug)]
pub struct ListLine {
    pub is_dir: bool,
    pub size: Option<u32>,
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

#[derive(Debug)]
pub struct DirListing {
    pub path: String,
    pub lines: Vec<ListLine>,
}

pub fn run(volume: &mut crate::volume::Volume) -> Result<Vec<DirListing>> {
    let geometry = volume.geometry;
    let mut out = Vec::new();
    let mut queue: VecDeque<(String, DirLocation)> = VecDeque::new();
    queue.push_back(("/".to_string(), DirLocation::Root));
    // Root isn't a cluster, so only chain-mode directories need tracking;
    // a malformed image's directory entry can point back at an ancestor.
    let mut visited: HashSet<u32> = HashSet::new();

    while let Some((path, location)) = queue.pop_front() {
        let entries = dir::scan_live(volume.image.as_mut(), &geometry, location)?;
        let mut lines = Vec::new();

        for entry in &entries {
            if entry.is_volume_label() || entry.is_skippable_for_traversal() {
                continue;
            }
            lines.push(to_line(entry));

            if entry.is_directory() {
                let cluster = entry.first_cluster as u32;
                if !visited.insert(cluster) {
                    continue;
                }
                let child_path = if path == "/" {
                    format!("/{}", entry.normalized_name())
                } else {
                    format!("{}/{}", path, entry.normalized_name())
                };
                queue.push_back((child_path, DirLocation::Chain(cluster)));
            }
        }

        out.push(DirListing { path, lines });
    }

    Ok(out)
}

fn to_line(entry: &DirEntry) -> ListLine {
    let (year, month, day, hour, minute, second) = entry.last_write_datetime();
    ListLine {
        is_dir: entry.is_directory(),
        size: if entry.is_directory() {
            None
        } else {
            Some(entry.file_size)
        },
        name: entry.normalized_name(),
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}
