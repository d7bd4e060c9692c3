//! 32-byte directory entry layout, attribute bits, and name normalization.
//!
//! Long-filename (VFAT) fragments are recognized by their attribute byte
//! (`0x0F`) and skipped; this crate never creates or decodes them.

use chrono::{Datelike, Local, Timelike};

pub const ATTR_READ_ONLY: u8 = 0x01;
pub const ATTR_HIDDEN: u8 = 0x02;
pub const ATTR_SYSTEM: u8 = 0x04;
pub const ATTR_VOLUME_LABEL: u8 = 0x08;
pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_ARCHIVE: u8 = 0x20;
pub const ATTR_LONG_NAME: u8 = 0x0F;

pub const ENTRY_LEN: usize = 32;
pub const NAME_FREE: u8 = 0x00;
pub const NAME_DELETED: u8 = 0xE5;
pub const NAME_DOT: u8 = 0x2E;

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: [u8; 8],
    pub ext: [u8; 3],
    pub attr: u8,
    pub write_time: u16,
    pub write_date: u16,
    pub first_cluster: u16,
    pub file_size: u32,
    /// Byte offset of this entry within the image, for in-place rewrites.
    pub offset: u64,
}

impl DirEntry {
    pub fn from_bytes(buf: &[u8], offset: u64) -> Self {
        let mut name = [0u8; 8];
        name.copy_from_slice(&buf[0..8]);
        let mut ext = [0u8; 3];
        ext.copy_from_slice(&buf[8..11]);

        DirEntry {
            name,
            ext,
            attr: buf[11],
            write_time: u16::from_le_bytes([buf[22], buf[23]]),
            write_date: u16::from_le_bytes([buf[24], buf[25]]),
            first_cluster: u16::from_le_bytes([buf[26], buf[27]]),
            file_size: u32::from_le_bytes([buf[28], buf[29], buf[30], buf[31]]),
            offset,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.attr & ATTR_DIRECTORY != 0
    }

    pub fn is_volume_label(&self) -> bool {
        self.attr & ATTR_VOLUME_LABEL != 0
    }

    pub fn is_dot_or_dotdot(&self) -> bool {
        self.name[0] == NAME_DOT
    }

    pub fn is_skippable_for_traversal(&self) -> bool {
        self.is_dot_or_dotdot() || self.first_cluster == 0 || self.first_cluster == 1
    }

    /// Normalizes the on-disk 8.3 name for case-insensitive comparison: trim
    /// trailing spaces from both name and extension, lower-case, join with
    /// `.` only when the extension is non-empty.
    pub fn normalized_name(&self) -> String {
        normalize_on_disk(&self.name, &self.ext)
    }

    pub fn last_write_datetime(&self) -> (i32, u32, u32, u32, u32, u32) {
        decode_datetime(self.write_time, self.write_date)
    }
}

fn normalize_on_disk(name: &[u8; 8], ext: &[u8; 3]) -> String {
    let name_part = trim_trailing_spaces(name).to_ascii_lowercase();
    let ext_part = trim_trailing_spaces(ext).to_ascii_lowercase();
    if ext_part.is_empty() {
        name_part
    } else {
        format!("{}.{}", name_part, ext_part)
    }
}

fn trim_trailing_spaces(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).to_string()
}

/// Normalizes an arbitrary user-supplied name the same way, for comparing a
/// `get`/`put` argument against on-disk entries: split at the last `.`, trim
/// trailing spaces from each side, lower-case, rejoin only if there's an
/// extension.
pub fn normalize_input_name(input: &str) -> String {
    let (stem, ext) = match input.rsplit_once('.') {
        Some((s, e)) => (s, e),
        None => (input, ""),
    };
    let stem = stem.trim_end().to_ascii_lowercase();
    let ext = ext.trim_end().to_ascii_lowercase();
    if ext.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, ext)
    }
}

/// Splits a user-supplied base name into uppercase, space-padded 8.3 fields
/// per §4.7.4 step 6. Truncates components that are too long.
pub fn split_to_short_name(base_name: &str) -> ([u8; 8], [u8; 3]) {
    let (stem, ext) = match base_name.rsplit_once('.') {
        Some((s, e)) => (s, e),
        None => (base_name, ""),
    };

    let mut name = [b' '; 8];
    for (i, b) in stem
        .bytes()
        .take(8)
        .map(|b| b.to_ascii_uppercase())
        .enumerate()
    {
        name[i] = b;
    }

    let mut ext_bytes = [b' '; 3];
    for (i, b) in ext
        .bytes()
        .take(3)
        .map(|b| b.to_ascii_uppercase())
        .enumerate()
    {
        ext_bytes[i] = b;
    }

    (name, ext_bytes)
}

pub fn is_reserved_name(name: &[u8; 8]) -> bool {
    name[0] == NAME_FREE || name[0] == NAME_DELETED || name[0] == NAME_DOT
}

/// Same rejection as `is_reserved_name`, applied to a raw user-supplied base
/// name before `split_to_short_name` normalizes it. Normalization pads an
/// empty or dot-led stem into spaces, which would hide the leading byte from
/// the post-normalization check.
pub fn is_reserved_base_name(base_name: &str) -> bool {
    match base_name.as_bytes().first() {
        None => true,
        Some(&b) => b == NAME_FREE || b == NAME_DELETED || b == NAME_DOT,
    }
}

/// Decodes FAT date/time words per §4.7.2: returns
/// `(year, month, day, hour, minute, second)`.
pub fn decode_datetime(time: u16, date: u16) -> (i32, u32, u32, u32, u32, u32) {
    let year = 1980 + ((date >> 9) & 0x7F) as i32;
    let month = ((date >> 5) & 0x0F) as u32;
    let day = (date & 0x1F) as u32;
    let hour = ((time >> 11) & 0x1F) as u32;
    let minute = ((time >> 5) & 0x3F) as u32;
    let second = ((time & 0x1F) * 2) as u32;
    (year, month, day, hour, minute, second)
}

/// Inverse of `decode_datetime`, packing the current local time for a newly
/// written directory entry (§4.7.4 step 8).
pub fn encode_current_time() -> (u16, u16) {
    let now = Local::now();
    let date = (((now.year() - 1980) as u16) << 9)
        | ((now.month() as u16) << 5)
        | (now.day() as u16);
    let time = ((now.hour() as u16) << 11) | ((now.minute() as u16) << 5) | ((now.second() as u16) / 2);
    (time, date)
}

pub fn build_entry_bytes(
    name: &[u8; 8],
    ext: &[u8; 3],
    attr: u8,
    write_time: u16,
    write_date: u16,
    first_cluster: u16,
    file_size: u32,
) -> [u8; ENTRY_LEN] {
    let mut buf = [0u8; ENTRY_LEN];
    buf[0..8].copy_from_slice(name);
    buf[8..11].copy_from_slice(ext);
    buf[11] = attr;
    buf[22..24].copy_from_slice(&write_time.to_le_bytes());
    buf[24..26].copy_from_slice(&write_date.to_le_bytes());
    buf[26..28].copy_from_slice(&first_cluster.to_le_bytes());
    buf[28..32].copy_from_slice(&file_size.to_le_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_spaces_and_case() {
        let name = *b"FOO     ";
        let ext = *b"TXT";
        assert_eq!(normalize_on_disk(&name, &ext), "foo.txt");
    }

    #[test]
    fn normalizes_without_extension() {
        let name = *b"README  ";
        let ext = *b"   ";
        assert_eq!(normalize_on_disk(&name, &ext), "readme");
    }

    #[test]
    fn name_equality_set() {
        let candidates = ["FOO.TXT", "foo.txt", "Foo.Txt", "FOO    .TXT"];
        for c in candidates {
            assert_eq!(normalize_input_name(c), "foo.txt");
        }
    }

    #[test]
    fn rejects_reserved_base_names() {
        assert!(is_reserved_base_name(".foo"));
        assert!(is_reserved_base_name(""));
        assert!(!is_reserved_base_name("foo.txt"));
    }

    #[test]
    fn splits_short_name() {
        let (name, ext) = split_to_short_name("hello.txt");
        assert_eq!(&name, b"HELLO   ");
        assert_eq!(&ext, b"TXT");
    }

    #[test]
    fn decodes_known_datetime() {
        // 2024-03-05 13:37:30 packed per the FAT12 bit layout.
        let date: u16 = (((2024 - 1980) as u16) << 9) | (3 << 5) | 5;
        let time: u16 = (13u16 << 11) | (37u16 << 5) | 15;
        assert_eq!(decode_datetime(time, date), (2024, 3, 5, 13, 37, 30));
    }
}
