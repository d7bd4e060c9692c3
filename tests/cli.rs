//! End-to-end coverage of the CLI contract (§6) and the concrete scenarios
//! of §8 (S1-S6), driving the compiled `info`/`list`/`get`/`put` binaries.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Builds a fresh, empty 1.44 MB floppy FAT12 image:
/// `bps=512 spc=1 rsvd=1 nfats=2 rde=224 fatsz=9 total_sectors=2880`.
fn build_floppy_image(path: &Path) {
    let bps: u16 = 512;
    let spc: u8 = 1;
    let rsvd: u16 = 1;
    let nfats: u8 = 2;
    let rde: u16 = 224;
    let fatsz: u16 = 9;
    let total_sectors: u16 = 2880;

    let total_len = total_sectors as usize * bps as usize;
    let mut data = vec![0u8; total_len];

    data[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    data[3..11].copy_from_slice(b"MKFATFS ");
    data[11..13].copy_from_slice(&bps.to_le_bytes());
    data[13] = spc;
    data[14..16].copy_from_slice(&rsvd.to_le_bytes());
    data[16] = nfats;
    data[17..19].copy_from_slice(&rde.to_le_bytes());
    data[19..21].copy_from_slice(&total_sectors.to_le_bytes());
    data[21] = 0xF0;
    data[22..24].copy_from_slice(&fatsz.to_le_bytes());
    data[32..36].copy_from_slice(&0u32.to_le_bytes());
    data[38] = 0x29;
    data[43..54].copy_from_slice(b"NO NAME    ");
    data[54..62].copy_from_slice(b"FAT12   ");

    for copy in 0..nfats as u32 {
        let fat_off = (rsvd as u32 + copy * fatsz as u32) as usize * bps as usize;
        data[fat_off] = 0xF0;
        data[fat_off + 1] = 0xFF;
        data[fat_off + 2] = 0xFF;
    }

    fs::write(path, data).unwrap();
}

#[test]
fn s1_info_reports_floppy_total_size() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("floppy.img");
    build_floppy_image(&image_path);

    Command::cargo_bin("info")
        .unwrap()
        .arg(&image_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total size of the disk: 1474560 bytes"))
        .stdout(predicate::str::contains("Number of FAT copies: 2"))
        .stdout(predicate::str::contains("Sectors per FAT: 9"))
        .stdout(predicate::str::contains("The number of files in the disk: 0"));
}

#[test]
fn s2_put_then_get_round_trips_small_file() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("floppy.img");
    build_floppy_image(&image_path);

    let host_source = dir.path().join("hello.txt");
    fs::write(&host_source, b"hello\n").unwrap();

    Command::cargo_bin("put")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("hello.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("File copied successfully."));

    let extract_dir = tempdir().unwrap();
    Command::cargo_bin("get")
        .unwrap()
        .current_dir(extract_dir.path())
        .arg(&image_path)
        .arg("hello.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("File copied successfully."));

    let extracted = fs::read(extract_dir.path().join("hello.txt")).unwrap();
    assert_eq!(extracted, b"hello\n");
}

#[test]
fn s3_put_large_file_spans_two_clusters() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("floppy.img");
    build_floppy_image(&image_path);

    let host_source = dir.path().join("large.bin");
    fs::write(&host_source, vec![0xAB; 1024]).unwrap();

    Command::cargo_bin("put")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("large.bin")
        .assert()
        .success();

    Command::cargo_bin("list")
        .unwrap()
        .arg(&image_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("LARGE.BIN").or(predicate::str::contains("large.bin")));
}

#[test]
fn s4_put_into_missing_directory_leaves_image_unchanged() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("floppy.img");
    build_floppy_image(&image_path);
    let before = fs::read(&image_path).unwrap();

    let host_source = dir.path().join("file.bin");
    fs::write(&host_source, b"x").unwrap();

    Command::cargo_bin("put")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("sub/missing/file.bin")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("The directory not found."));

    let after = fs::read(&image_path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn s5_get_missing_name_reports_not_found() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("floppy.img");
    build_floppy_image(&image_path);

    Command::cargo_bin("get")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("NOSUCH.TXT")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("File not found."));
}

#[test]
fn s6_second_put_into_full_directory_fails_but_first_file_survives() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("tiny_root.img");

    // A root directory with exactly one entry's worth of room: rde = 1.
    let bps: u16 = 512;
    let spc: u8 = 1;
    let rsvd: u16 = 1;
    let nfats: u8 = 2;
    let rde: u16 = 1;
    let fatsz: u16 = 9;
    let total_sectors: u16 = 2880;
    let total_len = total_sectors as usize * bps as usize;
    let mut data = vec![0u8; total_len];
    data[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    data[3..11].copy_from_slice(b"MKFATFS ");
    data[11..13].copy_from_slice(&bps.to_le_bytes());
    data[13] = spc;
    data[14..16].copy_from_slice(&rsvd.to_le_bytes());
    data[16] = nfats;
    data[17..19].copy_from_slice(&rde.to_le_bytes());
    data[19..21].copy_from_slice(&total_sectors.to_le_bytes());
    data[21] = 0xF0;
    data[22..24].copy_from_slice(&fatsz.to_le_bytes());
    data[38] = 0x29;
    data[43..54].copy_from_slice(b"NO NAME    ");
    data[54..62].copy_from_slice(b"FAT12   ");
    for copy in 0..nfats as u32 {
        let fat_off = (rsvd as u32 + copy * fatsz as u32) as usize * bps as usize;
        data[fat_off] = 0xF0;
        data[fat_off + 1] = 0xFF;
        data[fat_off + 2] = 0xFF;
    }
    fs::write(&image_path, data).unwrap();

    fs::write(dir.path().join("first.bin"), b"abc").unwrap();
    fs::write(dir.path().join("second.bin"), b"xyz").unwrap();

    Command::cargo_bin("put")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("first.bin")
        .assert()
        .success();

    Command::cargo_bin("put")
        .unwrap()
        .current_dir(dir.path())
        .arg(&image_path)
        .arg("second.bin")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Directory is full."));

    let extract_dir = tempdir().unwrap();
    Command::cargo_bin("get")
        .unwrap()
        .current_dir(extract_dir.path())
        .arg(&image_path)
        .arg("first.bin")
        .assert()
        .success();
    assert_eq!(
        fs::read(extract_dir.path().join("first.bin")).unwrap(),
        b"abc"
    );
}
