//! `info IMAGE` — prints a summary of a FAT12 volume.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, Command};
use fat12_toolkit::ops::info;
use fat12_toolkit::volume::Volume;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("info")
        .about("Summarize a FAT12 disk image")
        .arg(Arg::new("image").required(true).help("Path to the disk image"))
        .get_matches();

    let image_path = PathBuf::from(matches.get_one::<String>("image").unwrap());

    let mut volume = match Volume::open_read_only(&image_path) {
        Ok(v) => v,
        Err(e) => {
            log::error!("failed to open {}: {}", image_path.display(), e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match info::run(&mut volume) {
        Ok(report) => {
            println!("OS Name: {}", report.oem_name);
            println!("Label of the disk: {}", report.label);
            println!("Total size of the disk: {} bytes", report.total_size);
            println!("Free size of the disk: {} bytes", report.free_size);
            println!("=============");
            println!("The number of files in the disk: {}", report.file_count);
            println!("Number of FAT copies: {}", report.num_fats);
            println!("Sectors per FAT: {}", report.sectors_per_fat);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("info failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
