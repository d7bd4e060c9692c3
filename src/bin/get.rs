//! `get IMAGE NAME` — extracts a root-directory file to `./NAME` on the host.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, Command};
use fat12_toolkit::error::Error;
use fat12_toolkit::ops::get;
use fat12_toolkit::volume::Volume;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("get")
        .about("Extract a file from a FAT12 disk image's root directory")
        .arg(Arg::new("image").required(true).help("Path to the disk image"))
        .arg(Arg::new("name").required(true).help("Name of the file to extract"))
        .get_matches();

    let image_path = PathBuf::from(matches.get_one::<String>("image").unwrap());
    let name = matches.get_one::<String>("name").unwrap();
    let output_path = PathBuf::from(name);

    let mut volume = match Volume::open_read_only(&image_path) {
        Ok(v) => v,
        Err(e) => {
            log::error!("failed to open {}: {}", image_path.display(), e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match get::run(&mut volume, name, &output_path) {
        Ok(()) => {
            println!("File copied successfully.");
            ExitCode::SUCCESS
        }
        Err(Error::NotFound { .. }) => {
            println!("File not found.");
            ExitCode::FAILURE
        }
        Err(Error::ShortFile) => {
            log::warn!("chain for {} ended before file_size bytes were read", name);
            eprintln!("Chain ended before the recorded file size; wrote a short file.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("get failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
