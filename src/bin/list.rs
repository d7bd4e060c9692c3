//! `list IMAGE` — breadth-first listing of every directory in the volume.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, Command};
use fat12_toolkit::ops::list;
use fat12_toolkit::volume::Volume;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("list")
        .about("Recursively list a FAT12 disk image's directory tree")
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

    match list::run(&mut volume) {
        Ok(listings) => {
            for listing in listings {
                println!("\n{}\n===================", listing.path);
                for line in listing.lines {
                    if line.is_dir {
                        print!("D {:>10} {:<20} ", "", line.name);
                    } else {
                        print!("F {:>10} {:<20} ", line.size.unwrap_or(0), line.name);
                    }
                    println!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        line.year, line.month, line.day, line.hour, line.minute, line.second
                    );
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("list failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
