//! `put IMAGE [DIR/]NAME` — copies host `./NAME` into `DIR` of the image.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, Command};
use fat12_toolkit::error::{Error, NotFoundKind};
use fat12_toolkit::ops::put;
use fat12_toolkit::volume::Volume;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("put")
        .about("Insert a host file into a FAT12 disk image")
        .arg(Arg::new("image").required(true).help("Path to the disk image"))
        .arg(
            Arg::new("target")
                .required(true)
                .help("[DIR/]NAME inside the image; the host source is read from ./NAME"),
        )
        .get_matches();

    let image_path = PathBuf::from(matches.get_one::<String>("image").unwrap());
    let target = matches.get_one::<String>("target").unwrap();

    let host_name = match target.rsplit_once('/') {
        Some((_, suffix)) => suffix,
        None => target.as_str(),
    };
    let host_source = PathBuf::from(".").join(host_name);

    let mut volume = match Volume::open_read_write(&image_path) {
        Ok(v) => v,
        Err(e) => {
            log::error!("failed to open {}: {}", image_path.display(), e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match put::run(&mut volume, target, &host_source) {
        Ok(()) => {
            println!("File copied successfully.");
            ExitCode::SUCCESS
        }
        Err(Error::NotFound {
            what: NotFoundKind::Directory,
        }) => {
            println!("The directory not found.");
            ExitCode::FAILURE
        }
        Err(Error::NotFound {
            what: NotFoundKind::File,
        })
        | Err(Error::HostFileNotFound { .. }) => {
            println!("File not found.");
            ExitCode::FAILURE
        }
        Err(Error::NotEnoughSpace { .. }) | Err(Error::NoFreeCluster) => {
            println!("No enough free space in the disk image.");
            ExitCode::FAILURE
        }
        Err(Error::DirFull) => {
            println!("Directory is full.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("put failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
