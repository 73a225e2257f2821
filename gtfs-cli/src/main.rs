//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = gtfs_cli::run() {
        eprintln!("gtfs-sqlite: {}", err.report());
        std::process::exit(1);
    }
}
