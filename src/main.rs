//! guess-packager - Print the packager identity for RPM changelog entries

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = guess_packager::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
