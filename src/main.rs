//! # phash CLI
//!
//! Command-line interface for perceptual fingerprints.
//!
//! ## Usage
//! ```bash
//! phash hash photo.jpg scan.png --algorithm dct
//! phash compare original.png recompressed.jpg --threshold 10
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
