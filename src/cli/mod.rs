//! # CLI Module
//!
//! Command-line interface for perceptual fingerprints.
//!
//! ## Usage
//! ```bash
//! # Fingerprint files (in parallel)
//! phash hash ~/Photos/a.jpg ~/Photos/b.png
//!
//! # Average hash, JSON output
//! phash hash a.jpg --algorithm average --output json
//!
//! # Compare two images; exit status 1 when they are further apart than the threshold
//! phash compare original.png recompressed.jpg --threshold 10
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use perceptual_fingerprint::core::hasher::DctTransformKind;
use perceptual_fingerprint::error::{FingerprintError, HashError, Result};
use perceptual_fingerprint::{Fingerprint, HashAlgorithmKind, Hasher, HasherConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Perceptual image fingerprints - find images that look alike
#[derive(Parser, Debug)]
#[command(name = "phash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the fingerprint of each image
    Hash {
        /// Image files to fingerprint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "dct")]
        algorithm: Algorithm,

        /// DCT backend
        #[arg(long, default_value = "table")]
        transform: Transform,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Compare the fingerprints of two images
    Compare {
        /// First image
        first: PathBuf,

        /// Second image
        second: PathBuf,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "dct")]
        algorithm: Algorithm,

        /// DCT backend
        #[arg(long, default_value = "table")]
        transform: Transform,

        /// Maximum distance still reported as similar (0-64)
        #[arg(short, long, default_value = "10")]
        threshold: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - Fast, good for exact duplicates
    Average,
    /// DCT Hash - Robust to recompression and rescaling (default)
    Dct,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Dct => HashAlgorithmKind::Dct,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transform {
    /// Precomputed cosine table
    Table,
    /// Planned fast transform
    Planned,
}

impl From<Transform> for DctTransformKind {
    fn from(transform: Transform) -> Self {
        match transform {
            Transform::Table => DctTransformKind::Table,
            Transform::Planned => DctTransformKind::Planned,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (fingerprints / distance only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    perceptual_fingerprint::init_tracing(cli.verbose);

    match cli.command {
        Commands::Hash {
            paths,
            algorithm,
            transform,
            output,
        } => run_hash(&paths, build_hasher(algorithm, transform)?, output),
        Commands::Compare {
            first,
            second,
            algorithm,
            transform,
            threshold,
            output,
        } => run_compare(
            &first,
            &second,
            build_hasher(algorithm, transform)?,
            threshold,
            output,
        ),
    }
}

fn build_hasher(algorithm: Algorithm, transform: Transform) -> Result<Hasher> {
    Ok(HasherConfig::new()
        .algorithm(algorithm.into())
        .transform(transform.into())
        .build()?)
}

fn run_hash(paths: &[PathBuf], hasher: Hasher, output: OutputFormat) -> Result<ExitCode> {
    info!(files = paths.len(), algorithm = %hasher.kind(), "hashing");

    let results: Vec<(&PathBuf, std::result::Result<Fingerprint, HashError>)> = paths
        .par_iter()
        .map(|path| (path, hasher.hash_file(path)))
        .collect();

    let mut failures = 0usize;
    for (path, result) in &results {
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to hash");
            failures += 1;
        }
    }

    match output {
        OutputFormat::Pretty => print_pretty_hashes(&Term::stdout(), hasher.kind(), &results),
        OutputFormat::Json => print_json_hashes(hasher.kind(), &results)?,
        OutputFormat::Minimal => {
            for (path, result) in &results {
                if let Ok(fingerprint) = result {
                    println!("{} {}", fingerprint, path.display());
                }
            }
        }
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_pretty_hashes(
    term: &Term,
    algorithm: HashAlgorithmKind,
    results: &[(&PathBuf, std::result::Result<Fingerprint, HashError>)],
) {
    term.write_line(&format!(
        "{} {}",
        style(algorithm).bold().cyan(),
        style(algorithm.description()).dim()
    ))
    .ok();

    for (path, result) in results {
        let line = match result {
            Ok(fingerprint) => format!(
                "  {} {}  {}",
                style("✓").green().bold(),
                style(fingerprint).yellow(),
                path.display()
            ),
            Err(e) => format!(
                "  {} {}  {}",
                style("✗").red().bold(),
                path.display(),
                style(e).red()
            ),
        };
        term.write_line(&line).ok();
    }
}

fn print_json_hashes(
    algorithm: HashAlgorithmKind,
    results: &[(&PathBuf, std::result::Result<Fingerprint, HashError>)],
) -> Result<()> {
    let output = serde_json::json!({
        "algorithm": algorithm,
        "results": results.iter().map(|(path, result)| match result {
            Ok(fingerprint) => serde_json::json!({
                "path": path,
                "fingerprint": fingerprint.to_hex(),
            }),
            Err(e) => serde_json::json!({
                "path": path,
                "error": e.to_string(),
            }),
        }).collect::<Vec<_>>()
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_compare(
    first: &Path,
    second: &Path,
    hasher: Hasher,
    threshold: u32,
    output: OutputFormat,
) -> Result<ExitCode> {
    if threshold > 64 {
        return Err(FingerprintError::Config(format!(
            "Invalid threshold: {} (must be 0-64)",
            threshold
        )));
    }

    let (a, b) = rayon::join(|| hasher.hash_file(first), || hasher.hash_file(second));
    let (a, b) = (a?, b?);

    let distance = a.distance(&b);
    let similar = distance <= threshold;
    info!(%a, %b, distance, threshold, "compared");

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!("  {}  {}", style(a).yellow(), first.display()))
                .ok();
            term.write_line(&format!("  {}  {}", style(b).yellow(), second.display()))
                .ok();
            term.write_line("").ok();
            let verdict = if similar {
                style("similar").green().bold()
            } else {
                style("different").red().bold()
            };
            term.write_line(&format!(
                "  distance {} / 64 ({:.1}% similar, threshold {}): {}",
                style(distance).cyan(),
                a.similarity(&b),
                threshold,
                verdict
            ))
            .ok();
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "algorithm": hasher.kind(),
                "first": { "path": first, "fingerprint": a.to_hex() },
                "second": { "path": second, "fingerprint": b.to_hex() },
                "distance": distance,
                "similarity": a.similarity(&b),
                "threshold": threshold,
                "similar": similar,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{}", distance),
    }

    Ok(if similar {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
