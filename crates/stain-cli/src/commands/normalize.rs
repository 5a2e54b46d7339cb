//! Normalize command
//!
//! One input with an image-file output writes that file. Otherwise the
//! output is a directory and inputs are processed in parallel.

use crate::NormalizeArgs;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use stain_norm::StainNormalization;
use std::path::{Path, PathBuf};
use tracing::{info, trace};

pub fn run(args: NormalizeArgs, verbose: u8) -> Result<()> {
    trace!(inputs = args.input.len(), output = %args.output.display(), "normalize::run");

    let normalizer = super::load_normalizer(args.reference.as_deref(), args.stats.as_deref())?;
    let files = super::expand_inputs(&args.input)?;

    if stain_io::is_image_path(&args.output) {
        if files.len() != 1 {
            bail!(
                "{} inputs need an output directory, got file name {}",
                files.len(),
                args.output.display()
            );
        }
        return normalize_file(&normalizer, &files[0], &args.output, verbose);
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create directory: {}", args.output.display()))?;

    info!(files = files.len(), output = %args.output.display(), "Starting normalization");
    if verbose > 0 {
        println!("Normalizing {} files into {}", files.len(), args.output.display());
    }

    let results: Vec<(&PathBuf, Result<()>)> = files
        .par_iter()
        .map(|input| {
            let output = super::output_path(input, &args.output, args.format.as_deref());
            (input, normalize_file(&normalizer, input, &output, verbose))
        })
        .collect();

    // Report results
    let mut success = 0;
    let mut failed = 0;
    for (input, r) in results {
        match r {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}: {:#}", input.display(), e);
            }
        }
    }

    info!(success, failed, "Normalization complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

fn normalize_file(
    normalizer: &StainNormalization,
    input: &Path,
    output: &Path,
    verbose: u8,
) -> Result<()> {
    if verbose > 0 {
        println!("Normalizing {} -> {}", input.display(), output.display());
    }

    let image = super::strip_alpha(super::load_image(input)?)?;
    let result = normalizer
        .transform(&image)
        .with_context(|| format!("Failed to normalize: {}", input.display()))?;
    super::save_image(output, &result)
}
