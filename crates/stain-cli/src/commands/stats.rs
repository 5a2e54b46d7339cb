//! Reference statistics command
//!
//! A `.json`/`.yaml`/`.yml` output extension fixes the format; `--json`
//! selects JSON for stdout and other extensions, and is rejected next to a
//! YAML extension.

use crate::StatsArgs;
use anyhow::{Context, Result, bail};
use stain_norm::StainNormalization;
use std::path::Path;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsFormat {
    Yaml,
    Json,
}

fn resolve_format(json: bool, output: Option<&Path>) -> Result<StatsFormat> {
    let ext = output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match (json, ext.as_deref()) {
        (_, Some("json")) => Ok(StatsFormat::Json),
        (true, Some("yaml" | "yml")) => bail!(
            "--json conflicts with YAML output file {}",
            output.map(|p| p.display().to_string()).unwrap_or_default()
        ),
        (false, _) => Ok(StatsFormat::Yaml),
        (true, _) => Ok(StatsFormat::Json),
    }
}

pub fn run(args: StatsArgs, verbose: u8) -> Result<()> {
    trace!(reference = %args.reference.display(), json = args.json, "stats::run");

    let format = resolve_format(args.json, args.output.as_deref())?;
    let normalizer = StainNormalization::from_path(&args.reference)
        .with_context(|| format!("Failed to use reference: {}", args.reference.display()))?;
    let stats = normalizer.reference_stats();

    let text = match format {
        StatsFormat::Json => stats.to_json()?,
        StatsFormat::Yaml => stats.to_yaml()?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose > 0 {
                println!("Wrote statistics to {}", path.display());
            }
        }
        None => println!("{}", text.trim_end()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_decides_format() {
        assert_eq!(resolve_format(false, Some(Path::new("ref.json"))).unwrap(), StatsFormat::Json);
        assert_eq!(resolve_format(true, Some(Path::new("ref.JSON"))).unwrap(), StatsFormat::Json);
        assert_eq!(resolve_format(false, Some(Path::new("ref.yml"))).unwrap(), StatsFormat::Yaml);
    }

    #[test]
    fn test_flag_decides_without_known_extension() {
        assert_eq!(resolve_format(false, None).unwrap(), StatsFormat::Yaml);
        assert_eq!(resolve_format(true, None).unwrap(), StatsFormat::Json);
        assert_eq!(resolve_format(true, Some(Path::new("ref.stats"))).unwrap(), StatsFormat::Json);
        assert_eq!(resolve_format(false, Some(Path::new("ref.stats"))).unwrap(), StatsFormat::Yaml);
    }

    #[test]
    fn test_json_flag_with_yaml_file_rejected() {
        let err = resolve_format(true, Some(Path::new("out/ref.yaml"))).unwrap_err();
        assert!(err.to_string().contains("ref.yaml"));
        assert!(resolve_format(true, Some(Path::new("ref.yml"))).is_err());
    }
}
