// Batch conversion of a folder of PNGs into RGB565 headers

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::classify::{Unclassified, classify_file_name, png_stem};
use super::convert::{build_artifact, load_rgba};
use super::fs_ops::{ensure_dir, list_png_files, write_atomic};
use super::sanitize::sanitize_identifier;
use crate::config::Config;
use crate::model::{AnimationFrame, AnimationMapping, OutputArtifact};

/// How output names are derived from input file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineKind {
    /// `Agumon_2.png` -> `Agumon_Walk_0` through the animation mapping.
    Mapped,
    /// `Main-BG.png` -> `Main_BG`.
    Generic,
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Mapped => write!(f, "mapped"),
            PipelineKind::Generic => write!(f, "generic"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum FileOutcome {
    Written(OutputArtifact, PathBuf),
    Skipped(Unclassified),
}

#[derive(Debug)]
pub enum FileError {
    /// The frame number parsed fine but has no entry in the animation mapping.
    UnmappedFrame(u32),
    Decode(anyhow::Error),
    Write(anyhow::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::UnmappedFrame(frame) => {
                write!(f, "Frame number {} not found in animation_mapping", frame)
            }
            FileError::Decode(e) => write!(f, "{:#}", e),
            FileError::Write(e) => write!(f, "{:#}", e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedName {
    pub symbol: String,
    pub animation: Option<AnimationFrame>,
}

/// Works out the artifact symbol for `file_name`. `Ok(Err(_))` means the file is
/// skipped without counting as a failure.
pub fn resolve_name(
    kind: PipelineKind,
    file_name: &str,
    mapping: &AnimationMapping,
) -> Result<Result<ResolvedName, Unclassified>, FileError> {
    match kind {
        PipelineKind::Mapped => {
            let parsed = match classify_file_name(file_name) {
                Ok(parsed) => parsed,
                Err(reason) => return Ok(Err(reason)),
            };

            let target = mapping
                .get(parsed.frame)
                .ok_or(FileError::UnmappedFrame(parsed.frame))?;

            let symbol = format!(
                "{}_{}_{}",
                sanitize_identifier(&parsed.subject),
                sanitize_identifier(&target.action),
                target.index
            );

            Ok(Ok(ResolvedName {
                symbol,
                animation: Some(target.clone()),
            }))
        }
        PipelineKind::Generic => {
            let symbol = png_stem(file_name)
                .map(sanitize_identifier)
                .unwrap_or_default();

            if symbol.is_empty() {
                return Ok(Err(Unclassified::EmptyName));
            }

            Ok(Ok(ResolvedName {
                symbol,
                animation: None,
            }))
        }
    }
}

/// Converts a single PNG and writes its header into `output_dir`.
pub fn process_file<F>(
    kind: PipelineKind,
    path: &Path,
    output_dir: &Path,
    config: &Config,
    log_fn: &mut F,
) -> Result<FileOutcome, FileError>
where
    F: FnMut(String),
{
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name = match resolve_name(kind, &file_name, &config.animation_mapping)? {
        Ok(name) => name,
        Err(reason) => return Ok(FileOutcome::Skipped(reason)),
    };

    if let Some(animation) = &name.animation {
        log_fn(format!(
            "  -> Action: {}, Frame: {}",
            animation.action, animation.index
        ));
    }

    let image = load_rgba(path).map_err(FileError::Decode)?;
    log_fn(format!("  Image size: {}x{}", image.width(), image.height()));

    let artifact = build_artifact(
        &image,
        name.symbol,
        &file_name,
        name.animation,
        &config.transparency_key(),
    );

    let output_name = artifact.file_name(&config.header_extension);
    log_fn(format!("  -> Output File: '{}'", output_name));
    log_fn(format!(
        "  -> Variable: '{}', Defines: '{}_WIDTH/HEIGHT'",
        artifact.data_name(),
        artifact.define_prefix()
    ));

    let output_path = output_dir.join(&output_name);
    write_atomic(&output_path, artifact.render().as_bytes()).map_err(FileError::Write)?;

    Ok(FileOutcome::Written(artifact, output_path))
}

/// Runs one pipeline over every PNG directly inside `config.input_dir`.
///
/// Per-file problems are logged and counted. The returned error is reserved for
/// problems with the directories themselves, including a run of
/// `config.max_consecutive_write_failures` write failures in a row.
pub fn run_batch<F>(kind: PipelineKind, config: &Config, mut log_fn: F) -> Result<BatchSummary>
where
    F: FnMut(String),
{
    config.validate()?;

    let input_dir = &config.input_dir;
    let output_dir = &config.output_dir;

    if kind == PipelineKind::Generic {
        ensure_dir(input_dir).with_context(|| {
            format!("Failed to create input directory {}", input_dir.display())
        })?;
    }
    if !input_dir.is_dir() {
        bail!("Input directory {} does not exist", input_dir.display());
    }
    ensure_dir(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    log_fn(format!("Input folder: {}", input_dir.display()));
    log_fn(format!("Output folder: {}", output_dir.display()));

    if kind == PipelineKind::Mapped {
        let mapping = &config.animation_mapping;
        if mapping.is_empty() {
            log_fn(
                "Warning: animation_mapping is empty, every frame will be unmapped".to_string(),
            );
        } else {
            log_fn(format!("Animation mapping: {} frames", mapping.len()));
        }
    }

    let files = list_png_files(input_dir)?;
    let mut summary = BatchSummary {
        found: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        log_fn(format!("No PNG files found in '{}'", input_dir.display()));
        return Ok(summary);
    }

    log_fn(format!(
        "Found {} PNG files. Starting {} conversion...",
        files.len(),
        kind
    ));

    let mut written_symbols = HashSet::new();
    let mut consecutive_write_failures = 0;

    for (idx, path) in files.iter().enumerate() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        log_fn(format!(
            "Processing {}/{}: {}",
            idx + 1,
            files.len(),
            file_name
        ));

        match process_file(kind, path, output_dir, config, &mut log_fn) {
            Ok(FileOutcome::Written(artifact, output_path)) => {
                if !written_symbols.insert(artifact.symbol.clone()) {
                    log_fn(format!(
                        "  ! '{}' replaces a header written earlier in this batch",
                        output_path.display()
                    ));
                }
                log_fn(format!("  ✓ Generated '{}'", output_path.display()));
                summary.processed += 1;
                consecutive_write_failures = 0;
            }
            Ok(FileOutcome::Skipped(reason)) => {
                log_fn(format!("  Skipping '{}': {}.", file_name, reason));
                summary.skipped += 1;
            }
            Err(e @ FileError::UnmappedFrame(_)) => {
                log_fn(format!("  Skipping '{}': {}.", file_name, e));
                summary.failed += 1;
            }
            Err(FileError::Write(e)) => {
                log_fn(format!("  ✗ ERROR processing '{}': {:#}", file_name, e));
                summary.failed += 1;
                consecutive_write_failures += 1;

                let limit = config.max_consecutive_write_failures;
                if limit > 0 && consecutive_write_failures >= limit {
                    log_summary(&mut log_fn, "Batch conversion aborted", &summary);
                    return Err(e.context(format!(
                        "Aborting after {} consecutive write failures in {}",
                        consecutive_write_failures,
                        output_dir.display()
                    )));
                }
            }
            Err(e @ FileError::Decode(_)) => {
                log_fn(format!("  ✗ ERROR processing '{}': {}", file_name, e));
                summary.failed += 1;
            }
        }
    }

    log_summary(&mut log_fn, "Batch conversion finished", &summary);

    Ok(summary)
}

fn log_summary<F>(log_fn: &mut F, headline: &str, summary: &BatchSummary)
where
    F: FnMut(String),
{
    log_fn(format!(
        "{}. Processed {} files. Skipped {} files. Encountered {} errors.",
        headline, summary.processed, summary.skipped, summary.failed
    ));
}

pub fn run_mapped<F>(config: &Config, log_fn: F) -> Result<BatchSummary>
where
    F: FnMut(String),
{
    run_batch(PipelineKind::Mapped, config, log_fn)
}

pub fn run_generic<F>(config: &Config, log_fn: F) -> Result<BatchSummary>
where
    F: FnMut(String),
{
    run_batch(PipelineKind::Generic, config, log_fn)
}
