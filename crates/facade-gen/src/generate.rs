//! Batch generation: synthesize every descriptor and write the rendered files.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use facade_synth::{marker_file, render_file, synthesize};
use facade_types::{GeneratedFile, TypeDescriptor};
use rayon::prelude::*;

/// What one generation run produced.
#[derive(Debug, Default)]
pub struct Report {
    pub files: Vec<GeneratedFile>,
    /// Qualified names of the types that could not be synthesized
    pub failed: Vec<String>,
    /// Members left out because of unsupported default values
    pub diagnostics: usize,
}

/// Synthesize all descriptors in parallel, keeping input order.
pub fn generate(descriptors: &[TypeDescriptor]) -> Report {
    let outcomes: Vec<_> = descriptors
        .par_iter()
        .map(|descriptor| (descriptor, synthesize(descriptor)))
        .collect();

    let mut report = Report::default();
    for (descriptor, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                for diagnostic in &result.diagnostics {
                    log::warn!("{}: {}", descriptor.qualified_name(), diagnostic.message);
                }
                report.diagnostics += result.diagnostics.len();
                report.files.push(render_file(&result));
            }
            Err(err) => {
                let name = descriptor.qualified_name();
                log::error!("Failed to synthesize {}: {}", name, err);
                report.failed.push(name);
            }
        }
    }
    report
}

/// Same as [`generate`], on a pool with a fixed number of workers.
pub fn generate_with_jobs(descriptors: &[TypeDescriptor], jobs: usize) -> anyhow::Result<Report> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build worker pool")?;
    Ok(pool.install(|| generate(descriptors)))
}

pub fn marker(namespace: Option<&str>) -> anyhow::Result<GeneratedFile> {
    Ok(marker_file(namespace)?)
}

/// Write each file under `dir`, creating it if needed.
pub fn write_to_dir(files: &[GeneratedFile], dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for file in files {
        let path = dir.join(&file.hint_name);
        std::fs::write(&path, &file.source)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Concatenate files onto one stream, each preceded by its hint name.
pub fn write_to_stream(files: &[GeneratedFile], mut out: impl Write) -> anyhow::Result<()> {
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "// {}", file.hint_name)?;
        out.write_all(file.source.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
