//! Command-line driver for facade interface synthesis.
//!
//! Reads resolved type descriptors as JSON, synthesizes an interface and a
//! partial conformance declaration for each, and writes the rendered sources.
//!
//! # Modes
//!
//! - `generate`: batch mode over files (or stdin), output to a directory or stdout
//! - `serve`: JSON-line protocol on stdin/stdout for long-running hosts
//! - `marker`: print the marker attribute source

mod generate;
mod input;
mod serve;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for facade-gen
#[derive(Parser, Debug)]
#[command(name = "facade-gen")]
#[command(about = "Synthesizes interfaces from resolved type descriptors")]
struct Args {
    /// Verbose output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize every descriptor and write the generated sources
    Generate {
        /// Descriptor JSON files; reads stdin when none are given
        inputs: Vec<PathBuf>,

        /// Directory to write generated files into (stdout when omitted)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Also emit the marker attribute source
        #[arg(long)]
        emit_marker: bool,

        /// Namespace for the emitted marker attribute
        #[arg(long)]
        marker_namespace: Option<String>,

        /// Exit non-zero if any type failed to synthesize
        #[arg(long)]
        fail_on_error: bool,

        /// Number of worker threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Serve synthesis requests over stdin/stdout, one JSON object per line
    Serve,

    /// Print the marker attribute source
    Marker {
        /// Namespace to declare the attribute in
        #[arg(long)]
        namespace: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Generate {
            inputs,
            out_dir,
            emit_marker,
            marker_namespace,
            fail_on_error,
            jobs,
        } => {
            let descriptors = input::dedupe(input::load_all(&inputs)?);
            log::info!("Synthesizing {} type(s)", descriptors.len());

            let mut report = match jobs {
                Some(jobs) => generate::generate_with_jobs(&descriptors, jobs)?,
                None => generate::generate(&descriptors),
            };
            if emit_marker {
                report
                    .files
                    .insert(0, generate::marker(marker_namespace.as_deref())?);
            }

            match &out_dir {
                Some(dir) => generate::write_to_dir(&report.files, dir)?,
                None => generate::write_to_stream(&report.files, std::io::stdout().lock())?,
            }

            if report.diagnostics > 0 {
                log::warn!(
                    "{} member(s) left out because of unsupported default values",
                    report.diagnostics
                );
            }
            if !report.failed.is_empty() {
                log::error!(
                    "{} of {} type(s) failed: {}",
                    report.failed.len(),
                    descriptors.len(),
                    report.failed.join(", ")
                );
                if fail_on_error {
                    return Ok(1);
                }
            }
            Ok(0)
        }
        Command::Serve => {
            serve::serve(std::io::stdin().lock(), std::io::stdout().lock())?;
            Ok(0)
        }
        Command::Marker { namespace } => {
            let file = generate::marker(namespace.as_deref())?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(file.source.as_bytes())?;
            stdout.flush()?;
            Ok(0)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("[facade-gen] Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
