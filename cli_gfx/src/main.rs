mod batch;
mod discover;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use lib_gfx::constants::{DEFAULT_INCLUDE, DEFAULT_INDENT, DEFAULT_VALUES_PER_LINE, FORMAT_NAME};
use lib_gfx::{EncodeOptions, SourceOptions};
use log::{error, info, LevelFilter};

use crate::batch::{run_batch, BatchConfig, BatchReport, OutputMode};
use crate::discover::find_images;
use crate::error::{error_chain, ConvertError};

#[derive(FromArgs)]
/// Convert PNG images to RGB565A8 C arrays or binary assets
struct Args {
    /// input PNG file path or directory path
    #[argh(positional)]
    input: PathBuf,

    /// output directory (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output: PathBuf,

    /// output binary format instead of C file
    #[argh(switch)]
    bin: bool,

    /// enable byte swapping for RGB565
    #[argh(switch)]
    swap16: bool,

    /// byte literals per line in C output (default: 130)
    #[argh(option, default = "DEFAULT_VALUES_PER_LINE", from_str_fn(parse_per_line))]
    per_line: usize,

    /// header included by C output (default: gfx.h)
    #[argh(option, default = "DEFAULT_INCLUDE.to_string()")]
    include: String,

    /// number of worker threads (default: one per core)
    #[argh(option, short = 'j')]
    jobs: Option<usize>,

    /// print debug output
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn parse_per_line(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("per-line must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid per-line value '{}': {}", value, e)),
    }
}

impl Args {
    fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            output_dir: self.output.clone(),
            mode: if self.bin {
                OutputMode::Binary
            } else {
                OutputMode::Source
            },
            encode: EncodeOptions {
                swap16: self.swap16,
            },
            source: SourceOptions {
                values_per_line: self.per_line,
                indent: DEFAULT_INDENT,
                include: self.include.clone(),
            },
            jobs: self.jobs,
        }
    }
}

fn run(args: &Args) -> Result<BatchReport, ConvertError> {
    let inputs = find_images(&args.input)?;
    if inputs.is_empty() {
        error!("No PNG files found in '{}'", args.input.display());
        return Ok(BatchReport::default());
    }

    std::fs::create_dir_all(&args.output).map_err(|source| ConvertError::OutputDir {
        path: args.output.clone(),
        source,
    })?;

    info!(
        "Found {} PNG file(s) to convert to {}:",
        inputs.len(),
        FORMAT_NAME
    );
    for input in &inputs {
        info!("  - {}", input.display());
    }

    run_batch(&inputs, &args.batch_config())
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    lib_gfx::init_logging(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let report = match run(&args) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", error_chain(&err));
            return ExitCode::FAILURE;
        }
    };

    if report.total() > 0 {
        println!(
            "Processing complete: {}/{} files processed successfully",
            report.processed(),
            report.total()
        );
        for input in report.failed_inputs() {
            println!("  failed: {}", input.display());
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
