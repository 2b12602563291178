use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lib_gfx::constants::{BIN_EXT, SOURCE_EXT};
use lib_gfx::{
    emit_source, encode, symbol_name, write_container_file, write_source_file, EncodeOptions,
    Image, SourceOptions,
};
use log::{debug, error, info};
use rayon::prelude::*;

use crate::error::{error_chain, ConvertError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `<name>.bin`: header followed by payload.
    Binary,
    /// `<name>.c`: byte array plus descriptor.
    Source,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    pub encode: EncodeOptions,
    pub source: SourceOptions,
    /// Worker threads; `None` lets rayon decide.
    pub jobs: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            mode: OutputMode::Source,
            encode: EncodeOptions::default(),
            source: SourceOptions::default(),
            jobs: None,
        }
    }
}

/// One input and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub destination: PathBuf,
    /// Array/descriptor name, source mode only.
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub destination: PathBuf,
    pub width: u16,
    pub height: u16,
    pub data_size: usize,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<FileSummary, ConvertError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.processed()
    }

    /// Inputs whose conversion failed, in input order.
    pub fn failed_inputs(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.input.as_path())
    }

    /// True only if something was found and nothing failed.
    pub fn is_success(&self) -> bool {
        self.total() > 0 && self.failed() == 0
    }
}

fn plan_job(input: &Path, config: &BatchConfig) -> Result<Job, ConvertError> {
    let stem = input
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConvertError::NoFileName(input.to_path_buf()))?;

    let (extension, symbol) = match config.mode {
        OutputMode::Binary => (BIN_EXT, None),
        OutputMode::Source => (SOURCE_EXT, Some(symbol_name(input)?)),
    };

    // Only the last extension is replaced: "a.b.png" becomes "a.b.c"
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(extension);

    Ok(Job {
        input: input.to_path_buf(),
        destination: config.output_dir.join(file_name),
        symbol,
    })
}

/// Maps every input to its destination, failing every input that shares a
/// destination file name (compared case-insensitively) or a symbol with another.
pub fn plan_jobs(inputs: &[PathBuf], config: &BatchConfig) -> Vec<Result<Job, ConvertError>> {
    let planned: Vec<Result<Job, ConvertError>> =
        inputs.iter().map(|input| plan_job(input, config)).collect();

    let mut claims: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, job) in planned.iter().enumerate() {
        let Ok(job) = job else { continue };
        for key in claim_keys(job) {
            claims.entry(key).or_default().push(index);
        }
    }

    planned
        .into_iter()
        .enumerate()
        .map(|(index, job)| {
            let job = job?;
            let mut others: Vec<PathBuf> = claim_keys(&job)
                .iter()
                .filter_map(|key| claims.get(key))
                .flatten()
                .filter(|&&other| other != index)
                .map(|&other| inputs[other].clone())
                .collect();

            if others.is_empty() {
                return Ok(job);
            }

            others.sort();
            others.dedup();
            Err(ConvertError::NameCollision {
                destination: job.destination,
                others,
            })
        })
        .collect()
}

fn claim_keys(job: &Job) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    if let Some(name) = job.destination.file_name() {
        keys.push(format!("file:{}", name.to_string_lossy().to_lowercase()));
    }
    if let Some(symbol) = &job.symbol {
        keys.push(format!("symbol:{}", symbol));
    }
    keys
}

/// Decodes, encodes and writes a single input.
pub fn convert_file(job: &Job, config: &BatchConfig) -> Result<FileSummary, ConvertError> {
    let decoded = image::open(&job.input)
        .map_err(|source| ConvertError::Decode {
            path: job.input.clone(),
            source,
        })?
        .into_rgba8();

    let (width, height) = decoded.dimensions();
    let image = Image::new(width, height, decoded.into_raw());
    let encoded = encode(&image, &config.encode)?;

    match (&config.mode, &job.symbol) {
        (OutputMode::Source, Some(symbol)) => {
            let text = emit_source(symbol, &encoded, &config.source)?;
            write_source_file(&job.destination, &text)?;
        }
        _ => write_container_file(&job.destination, &encoded)?,
    }

    Ok(FileSummary {
        destination: job.destination.clone(),
        width: encoded.width(),
        height: encoded.height(),
        data_size: encoded.data_size(),
    })
}

fn process(input: &Path, job: Result<Job, ConvertError>, config: &BatchConfig) -> FileOutcome {
    info!("Processing: {}", input.display());
    let result = job.and_then(|job| convert_file(&job, config));

    match &result {
        Ok(summary) => debug!(
            "{} -> {} ({}x{}, {} bytes)",
            input.display(),
            summary.destination.display(),
            summary.width,
            summary.height,
            summary.data_size
        ),
        Err(err) => error!("{}: {}", input.display(), error_chain(err)),
    }

    FileOutcome {
        input: input.to_path_buf(),
        result,
    }
}

/// Converts every input independently on a worker pool.
///
/// Failures stay local to their input. Outcomes come back in input order.
pub fn run_batch(inputs: &[PathBuf], config: &BatchConfig) -> Result<BatchReport, ConvertError> {
    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = config.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build()?;

    let jobs = plan_jobs(inputs, config);
    let outcomes: Vec<FileOutcome> = pool.install(|| {
        inputs
            .par_iter()
            .zip(jobs.into_par_iter())
            .map(|(input, job)| process(input, job, config))
            .collect()
    });

    Ok(BatchReport { outcomes })
}
