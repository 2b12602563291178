use std::io;
use std::path::PathBuf;

use lib_gfx::output::OutputError;
use lib_gfx::source::SourceError;
use lib_gfx::EncodingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input path '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("Cannot create output directory '{}'", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot derive an output name from '{}'", .0.display())]
    NoFileName(PathBuf),
    #[error("Cannot start worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Error opening image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Output '{}' or its symbol is also claimed by {}", .destination.display(), join_paths(.others))]
    NameCollision {
        destination: PathBuf,
        others: Vec<PathBuf>,
    },
    #[error(transparent)]
    Encode(#[from] EncodingError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders an error and every error beneath it on one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
