use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid benchmark JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No benchmarks found")]
    EmptyInput,
    #[error("Failed to write plot {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}
