use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that reject a run before any file is touched.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No destination folder selected")]
    NoDestination,
    #[error("No files queued for conversion")]
    NoFiles,
    #[error("No write permission for folder: {0}")]
    DestinationNotWritable(PathBuf),
}

/// Per-file codec failures. These are logged and counted, never abort a run.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Corrupt or unsupported file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("HEIC pre-processing failed for {path}: {reason}")]
    HeicPreprocess { path: PathBuf, reason: String },
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}
