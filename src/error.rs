//src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures for a merge run.
///
/// A missing per-sample count file is deliberately not in this taxonomy: it
/// is recovered locally as an empty contribution (see
/// [`load_optional`](crate::count_file::load_optional)).
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no contig count files found in {} and no reference table supplied", .dir.display())]
    MissingInput { dir: PathBuf },

    #[error("malformed count file {}, line {line}: {reason}", .path.display())]
    MalformedFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
