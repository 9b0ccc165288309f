use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No `baseUrl` was found in the compiler options")]
    MissingBaseUrl,
    #[error("Failed to parse {file_name:?}: {message}")]
    Parse { file_name: PathBuf, message: String },
    #[error("Failed to print {file_name:?}")]
    Codegen {
        file_name: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config {path:?}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{file_name:?} is not under {root_dir:?}, the directory mapped onto `outDir`")]
    OutsideRootDir { file_name: PathBuf, root_dir: PathBuf },
    #[error("Cannot write {file_name:?} because it would overwrite an input file")]
    OverwritesInput { file_name: PathBuf },
    #[error("Cannot write {file_name:?} because more than one input emits it")]
    DuplicateOutput { file_name: PathBuf },
    #[error("{0}")]
    Io(#[from] io::Error),
}
