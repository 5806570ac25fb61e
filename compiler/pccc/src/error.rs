//! Failures of the command line itself, as opposed to diagnostics about
//! the program being compiled.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No input file specified, and the default file program.c is missing")]
    NoInput,

    #[error("File \"{0}\" not found")]
    NotFound(String),

    #[error("Flag '/{0}' needs a value")]
    MissingValue(String),

    #[error("Could not write '{path}'")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}
