//! Command line front end: argument parsing, tracing setup and real file
//! IO around [`pcc_compiler::compile`].
//!
//! ```text
//! pccc [/flag[:value]...] [file]
//! ```
//!
//! Flags: `/target:progcom`, `/out:<path>`, `/debug`. Without a file,
//! `program.c` in the current directory is compiled.

mod args;
mod error;
mod logging;

pub use args::Invocation;
pub use error::CliError;
pub use logging::init_tracing;

use std::fs;
use std::path::{Path, PathBuf};

use pcc_compiler::CompileOutput;

/// Compiled when no file is named.
pub const DEFAULT_INPUT: &str = "program.c";

/// Compile the file named by `args`.
///
/// Included files and the output are resolved relative to the input
/// file's directory. Diagnostics are in the returned output; `Err` is for
/// failures outside the program being compiled.
pub fn run(args: &[String]) -> Result<CompileOutput, CliError> {
    let invocation = Invocation::parse(args)?;
    init_tracing(invocation.flags.contains("debug"));

    let input = match invocation.file {
        Some(file) => PathBuf::from(file),
        None if Path::new(DEFAULT_INPUT).is_file() => {
            eprintln!("No input file specified, compiling {DEFAULT_INPUT}");
            PathBuf::from(DEFAULT_INPUT)
        }
        None => return Err(CliError::NoInput),
    };
    if !input.is_file() {
        return Err(CliError::NotFound(input.display().to_string()));
    }
    let base = input.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(base = %base.display(), file = %name, "compiling");

    pcc_compiler::compile(
        &name,
        &invocation.flags,
        |path| fs::read_to_string(base.join(path)).ok(),
        |path, text| {
            let target = base.join(path);
            fs::write(&target, text).map_err(|source| CliError::Write {
                path: target.display().to_string(),
                source,
            })
        },
    )
}
