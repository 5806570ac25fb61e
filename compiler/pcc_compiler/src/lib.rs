//! Portable ProgCom C compiler driver.
//!
//! Provides an IO-free compilation pipeline: files are read and written
//! through caller-supplied collaborators, so the same driver serves the
//! `pccc` binary and in-memory test harnesses.
//!
//! # Usage
//!
//! ```ignore
//! use pcc_compiler::{compile, Flags};
//!
//! let output = compile("main.c", &Flags::new(), |path| read(path), |path, text| write(path, text))?;
//! for line in output.rendered() {
//!     println!("{line}");
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! pcc_ir, pcc_parse, pcc_codegen
//!              ↓
//!        pcc_compiler  ← this crate
//!              ↓
//!            pccc
//! ```

mod config;
mod output;
mod session;

pub use config::{CompileConfig, ConfigError, Flags, Target};
pub use output::CompileOutput;
pub use session::Session;

use pcc_diagnostic::{DiagnosticKind, Diagnostics};

/// Compile `initial_file` and everything it includes.
///
/// `reader` returns a file's text, or `None` when it cannot be read.
/// `writer` is called once, with the output path and the assembly, and
/// only when compilation produced no diagnostics. Its error is the only
/// way this function fails; every problem with the program itself is a
/// diagnostic in the returned [`CompileOutput`].
#[tracing::instrument(level = "debug", skip_all, fields(file = initial_file))]
pub fn compile<R, W, E>(
    initial_file: &str,
    flags: &Flags,
    reader: R,
    mut writer: W,
) -> Result<CompileOutput, E>
where
    R: FnMut(&str) -> Option<String>,
    W: FnMut(&str, &str) -> Result<(), E>,
{
    let config = match CompileConfig::from_flags(flags) {
        Ok(config) => config,
        Err(err) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.report_detached(DiagnosticKind::Semantic, initial_file, err.to_string());
            return Ok(CompileOutput::failed(diagnostics));
        }
    };

    let mut session = Session::new(reader);
    session.parse_file(initial_file);
    if session.has_errors() {
        return Ok(CompileOutput::failed(session.into_diagnostics()));
    }

    let (program, mut diagnostics) = session.finish();
    let assembly = match config.target {
        Target::ProgCom => pcc_codegen::generate(&program, &mut diagnostics),
    };
    if !diagnostics.is_empty() {
        tracing::debug!(errors = diagnostics.len(), "generation failed");
        return Ok(CompileOutput::failed(diagnostics));
    }

    let path = config.output_path(initial_file);
    writer(&path, &assembly)?;
    tracing::debug!(path = %path, bytes = assembly.len(), "assembly written");
    Ok(CompileOutput::written(path))
}

#[cfg(test)]
mod tests;
