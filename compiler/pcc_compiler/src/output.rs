//! Result of a compilation run.

use pcc_diagnostic::Diagnostics;

/// What a call to [`compile`](crate::compile) produced.
#[derive(Debug)]
pub struct CompileOutput {
    /// Empty exactly when the assembly was written.
    pub diagnostics: Diagnostics,
    /// Where the assembly went.
    pub written: Option<String>,
}

impl CompileOutput {
    pub(crate) fn failed(diagnostics: Diagnostics) -> Self {
        CompileOutput {
            diagnostics,
            written: None,
        }
    }

    pub(crate) fn written(path: String) -> Self {
        CompileOutput {
            diagnostics: Diagnostics::new(),
            written: Some(path),
        }
    }

    pub fn success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics as `<file> - line <L>, column <C>: <message>` lines.
    pub fn rendered(&self) -> Vec<String> {
        self.diagnostics.render()
    }
}
