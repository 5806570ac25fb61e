//! Program-wide code generation state.
//!
//! [`CodegenContext`] owns the output buffer, the label counter and the
//! results of the two whole-program passes (struct layouts and global
//! offsets). Per-method state lives in the method emitter.

use pcc_diagnostic::{DiagnosticKind, Diagnostics};
use pcc_ir::{ItemId, Local, Mark, Program, SourceMap, StructRef, Type};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::layout::{type_size, Layout, Layouts};

/// Diagnostic sink for the generator.
pub(crate) struct Reporter<'a> {
    sources: &'a SourceMap,
    diagnostics: &'a mut Diagnostics,
    /// Struct names already reported as unknown, by where they are written.
    unknown_types: FxHashSet<Mark>,
}

impl<'a> Reporter<'a> {
    pub fn new(sources: &'a SourceMap, diagnostics: &'a mut Diagnostics) -> Self {
        Reporter {
            sources,
            diagnostics,
            unknown_types: FxHashSet::default(),
        }
    }

    pub fn semantic(&mut self, mark: Mark, message: impl Into<String>) {
        self.diagnostics
            .report(self.sources, DiagnosticKind::Semantic, mark, message);
    }

    pub fn internal(&mut self, mark: Mark, message: impl Into<String>) {
        self.diagnostics
            .report(self.sources, DiagnosticKind::Internal, mark, message);
    }

    /// Report a struct name that resolves to nothing, once per occurrence
    /// in the source.
    pub fn unknown_type(&mut self, s: &StructRef) {
        if self.unknown_types.insert(s.mark) {
            self.semantic(s.mark, format!("Unknown type '{}'", s.name));
        }
    }
}

/// Code generation context.
pub(crate) struct CodegenContext<'a> {
    pub program: &'a Program,
    pub reporter: Reporter<'a>,
    layouts: Layouts,
    /// Word offsets of non-constant globals inside `__GLOBALS`.
    globals: FxHashMap<ItemId, u32>,
    global_words: u32,
    indent: usize,
    output: String,
    label_counter: u32,
}

impl<'a> CodegenContext<'a> {
    /// Create a context and run the layout and global offset passes.
    pub fn new(program: &'a Program, diagnostics: &'a mut Diagnostics) -> Self {
        let mut reporter = Reporter::new(&program.sources, diagnostics);
        let layouts = Layouts::compute(program, &mut reporter);
        let mut ctx = CodegenContext {
            program,
            reporter,
            layouts,
            globals: FxHashMap::default(),
            global_words: 0,
            indent: 0,
            output: String::with_capacity(4096),
            label_counter: 0,
        };
        ctx.assign_global_offsets();
        ctx
    }

    fn assign_global_offsets(&mut self) {
        let program = self.program;
        for (id, global) in program.globals() {
            if global.const_value.is_some() {
                continue;
            }
            let size = self.size_of(&global.ty);
            self.globals.insert(id, self.global_words);
            self.global_words = self.global_words.saturating_add(size);
        }
        tracing::debug!(words = self.global_words, "assigned global offsets");
    }

    /// Size of `ty` in words. Unknown struct names report and count as 0.
    pub fn size_of(&mut self, ty: &Type) -> u32 {
        let program = self.program;
        let layouts = &self.layouts;
        let reporter = &mut self.reporter;
        type_size(ty, &mut |s| match layouts.resolve(program, s) {
            Some(layout) => layout.size(),
            None => {
                reporter.unknown_type(s);
                0
            }
        })
    }

    /// The layout of a struct type, reporting it when unknown.
    pub fn struct_layout(&mut self, s: &StructRef) -> Option<&Layout> {
        match self.layouts.resolve(self.program, s) {
            Some(layout) => Some(layout),
            None => {
                self.reporter.unknown_type(s);
                None
            }
        }
    }

    /// The frame described by a locals struct.
    pub fn frame(&mut self, locals: &[Local]) -> Layout {
        Layout::build(
            locals.iter().map(|l| (l.name.clone(), l.ty.clone())),
            |ty| self.size_of(ty),
        )
    }

    pub fn global_offset(&self, id: ItemId) -> Option<u32> {
        self.globals.get(&id).copied()
    }

    /// Total size of `__GLOBALS` in words.
    pub fn global_words(&self) -> u32 {
        self.global_words
    }

    /// Generate a fresh `__label<n>`, counting from 1.
    pub fn fresh_label(&mut self) -> String {
        self.label_counter += 1;
        format!("__label{}", self.label_counter)
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line, indented with one tab per level.
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write an assembly comment line.
    pub fn comment(&mut self, s: &str) {
        self.writeln(&format!("; {s}"));
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
