//! Top-level orchestration: parses every input file and its transitive
//! `require`s, runs the four collectors, and holds the resulting tables
//! ready for [`emit::run`](crate::emit::run). Analogous to `prqlc::compile`
//! in the teacher, but a single call does the whole pipeline rather than
//! exposing a multi-stage builder, since spec.md names no use case for
//! inspecting intermediate stages.

use std::fmt::{self, Debug, Display, Formatter};
use std::path::Path;

use sddl_ast::{Error, Errors, Item};

use crate::collect;
use crate::require::RequireResolver;
use crate::source_map::SourceMap;
use crate::tables::{ConstantTable, MessageTable, RpcTable, TypedefTable};

pub struct Compiler {
    pub constants: ConstantTable,
    pub messages: MessageTable,
    pub typedefs: TypedefTable,
    pub rpcs: RpcTable,
}

/// A failed [`Compiler::compile`], carrying the `source_id -> path` table
/// alongside the raw errors so `Display` can render `path:line: message`
/// (spec.md §4.8/§7) instead of the bare numeric id `sddl_ast::Error`
/// renders on its own.
pub struct CompileError {
    pub errors: Errors,
    pub sources: SourceMap,
}

impl CompileError {
    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            render_error(f, error, &self.sources)?;
        }
        Ok(())
    }
}

fn render_error(f: &mut Formatter<'_>, error: &Error, sources: &SourceMap) -> fmt::Result {
    if let Some(span) = &error.span {
        match sources.get(span.source_id) {
            Some(path) => write!(f, "{}:{}: ", path.display(), span.line)?,
            None => write!(f, "{span:?}: ")?,
        }
    }
    write!(f, "{}", error.reason)?;
    for hint in &error.hints {
        write!(f, "\n\u{21b3} Hint: {hint}")?;
    }
    Ok(())
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl Debug for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl std::error::Error for CompileError {}

impl Compiler {
    /// Parses `paths` (and everything they `require`), runs constant and
    /// message Collect, and returns the populated tables. Aborts and
    /// returns on the first error, per spec.md §7's propagation policy.
    pub fn compile<P: AsRef<Path>>(paths: &[P]) -> Result<Compiler, CompileError> {
        let mut compiler = Compiler {
            constants: ConstantTable::default(),
            messages: MessageTable::default(),
            typedefs: TypedefTable::default(),
            rpcs: RpcTable::default(),
        };

        let mut resolver = RequireResolver::new();
        let mut next_source_id: u16 = 0;

        for path in paths {
            if let Err(errors) = resolver.schedule(path.as_ref(), &mut next_source_id, &mut |_source_id, _path, file| {
                compiler.enter_file(&file)
            }) {
                return Err(CompileError { errors, sources: resolver.into_source_map() });
            }
        }

        log::debug!("all files parsed, running constant collect");
        if let Err(errors) = collect::constant::collect(&mut compiler.constants) {
            return Err(CompileError { errors, sources: resolver.into_source_map() });
        }
        log::debug!("running message collect");
        if let Err(errors) = collect::message::collect(&mut compiler.messages, &compiler.constants) {
            return Err(CompileError { errors, sources: resolver.into_source_map() });
        }

        Ok(compiler)
    }

    fn enter_file(&mut self, file: &sddl_ast::File) -> Result<(), Errors> {
        for item in &file.items {
            match item {
                Item::Constant(decl) => collect::constant::enter(&mut self.constants, decl)?,
                Item::Message(decl) => collect::message::enter(&mut self.messages, &mut self.constants, decl)?,
                Item::Typedef(decl) => collect::typedef::enter(&mut self.typedefs, decl)?,
                Item::Rpc(decl) => collect::rpc::enter(&mut self.rpcs, decl)?,
            }
        }
        Ok(())
    }

    pub fn emit(&self, target: &mut dyn crate::emit::Target, sink: &mut dyn std::io::Write) -> std::io::Result<()> {
        crate::emit::run(target, sink, &self.constants, &self.messages, &self.typedefs, &self.rpcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_renders_the_file_path_not_the_source_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sddl");
        std::fs::write(&path, "auto X = Y;\n").unwrap();

        let err = Compiler::compile(&[path.clone()]).unwrap_err();
        let rendered = err.to_string();

        assert!(rendered.contains("bad.sddl"), "expected the file name in: {rendered}");
        assert!(!rendered.starts_with("0:"), "should not fall back to the bare source_id: {rendered}");
    }
}
