//! Require resolver (spec.md §4.1): walks a file's `require` clause and
//! recursively parses referenced files depth-first, deduplicated by
//! canonical path, before the file that named them is handed to the
//! constant/message/typedef/rpc collectors. Runs ahead of every other
//! listener, matching the fixed per-file phase order of spec.md §5.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sddl_ast::{Errors, WithErrorInfo};

use crate::source_map::{self, SourceMap};

pub struct RequireResolver {
    seen: HashSet<PathBuf>,
    sources: SourceMap,
    /// Captured once at construction, per spec.md §4.8's "process's initial
    /// working directory" rendering rule — not re-read per file, so a
    /// (hypothetical) `chdir` mid-compile can't skew already-scheduled paths.
    cwd: Option<PathBuf>,
}

impl RequireResolver {
    pub fn new() -> Self {
        RequireResolver {
            seen: HashSet::new(),
            sources: SourceMap::default(),
            cwd: std::env::current_dir().ok(),
        }
    }

    /// Hands back the `source_id -> path` table accumulated so far. Called
    /// both after a successful compile and after an error, so diagnostics
    /// from any phase can render a real path instead of the bare index.
    pub fn into_source_map(self) -> SourceMap {
        self.sources
    }

    /// Parses `path`, and everything it transitively `require`s, depth
    /// first. `on_file` is called exactly once per newly-seen file, after
    /// all of *its* requirements have already been delivered, in parse
    /// order — a `require`'d file always reaches `on_file` before the file
    /// that named it.
    pub fn schedule(
        &mut self,
        path: &Path,
        next_source_id: &mut u16,
        on_file: &mut dyn FnMut(u16, &Path, sddl_ast::File) -> Result<(), Errors>,
    ) -> Result<(), Errors> {
        let canonical = path
            .canonicalize()
            .map_err(|e| generic_error(&format!("{}: {e}", path.display())))?;

        if self.seen.contains(&canonical) {
            log::debug!("require: {} already scheduled, skipping", canonical.display());
            return Ok(());
        }
        self.seen.insert(canonical.clone());
        log::debug!("require: scheduling {}", canonical.display());

        let source_id = *next_source_id;
        *next_source_id = next_source_id
            .checked_add(1)
            .expect("fewer than 65536 schema files in a single compile");
        self.sources
            .insert(source_id, source_map::relative_to(&canonical, self.cwd.as_deref()));

        let text =
            std::fs::read_to_string(&canonical).map_err(|e| generic_error(&format!("{}: {e}", canonical.display())))?;
        let file = sddl_parser::parse_source(source_id, &text)?;

        let dir = canonical.parent().map(Path::to_path_buf).unwrap_or_default();
        for item in &file.requires {
            let child = dir.join(normalize_separators(&item.path));
            self.schedule(&child, next_source_id, on_file)?;
        }

        on_file(source_id, &canonical, file)
    }
}

impl Default for RequireResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn generic_error(message: &str) -> Errors {
    sddl_ast::Error::new_simple(message).into()
}

/// Schema sources may spell a `require` path with either separator;
/// normalize to the host's before joining relative to the current file's
/// directory, per spec.md §4.1.
fn normalize_separators(path: &str) -> PathBuf {
    let native: String = path
        .chars()
        .map(|c| if c == '/' || c == '\\' { std::path::MAIN_SEPARATOR } else { c })
        .collect();
    PathBuf::from(native)
}
