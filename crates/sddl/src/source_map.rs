//! Maps the numeric `source_id` stamped onto every `Span` back to the file
//! path it names, the way `prqlc::SourceTree::source_ids` does. A `Span`
//! stays a lean `(source_id, line)` pair (see `sddl_ast::Span`'s doc
//! comment); this table is threaded wherever an `Error` is finally
//! rendered, so diagnostics can print the path instead of the index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    paths: HashMap<u16, PathBuf>,
}

impl SourceMap {
    pub fn insert(&mut self, source_id: u16, path: PathBuf) {
        self.paths.insert(source_id, path);
    }

    pub fn get(&self, source_id: u16) -> Option<&Path> {
        self.paths.get(&source_id).map(PathBuf::as_path)
    }
}

/// Renders `path` relative to `cwd` with the host's separators, falling
/// back to `path` unchanged if it isn't rooted under `cwd`.
pub fn relative_to(path: &Path, cwd: Option<&Path>) -> PathBuf {
    match cwd.and_then(|cwd| path.strip_prefix(cwd).ok()) {
        Some(rel) => rel.to_path_buf(),
        None => path.to_path_buf(),
    }
}
