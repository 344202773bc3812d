use crate::models::settings::ResolveMode;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use serde::Serialize;

/// Snapshot of one file participating in the configuration.
///
/// Created by [`FileRecordLoader`](crate::services::files::FileRecordLoader). Editing
/// `content` in memory changes nothing on disk; write back explicitly with
/// [`FileRecordLoader::save`](crate::services::files::FileRecordLoader::save).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFile {
    pub path: Utf8PathBuf,
    pub name: String,
    pub size: u64,
    pub permissions: u32,
    pub content: String,

    /// `false` when the file could not be read and this is a placeholder
    pub loaded: bool,
}

impl ConfigFile {
    /// Placeholder for a path that is part of a listing but could not be read.
    pub fn unloaded(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            path,
            size: 0,
            permissions: 0,
            content: String::new(),
            loaded: false,
        }
    }

    /// Permission bits rendered like `ls` does for the owner/group/other triplets.
    pub fn permissions_string(&self) -> String {
        let mut out = String::with_capacity(9);
        for shift in [6u32, 3, 0] {
            let bits = (self.permissions >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

pub(crate) fn file_name_of(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}

/// Files reachable from a root config through `source` directives.
///
/// The root is kept apart from the sourced set: [`sourced_files`](Self::sourced_files)
/// never contains it, [`all_files`](Self::all_files) starts with it. Sourced paths are
/// unique and keep the order in which resolution first saw them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigGraph {
    root: Utf8PathBuf,
    sourced: IndexSet<Utf8PathBuf>,
    mode: ResolveMode,
}

impl ConfigGraph {
    pub fn new(root: impl Into<Utf8PathBuf>, mode: ResolveMode) -> Self {
        Self {
            root: root.into(),
            sourced: IndexSet::new(),
            mode,
        }
    }

    /// Record a sourced path. Returns `false` if it was already present or is the root.
    pub(crate) fn insert(&mut self, path: Utf8PathBuf) -> bool {
        if path == self.root {
            return false;
        }
        self.sourced.insert(path)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    pub fn sourced_files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.sourced.iter().map(|p| p.as_path())
    }

    /// Root followed by every sourced file.
    pub fn all_files(&self) -> impl Iterator<Item = &Utf8Path> {
        std::iter::once(self.root.as_path()).chain(self.sourced_files())
    }

    pub fn contains(&self, path: &Utf8Path) -> bool {
        path == self.root || self.sourced.contains(path)
    }

    pub fn sourced_count(&self) -> usize {
        self.sourced.len()
    }
}
