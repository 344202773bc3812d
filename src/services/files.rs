//! Reading and writing config files as [`ConfigFile`] snapshots.
//!
//! Saving is atomic: content goes to a temporary file next to the target, which is
//! then renamed over it. Readers (including Hyprland's own config reload) never see a
//! half-written file. Symlinked configs, common with dotfile managers, are written
//! through the link so the link itself survives.

use super::paths::{clean_path, utf8_path};
use crate::error::HyprError;
use crate::models::ConfigFile;
use crate::models::config_file::file_name_of;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, Metadata};
use std::io::{self, Write};

/// Mode for files created by [`FileRecordLoader::save`]: owner read/write only
pub const NEW_FILE_MODE: u32 = 0o600;

/// Loads and saves [`ConfigFile`]s.
#[derive(Debug, Clone, Default)]
pub struct FileRecordLoader;

impl FileRecordLoader {
    pub fn new() -> Self {
        Self
    }

    /// Stat and read `path`.
    ///
    /// # Errors
    ///
    /// [`HyprError::NotFound`], [`HyprError::PermissionDenied`], or
    /// [`HyprError::Read`] (also used for content that is not UTF-8).
    pub fn load(&self, path: &Utf8Path) -> Result<ConfigFile, HyprError> {
        let metadata = fs::metadata(path).map_err(|e| HyprError::from_read(path, e))?;
        let bytes = fs::read(path).map_err(|e| HyprError::from_read(path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| HyprError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        tracing::debug!("Loaded {} ({} bytes)", path, metadata.len());

        Ok(ConfigFile {
            path: path.to_path_buf(),
            name: file_name_of(path),
            size: metadata.len(),
            permissions: mode_bits(&metadata),
            content,
            loaded: true,
        })
    }

    /// Load every path, substituting a placeholder for files that cannot be read.
    ///
    /// Order of the input is kept. Failures are logged and never abort the batch.
    pub fn load_all<'a, I>(&self, paths: I) -> Vec<ConfigFile>
    where
        I: IntoIterator<Item = &'a Utf8Path>,
    {
        paths
            .into_iter()
            .map(|path| match self.load(path) {
                Ok(file) => file,
                Err(HyprError::NotFound { .. }) => {
                    tracing::debug!("{} does not exist, listing without content", path);
                    ConfigFile::unloaded(path)
                }
                Err(e) => {
                    tracing::warn!("Error loading {}: {} (skipping content)", path, e);
                    ConfigFile::unloaded(path)
                }
            })
            .collect()
    }

    /// Replace the content of `path`, creating it if needed.
    ///
    /// Existing permission bits are kept and owner read/write is added; new files get
    /// [`NEW_FILE_MODE`]. No conflict detection: the last writer wins.
    ///
    /// # Errors
    ///
    /// [`HyprError::ReadOnly`] when the file or its directory refuses the write,
    /// [`HyprError::Write`] for any other failure.
    pub fn save(&self, path: &Utf8Path, content: &str) -> Result<(), HyprError> {
        let target = match fs::canonicalize(path) {
            Ok(resolved) => utf8_path(resolved)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                dangling_link_target(path).map_err(|e| HyprError::from_write(path, e))?
            }
            Err(e) => return Err(HyprError::from_write(path, e)),
        };

        let mode = match fs::metadata(&target) {
            Ok(metadata) => mode_bits(&metadata) | NEW_FILE_MODE,
            Err(_) => NEW_FILE_MODE,
        };

        write_atomically(&target, content.as_bytes(), mode)
            .map_err(|e| HyprError::from_write(target.clone(), e))?;

        tracing::info!("Saved {} ({} bytes, mode {:o})", target, content.len(), mode);
        Ok(())
    }
}

/// Final path a (possibly dangling) symlink chain points at, or `path` itself.
///
/// Relative link targets are taken relative to the directory holding the link.
fn dangling_link_target(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    const MAX_HOPS: usize = 40;

    let mut current = path.to_path_buf();
    for _ in 0..MAX_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(metadata) if metadata.file_type().is_symlink() => {}
            _ => return Ok(current),
        }

        let link = utf8_path(fs::read_link(&current)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        current = match current.parent() {
            Some(dir) if link.is_relative() => clean_path(dir.join(&link)),
            _ => clean_path(&link),
        };
    }

    Err(io::Error::other(format!("too many levels of symbolic links: {path}")))
}

fn write_atomically(target: &Utf8Path, bytes: &[u8], mode: u32) -> io::Result<()> {
    let dir: Utf8PathBuf = match target.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".hyprsettings-")
        .tempfile_in(&dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    apply_mode(temp.path(), mode)?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(unix)]
fn apply_mode(path: &std::path::Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode(_path: &std::path::Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
