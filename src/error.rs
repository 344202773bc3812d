use camino::Utf8PathBuf;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the config, wallpaper and image services.
#[derive(Error, Debug)]
pub enum HyprError {
    #[error("Hyprland config not found at {path}")]
    ConfigNotFound { path: Utf8PathBuf },

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("File not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: Utf8PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File is read-only: {path}")]
    ReadOnly { path: Utf8PathBuf },

    #[error("Unrecognized line {line}: {text}")]
    ParseAmbiguous { line: usize, text: String },

    #[error("Failed to restart service {service}: {reason}")]
    ServiceRestart { service: String, reason: String },

    #[error("Failed to process image {path}: {message}")]
    Image { path: Utf8PathBuf, message: String },

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },
}

impl HyprError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_read(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Read { path, source },
        }
    }

    /// Classify an I/O error raised while writing `path`.
    pub fn from_write(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::ReadOnly { path },
            _ => Self::Write { path, source },
        }
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::ConfigNotFound { path }
            | Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::ReadOnly { path }
            | Self::Image { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether a batch operation may log this error and keep going.
    ///
    /// A missing root config or home directory ends the session; per-file
    /// problems do not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ConfigNotFound { .. } | Self::HomeDirUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_classification() {
        let err = HyprError::from_read("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, HyprError::NotFound { .. }));

        let err = HyprError::from_read("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, HyprError::PermissionDenied { .. }));

        let err = HyprError::from_read("/x", io::Error::other("boom"));
        assert!(matches!(err, HyprError::Read { .. }));
        assert_eq!(err.path().map(|p| p.as_str()), Some("/x"));
    }

    #[test]
    fn test_write_permission_denied_is_read_only() {
        let err = HyprError::from_write("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, HyprError::ReadOnly { .. }));
    }

    #[test]
    fn test_root_absence_is_not_recoverable() {
        let err = HyprError::ConfigNotFound {
            path: Utf8PathBuf::from("/home/u/.config/hypr/hyprland.conf"),
        };
        assert!(!err.is_recoverable());
        assert!(HyprError::NotFound { path: "/x".into() }.is_recoverable());
    }
}
