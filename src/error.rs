use std::path::{Path, PathBuf};

pub type PulseResult<T> = Result<T, PulseError>;

#[derive(thiserror::Error, Debug)]
pub enum PulseError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("raster error: {0}")]
    Raster(String),

    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PulseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The underlying `std::io::ErrorKind` for I/O failures.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Read a whole file as UTF-8, tagging failures with the path.
pub(crate) fn read_text(path: &Path) -> PulseResult<String> {
    std::fs::read_to_string(path).map_err(|e| PulseError::io(path, e))
}

pub(crate) fn write_text(path: &Path, text: &str) -> PulseResult<()> {
    std::fs::write(path, text).map_err(|e| PulseError::io(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> PulseResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PulseError::io(parent, e))?;
    }
    Ok(())
}
