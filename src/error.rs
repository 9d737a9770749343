use std::path::PathBuf;

/// Errors raised by table loading, figure management and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input row. `line` is 1-based; 0 means the file had no header.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{operation}: no active figure, call create_figure() first")]
    NoActiveFigure { operation: &'static str },

    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported output format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("invalid plotter configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("viewer failed: {0}")]
    Viewer(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Error::Render {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Create `path` and all missing parents.
pub(crate) fn ensure_dir(path: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
