use std::fmt;
use std::path::PathBuf;

/// Errors reported by controller backends and the input configuration.
#[derive(Debug)]
pub enum InputError {
    /// An IO error occurred while reading or writing input data.
    Io(std::io::Error),
    /// A recording file could not be opened.
    RecordingUnavailable { path: PathBuf, source: std::io::Error },
    /// A recording ended inside its header.
    TruncatedHeader { expected: usize, found: usize },
    /// The input configuration could not be read or parsed.
    Config(String),
    /// A backend could not start on this host.
    BackendUnavailable(&'static str),
    /// Polling was requested before [`ControllerRegistry::init`](crate::ControllerRegistry::init).
    NotInitialized,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "IO error: {err}"),
            InputError::RecordingUnavailable { path, source } => {
                write!(f, "cannot open recording {}: {source}", path.display())
            }
            InputError::TruncatedHeader { expected, found } => {
                write!(f, "recording header truncated: {found} of {expected} bytes")
            }
            InputError::Config(reason) => write!(f, "invalid input config: {reason}"),
            InputError::BackendUnavailable(name) => write!(f, "backend unavailable: {name}"),
            InputError::NotInitialized => write!(f, "controllers not initialized"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            InputError::RecordingUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        InputError::Io(err)
    }
}
