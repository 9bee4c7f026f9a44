use core::fmt;

/// Platform-specific error details.
///
/// Failures reported by the underlying decoder library are preserved as-is
/// where the library has its own error type (e.g. `opencv::Error`). Use
/// [`Display`](fmt::Display) to obtain a human-readable description.
#[derive(Debug)]
#[non_exhaustive]
pub enum PlatformError {
    Message(String),
    #[cfg(feature = "opencv")]
    OpenCv(opencv::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            #[cfg(feature = "opencv")]
            Self::OpenCv(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "opencv")]
            Self::OpenCv(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for PlatformError {
    fn from(e: opencv::Error) -> Self {
        Self::OpenCv(e)
    }
}

/// Top-level crate error.
///
/// Reaching the end of a stream is not an error: reads report it as `Ok(None)`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The decoder could not be opened, reported an unusable frame rate, or was
    /// given an invalid device index.
    OpenFailure(String),
    /// A local file path did not exist. Checked before the decoder is invoked.
    NotFound(String),
    /// Seeking is unsupported by this source, or repositioning failed.
    SeekFailure(&'static str),
    /// A caller-supplied value violated its precondition.
    InvalidArgument(&'static str),
    /// `position_ms` was queried after `seek` without an advancing `read` in between.
    StaleState,
    Platform(PlatformError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailure(msg) => write!(f, "failed to open video: {msg}"),
            Self::NotFound(path) => write!(f, "video file not found: {path}"),
            Self::SeekFailure(msg) => write!(f, "seek failed: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::StaleState => f.write_str(
                "presentation time is unavailable after seek until a frame is read with advance",
            ),
            Self::Platform(e) => write!(f, "platform error: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for Error {
    fn from(e: opencv::Error) -> Self {
        Self::Platform(PlatformError::OpenCv(e))
    }
}
