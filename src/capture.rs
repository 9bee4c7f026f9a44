use std::fmt;
use std::path::Path;

use crate::error::Error;
use crate::frame::Frame;

/// What to open: a path (file, image sequence pattern or URL) or a capture
/// device index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Path(String),
    Device(i32),
}

impl Source {
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }

    /// Check the source before handing it to a decoder.
    ///
    /// Local paths must exist. Image sequence patterns (containing `%`) and
    /// network URIs (containing `://`) are passed through unchecked.
    ///
    /// # Errors
    ///
    /// [`Error::OpenFailure`] for a negative device index, [`Error::NotFound`]
    /// for a missing local file.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Device(index) if *index < 0 => Err(Error::OpenFailure(format!(
                "invalid/negative device index {index}"
            ))),
            Self::Device(_) => Ok(()),
            Self::Path(path) if path.contains('%') || path.contains("://") => Ok(()),
            Self::Path(path) if Path::new(path).exists() => Ok(()),
            Self::Path(path) => Err(Error::NotFound(path.clone())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Device(index) => write!(f, "Device {index}"),
        }
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for Source {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_string_lossy().into_owned())
    }
}

impl From<i32> for Source {
    fn from(index: i32) -> Self {
        Self::Device(index)
    }
}

/// Numeric properties a decoder reports through [`VideoCapture::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CaptureProperty {
    FrameWidth,
    FrameHeight,
    FrameCount,
    Fps,
    /// Four-character code of the codec. Zero when detection failed.
    Fourcc,
    /// Index of the next frame to be grabbed, i.e. the number grabbed so far.
    PosFrames,
    /// Presentation time of the last grabbed frame.
    PosMsec,
    SarNum,
    SarDen,
}

/// One open instance of an underlying decoding library.
///
/// Positions are native: `PosFrames` counts frames grabbed so far, so it reads
/// 1 after the first grab. Setting `PosFrames` to `n` makes the next grab yield
/// the frame with zero-based index `n`. `PosMsec` is only reliable after a grab
/// that follows such a set.
pub trait VideoCapture {
    type Frame: Frame;

    fn is_opened(&self) -> Result<bool, Error>;
    fn get(&self, property: CaptureProperty) -> Result<f64, Error>;
    /// Returns whether the decoder accepted the value.
    fn set(&mut self, property: CaptureProperty, value: f64) -> Result<bool, Error>;
    /// Advance to the next frame without decoding it.
    fn grab(&mut self) -> Result<bool, Error>;
    /// Decode the most recently grabbed frame.
    fn retrieve(&mut self) -> Result<Option<Self::Frame>, Error>;
    fn release(&mut self) -> Result<(), Error>;
}

/// Creates [`VideoCapture`] instances for a source.
pub trait CaptureBackend {
    type Capture: VideoCapture;

    /// Instantiate a decoder for `source`. A decoder that instantiates but
    /// reports itself not opened is returned as-is; the caller checks
    /// [`VideoCapture::is_opened`].
    fn open(&self, source: &Source) -> Result<Self::Capture, Error>;
}
