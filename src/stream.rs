use crate::downscale::{Downscale, ScaleFactor, compute_downscale_factor};
use crate::error::Error;
use crate::frame::Frame;
use crate::timecode::Timecode;
use crate::types::Size;

/// Where to seek to. The interpretation depends on the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Absolute zero-based position.
    Timecode(Timecode),
    /// Presentation time in seconds. Must not be negative.
    Seconds(f64),
    /// One-based frame number, so `1` is the first frame. `0` rewinds to the
    /// start without reading anything.
    Frame(i64),
}

impl From<Timecode> for SeekTarget {
    fn from(tc: Timecode) -> Self {
        Self::Timecode(tc)
    }
}

impl From<f32> for SeekTarget {
    fn from(secs: f32) -> Self {
        Self::Seconds(secs.into())
    }
}

impl From<f64> for SeekTarget {
    fn from(secs: f64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<i32> for SeekTarget {
    fn from(frame: i32) -> Self {
        Self::Frame(frame.into())
    }
}

impl From<i64> for SeekTarget {
    fn from(frame: i64) -> Self {
        Self::Frame(frame)
    }
}

impl From<u32> for SeekTarget {
    fn from(frame: u32) -> Self {
        Self::Frame(frame.into())
    }
}

/// Pull-based access to a video source, independent of the decoder behind it.
///
/// Frame numbering is uniform across implementations: `frame_number` is 0
/// until the first frame is read, and the first frame read reports
/// `frame_number == 1` and a `position` equal to [`base_timecode`].
///
/// Implementations are not synchronised; drive each stream from one caller.
///
/// [`base_timecode`]: VideoStream::base_timecode
pub trait VideoStream {
    type Frame: Frame;

    /// Video path, or a `Device N` label for capture devices.
    fn path(&self) -> &str;
    fn is_seekable(&self) -> bool;
    /// Frames per second.
    fn frame_rate(&self) -> f64;
    /// Length of the stream, or `None` if it does not terminate (e.g. a camera).
    fn duration(&self) -> Result<Option<Timecode>, Error>;
    fn frame_size(&self) -> Result<Size, Error>;
    /// Display/pixel aspect ratio, where 1.0 means square pixels.
    fn aspect_ratio(&self) -> Result<f64, Error>;
    /// Current position as a presentation timestamp, so frame 1 maps to time 0.
    /// Equal to [`base_timecode`](VideoStream::base_timecode) before any read.
    fn position(&self) -> Result<Timecode, Error>;
    /// Presentation time of the current frame in milliseconds.
    ///
    /// # Errors
    ///
    /// [`Error::StaleState`] between a `seek` and the next advancing `read`.
    fn position_ms(&self) -> Result<f64, Error>;
    /// Number of frames read so far, reflecting seeks immediately.
    fn frame_number(&self) -> Result<u64, Error>;

    fn scaling(&self) -> &Downscale;
    fn scaling_mut(&mut self) -> &mut Downscale;

    /// Read the next frame (`advance`), the current one (`!advance`), or
    /// nothing at all.
    ///
    /// `Ok(None)` is returned when `decode` is false, at the end of the stream,
    /// or when no frame has been grabbed yet. Which of these applies follows
    /// from the flags passed. The frame read with `advance == false` right after
    /// a seek is unspecified.
    fn read(&mut self, decode: bool, advance: bool) -> Result<Option<Self::Frame>, Error>;

    /// Close and re-open the source. Observably equivalent to seeking to 0.
    fn reset(&mut self) -> Result<(), Error>;

    /// Move to `target`. Position-derived properties are undefined until the
    /// next `read` with `advance == true`.
    ///
    /// # Errors
    ///
    /// [`Error::SeekFailure`] if the source cannot seek, [`Error::InvalidArgument`]
    /// for a negative target.
    fn seek(&mut self, target: SeekTarget) -> Result<(), Error>;

    /// Shorthand for `read(true, true)`.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, Error> {
        self.read(true, true)
    }

    fn downscale(&self) -> u32 {
        self.scaling().factor()
    }

    /// Set the downscale factor. Fractional factors are truncated with a warning.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `factor` is below 1.
    fn set_downscale(&mut self, factor: ScaleFactor) -> Result<(), Error> {
        self.scaling_mut().set(factor)
    }

    /// Pick the downscale factor from the frame width.
    fn downscale_auto(&mut self) -> Result<(), Error> {
        let width = self.frame_size()?.width;
        self.set_downscale(ScaleFactor::Whole(compute_downscale_factor(width).into()))
    }

    /// Frame size after downscaling.
    fn frame_size_effective(&self) -> Result<Size, Error> {
        Ok(self.frame_size()?.scaled_down(self.downscale()))
    }

    /// Zero position at this stream's frame rate.
    fn base_timecode(&self) -> Timecode {
        Timecode::at_frame(0, self.frame_rate())
    }
}
