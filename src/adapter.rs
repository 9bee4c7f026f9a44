use crate::capture::{CaptureBackend, CaptureProperty, Source, VideoCapture};
use crate::downscale::Downscale;
use crate::error::Error;
use crate::stream::{SeekTarget, VideoStream};
use crate::timecode::{MINIMUM_FRAMES_PER_SECOND, Timecode};
use crate::types::{Size, StreamConfig};

const ASPECT_RATIO_EPSILON: f64 = 0.0001;

/// Read/seek state of a [`CaptureStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Nothing has been grabbed at the current position.
    Initial,
    /// The last advancing read grabbed a frame.
    Positioned,
    /// A seek happened since the last advancing read. `grabbed` tells whether
    /// the seek left a frame ready to retrieve.
    SeekPending { grabbed: bool },
}

impl ReadState {
    pub fn has_grabbed(self) -> bool {
        matches!(self, Self::Positioned | Self::SeekPending { grabbed: true })
    }

    pub fn has_seeked(self) -> bool {
        matches!(self, Self::SeekPending { .. })
    }

    /// State after an advancing read whose grab failed.
    fn settled(self) -> Self {
        match self {
            Self::SeekPending { grabbed: true } => Self::Positioned,
            Self::SeekPending { grabbed: false } => Self::Initial,
            other => other,
        }
    }
}

/// A [`VideoStream`] that drives one decoder instance from a [`CaptureBackend`].
///
/// The decoder is released when the stream is dropped.
pub struct CaptureStream<B: CaptureBackend> {
    backend: B,
    source: Source,
    path: String,
    capture: B::Capture,
    frame_rate: f64,
    state: ReadState,
    scaling: Downscale,
}

impl<B: CaptureBackend> CaptureStream<B> {
    /// Open `source` with `backend`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if a local file does not exist. The backend is not
    ///   invoked in that case.
    /// - [`Error::OpenFailure`] for a negative device index, a decoder that
    ///   fails to open, or an unusable frame rate with no override.
    /// - [`Error::InvalidArgument`] for a non-positive frame rate override.
    pub fn open(
        backend: B,
        source: impl Into<Source>,
        config: &StreamConfig,
    ) -> Result<Self, Error> {
        let source = source.into();
        if let Some(rate) = config.frame_rate {
            if !(rate.is_finite() && rate > MINIMUM_FRAMES_PER_SECOND) {
                return Err(Error::InvalidArgument(
                    "frame rate override must be a positive, finite number",
                ));
            }
        }

        let (capture, frame_rate) = open_capture(&backend, &source, config.frame_rate)?;
        tracing::info!(path = %source, frame_rate, "opened video");

        Ok(CaptureStream {
            backend,
            path: source.to_string(),
            source,
            capture,
            frame_rate,
            state: ReadState::Initial,
            scaling: Downscale::default(),
        })
    }

    /// The underlying decoder. Positioning or reading through it directly leaves
    /// this stream in an inconsistent state, hence read-only access.
    pub fn capture(&self) -> &B::Capture {
        &self.capture
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    fn set_position(&mut self, native_frame: i64) -> Result<(), Error> {
        if !self
            .capture
            .set(CaptureProperty::PosFrames, native_frame as f64)?
        {
            return Err(Error::SeekFailure("decoder rejected the target position"));
        }
        Ok(())
    }

    /// Zero-based frame index `target` resolves to, before any decoder access.
    fn resolve_target(&self, target: SeekTarget) -> Result<i64, Error> {
        match target {
            SeekTarget::Frame(frame) if frame < 1 => {
                Err(Error::InvalidArgument("target frame number must start from 1"))
            }
            SeekTarget::Frame(frame) => Ok(frame - 1),
            SeekTarget::Seconds(secs) if !(secs >= 0.0) => Err(Error::InvalidArgument(
                "target time in seconds must not be negative",
            )),
            SeekTarget::Seconds(secs) => {
                Ok(Timecode::from_seconds(secs, self.frame_rate).to_frames())
            }
            SeekTarget::Timecode(tc) => {
                let frames = tc.at_rate(self.frame_rate).to_frames();
                if frames < 0 {
                    return Err(Error::InvalidArgument("target timecode must not be negative"));
                }
                Ok(frames)
            }
        }
    }
}

fn open_capture<B: CaptureBackend>(
    backend: &B,
    source: &Source,
    frame_rate: Option<f64>,
) -> Result<(B::Capture, f64), Error> {
    source.validate()?;

    let mut capture = backend.open(source)?;
    if !capture.is_opened()? {
        let _ = capture.release();
        return Err(Error::OpenFailure(format!(
            "decoder reported not opened for {source}"
        )));
    }

    if capture.get(CaptureProperty::Fourcc)?.abs().trunc() == 0.0 {
        tracing::error!(
            path = %source,
            "video codec detection failed, output may be incorrect; \
             consider re-encoding the source material"
        );
    }

    let frame_rate = match frame_rate {
        Some(rate) => rate,
        None => {
            let rate = capture.get(CaptureProperty::Fps)?;
            if !(rate > MINIMUM_FRAMES_PER_SECOND) {
                let _ = capture.release();
                return Err(Error::OpenFailure(format!(
                    "unable to obtain a frame rate for {source} (got {rate}); \
                     set one explicitly in the stream config"
                )));
            }
            rate
        }
    };

    Ok((capture, frame_rate))
}

impl<B: CaptureBackend> VideoStream for CaptureStream<B> {
    type Frame = <B::Capture as VideoCapture>::Frame;

    fn path(&self) -> &str {
        &self.path
    }

    fn is_seekable(&self) -> bool {
        !self.source.is_device()
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn duration(&self) -> Result<Option<Timecode>, Error> {
        if self.source.is_device() {
            return Ok(None);
        }
        let frames = self.capture.get(CaptureProperty::FrameCount)?.trunc() as i64;
        Ok(Some(self.base_timecode() + frames))
    }

    fn frame_size(&self) -> Result<Size, Error> {
        Ok(Size {
            width: self.capture.get(CaptureProperty::FrameWidth)?.trunc() as u32,
            height: self.capture.get(CaptureProperty::FrameHeight)?.trunc() as u32,
        })
    }

    fn aspect_ratio(&self) -> Result<f64, Error> {
        let mut num = self.capture.get(CaptureProperty::SarNum)?;
        let den = self.capture.get(CaptureProperty::SarDen)?;
        if num.abs() < ASPECT_RATIO_EPSILON {
            num = 1.0;
        }
        if den.abs() < ASPECT_RATIO_EPSILON {
            return Ok(1.0);
        }
        Ok(num / den)
    }

    fn position(&self) -> Result<Timecode, Error> {
        let frame_number = self.frame_number()?;
        if frame_number < 1 {
            return Ok(self.base_timecode());
        }
        Ok(self.base_timecode() + (frame_number as i64 - 1))
    }

    fn position_ms(&self) -> Result<f64, Error> {
        if self.state.has_seeked() {
            return Err(Error::StaleState);
        }
        self.capture.get(CaptureProperty::PosMsec)
    }

    fn frame_number(&self) -> Result<u64, Error> {
        Ok(self.capture.get(CaptureProperty::PosFrames)?.trunc() as u64)
    }

    fn scaling(&self) -> &Downscale {
        &self.scaling
    }

    fn scaling_mut(&mut self) -> &mut Downscale {
        &mut self.scaling
    }

    fn read(&mut self, decode: bool, advance: bool) -> Result<Option<Self::Frame>, Error> {
        if !self.capture.is_opened()? {
            return Ok(None);
        }
        if advance {
            if !self.capture.grab()? {
                tracing::debug!(path = %self.path, "no frame grabbed, end of stream");
                self.state = self.state.settled();
                return Ok(None);
            }
            self.state = ReadState::Positioned;
        }
        if decode && self.state.has_grabbed() {
            return self.capture.retrieve();
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<(), Error> {
        tracing::debug!(path = %self.path, "resetting stream");
        self.capture.release()?;
        self.state = ReadState::Initial;
        let (capture, _) = open_capture(&self.backend, &self.source, Some(self.frame_rate))?;
        self.capture = capture;
        Ok(())
    }

    fn seek(&mut self, target: SeekTarget) -> Result<(), Error> {
        if self.source.is_device() {
            return Err(Error::SeekFailure("cannot seek if input is a device"));
        }

        // Frame-based and time-based seeks to the start land one frame apart in
        // most decoders, so rewinding bypasses the timecode path entirely.
        if target == SeekTarget::Frame(0) {
            self.state = ReadState::SeekPending { grabbed: false };
            self.set_position(0)?;
            self.state = ReadState::Initial;
            tracing::debug!(path = %self.path, "rewound to start");
            return Ok(());
        }

        let target = self.base_timecode() + self.resolve_target(target)?;
        let mut native = target.to_frames();

        // Past the end behaves like a seek to the last frame. Sources that
        // report no frame count are positioned as asked.
        let frame_count = self.capture.get(CaptureProperty::FrameCount)?.trunc() as i64;
        if frame_count > 0 && native >= frame_count {
            native = frame_count - 1;
        }
        tracing::debug!(path = %self.path, %target, native, "seeking");

        // Any decoder failure from here on leaves position-derived state undefined.
        self.state = ReadState::SeekPending { grabbed: false };

        // Position on the frame preceding the target and grab it: decoders only
        // report a valid presentation time after a grab following a position
        // change, and the next advancing read then yields the target itself.
        let grabbed = if native > 0 {
            self.set_position(native - 1)?;
            self.capture.grab()?
        } else {
            self.set_position(0)?;
            false
        };

        self.state = ReadState::SeekPending { grabbed };
        Ok(())
    }
}

impl<B: CaptureBackend> Drop for CaptureStream<B> {
    fn drop(&mut self) {
        let _ = self.capture.release();
    }
}
