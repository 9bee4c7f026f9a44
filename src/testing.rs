//! Scripted in-memory decoder for tests.
//!
//! Mirrors OpenCV capture semantics: `PosFrames` is the index of the next frame
//! to grab, and `PosMsec` only moves when a frame is grabbed.

use std::cell::Cell;
use std::rc::Rc;

use crate::capture::{CaptureBackend, CaptureProperty, Source, VideoCapture};
use crate::error::Error;
use crate::frame::FrameBuffer;
use crate::types::{PixelFormat, Size};

#[derive(Clone)]
pub(crate) struct FakeBackend {
    pub frames: u64,
    pub fps: f64,
    pub size: Size,
    pub fourcc: f64,
    pub sar: (f64, f64),
    pub start_pts_ms: f64,
    /// Whether decoders report themselves opened.
    pub openable: bool,
    /// Whether decoders after the first report themselves opened.
    pub reopenable: bool,
    /// Whether decoders accept position changes.
    pub positionable: bool,
    pub opens: Rc<Cell<u32>>,
    pub releases: Rc<Cell<u32>>,
}

impl FakeBackend {
    pub fn new(frames: u64, fps: f64) -> Self {
        FakeBackend {
            frames,
            fps,
            size: Size {
                width: 64,
                height: 48,
            },
            fourcc: f64::from(u32::from_le_bytes(*b"avc1")),
            sar: (0.0, 0.0),
            start_pts_ms: 0.0,
            openable: true,
            reopenable: true,
            positionable: true,
            opens: Rc::new(Cell::new(0)),
            releases: Rc::new(Cell::new(0)),
        }
    }
}

impl CaptureBackend for FakeBackend {
    type Capture = FakeCapture;

    fn open(&self, _source: &Source) -> Result<FakeCapture, Error> {
        let first = self.opens.get() == 0;
        self.opens.set(self.opens.get() + 1);
        Ok(FakeCapture {
            config: self.clone(),
            opened: self.openable && (first || self.reopenable),
            pos: 0,
            pts_ms: 0.0,
            grabbed: None,
            set_calls: 0,
            grab_calls: 0,
        })
    }
}

pub(crate) struct FakeCapture {
    config: FakeBackend,
    opened: bool,
    pos: u64,
    pts_ms: f64,
    grabbed: Option<u64>,
    pub set_calls: u32,
    pub grab_calls: u32,
}

impl VideoCapture for FakeCapture {
    type Frame = FrameBuffer;

    fn is_opened(&self) -> Result<bool, Error> {
        Ok(self.opened)
    }

    fn get(&self, property: CaptureProperty) -> Result<f64, Error> {
        if !self.opened {
            return Ok(0.0);
        }
        let c = &self.config;
        Ok(match property {
            CaptureProperty::FrameWidth => c.size.width.into(),
            CaptureProperty::FrameHeight => c.size.height.into(),
            CaptureProperty::FrameCount => c.frames as f64,
            CaptureProperty::Fps => c.fps,
            CaptureProperty::Fourcc => c.fourcc,
            CaptureProperty::PosFrames => self.pos as f64,
            CaptureProperty::PosMsec => self.pts_ms,
            CaptureProperty::SarNum => c.sar.0,
            CaptureProperty::SarDen => c.sar.1,
        })
    }

    fn set(&mut self, property: CaptureProperty, value: f64) -> Result<bool, Error> {
        self.set_calls += 1;
        let accepted = self.config.positionable && property == CaptureProperty::PosFrames;
        if !self.opened || !accepted {
            return Ok(false);
        }
        self.pos = (value.max(0.0) as u64).min(self.config.frames);
        self.grabbed = None;
        Ok(true)
    }

    fn grab(&mut self) -> Result<bool, Error> {
        self.grab_calls += 1;
        if !self.opened || self.pos >= self.config.frames {
            return Ok(false);
        }
        self.grabbed = Some(self.pos);
        self.pts_ms = self.config.start_pts_ms + self.pos as f64 * 1000.0 / self.config.fps;
        self.pos += 1;
        Ok(true)
    }

    /// Frames are filled with their zero-based index (mod 256).
    fn retrieve(&mut self) -> Result<Option<FrameBuffer>, Error> {
        let Some(index) = self.grabbed.filter(|_| self.opened) else {
            return Ok(None);
        };
        let size = self.config.size;
        let mut frame = FrameBuffer::new(PixelFormat::Gray8, size);
        let len = size.width as usize * size.height as usize;
        frame
            .push_plane(vec![index as u8; len], size.width as usize)
            .map_err(|_| Error::Platform(crate::error::PlatformError::Message("full".into())))?;
        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<(), Error> {
        if self.opened {
            self.config.releases.set(self.config.releases.get() + 1);
        }
        self.opened = false;
        self.pos = 0;
        self.grabbed = None;
        Ok(())
    }
}
