use ::opencv::core::Mat;
use ::opencv::prelude::*;
use ::opencv::videoio;

use crate::capture::{CaptureBackend, CaptureProperty, Source, VideoCapture};
use crate::error::Error;
use crate::platform::opencv::frame::MatFrame;

fn property_id(property: CaptureProperty) -> i32 {
    match property {
        CaptureProperty::FrameWidth => videoio::CAP_PROP_FRAME_WIDTH,
        CaptureProperty::FrameHeight => videoio::CAP_PROP_FRAME_HEIGHT,
        CaptureProperty::FrameCount => videoio::CAP_PROP_FRAME_COUNT,
        CaptureProperty::Fps => videoio::CAP_PROP_FPS,
        CaptureProperty::Fourcc => videoio::CAP_PROP_FOURCC,
        CaptureProperty::PosFrames => videoio::CAP_PROP_POS_FRAMES,
        CaptureProperty::PosMsec => videoio::CAP_PROP_POS_MSEC,
        CaptureProperty::SarNum => videoio::CAP_PROP_SAR_NUM,
        CaptureProperty::SarDen => videoio::CAP_PROP_SAR_DEN,
    }
}

/// Opens sources with `cv::VideoCapture`.
#[derive(Debug, Clone, Copy)]
pub struct OpencvBackend {
    /// Preferred capture API (`videoio::CAP_*`). `CAP_ANY` lets OpenCV choose.
    pub api_preference: i32,
}

impl Default for OpencvBackend {
    fn default() -> Self {
        OpencvBackend {
            api_preference: videoio::CAP_ANY,
        }
    }
}

impl CaptureBackend for OpencvBackend {
    type Capture = OpencvCapture;

    fn open(&self, source: &Source) -> Result<OpencvCapture, Error> {
        let inner = match source {
            Source::Path(path) => videoio::VideoCapture::from_file(path, self.api_preference)?,
            Source::Device(index) => videoio::VideoCapture::new(*index, self.api_preference)?,
        };
        Ok(OpencvCapture { inner })
    }
}

/// An open `cv::VideoCapture`.
pub struct OpencvCapture {
    inner: videoio::VideoCapture,
}

impl OpencvCapture {
    /// Access the underlying `VideoCapture`.
    pub fn video_capture(&self) -> &videoio::VideoCapture {
        &self.inner
    }
}

impl VideoCapture for OpencvCapture {
    type Frame = MatFrame;

    fn is_opened(&self) -> Result<bool, Error> {
        Ok(self.inner.is_opened()?)
    }

    fn get(&self, property: CaptureProperty) -> Result<f64, Error> {
        Ok(self.inner.get(property_id(property))?)
    }

    fn set(&mut self, property: CaptureProperty, value: f64) -> Result<bool, Error> {
        Ok(self.inner.set(property_id(property), value)?)
    }

    fn grab(&mut self) -> Result<bool, Error> {
        Ok(self.inner.grab()?)
    }

    fn retrieve(&mut self) -> Result<Option<MatFrame>, Error> {
        let mut mat = Mat::default();
        if !self.inner.retrieve(&mut mat, 0)? || mat.empty() {
            return Ok(None);
        }
        Ok(Some(MatFrame::new(mat)))
    }

    fn release(&mut self) -> Result<(), Error> {
        Ok(self.inner.release()?)
    }
}
