/// Pixel layouts a decoder may hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    Bgr24,
    Bgra32,
    Gray8,
    Nv12,
    Yuv420p,
}

impl PixelFormat {
    /// Number of separately stored planes.
    pub fn plane_count(&self) -> usize {
        match self {
            Self::Bgr24 | Self::Bgra32 | Self::Gray8 => 1,
            Self::Nv12 => 2,
            Self::Yuv420p => 3,
        }
    }
}

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Both dimensions divided by `factor`, truncating.
    pub fn scaled_down(&self, factor: u32) -> Size {
        let factor = factor.max(1);
        Size {
            width: self.width / factor,
            height: self.height / factor,
        }
    }
}

/// Configuration for opening a video stream.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Assume this frame rate instead of asking the decoder. Useful for
    /// sources that report no rate, or a wrong one.
    pub frame_rate: Option<f64>,
}

impl StreamConfig {
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }
}
