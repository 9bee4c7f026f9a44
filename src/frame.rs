use arrayvec::ArrayVec;

use crate::types::{PixelFormat, Size};

/// Maximum number of planes held by a [`FrameBuffer`].
pub const MAX_PLANES: usize = 4;

/// A single plane of image data.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub bytes_per_row: usize,
}

/// A decoded video frame, as returned by a stream's `read`.
pub trait Frame {
    fn pixel_format(&self) -> PixelFormat;
    fn size(&self) -> Size;
    fn plane_count(&self) -> usize;
    /// Borrow plane `index`, or `None` past the last plane.
    fn plane(&self, index: usize) -> Option<Plane<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlaneData {
    data: Vec<u8>,
    bytes_per_row: usize,
}

/// An owned frame with up to [`MAX_PLANES`] planes stored inline.
///
/// For backends that copy decoded pixels out of the decoder rather than handing
/// out a native image type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixel_format: PixelFormat,
    size: Size,
    planes: ArrayVec<PlaneData, MAX_PLANES>,
}

impl FrameBuffer {
    pub fn new(pixel_format: PixelFormat, size: Size) -> Self {
        FrameBuffer {
            pixel_format,
            size,
            planes: ArrayVec::new(),
        }
    }

    /// Append a plane. Returns the plane back if the buffer already holds as
    /// many planes as its pixel format has.
    pub fn push_plane(&mut self, data: Vec<u8>, bytes_per_row: usize) -> Result<(), Vec<u8>> {
        if self.planes.len() >= self.pixel_format.plane_count() {
            return Err(data);
        }
        self.planes
            .try_push(PlaneData {
                data,
                bytes_per_row,
            })
            .map_err(|e| e.element().data)
    }
}

impl Frame for FrameBuffer {
    fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn size(&self) -> Size {
        self.size
    }

    fn plane_count(&self) -> usize {
        self.planes.len()
    }

    fn plane(&self, index: usize) -> Option<Plane<'_>> {
        self.planes.get(index).map(|p| Plane {
            data: &p.data,
            bytes_per_row: p.bytes_per_row,
        })
    }
}
