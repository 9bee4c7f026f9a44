use ::opencv::core::{CV_8UC1, CV_8UC4, Mat};
use ::opencv::prelude::*;

use crate::frame::{Frame, Plane};
use crate::types::{PixelFormat, Size};

/// A frame decoded by OpenCV, stored as a single interleaved `Mat`.
pub struct MatFrame {
    mat: Mat,
    pixel_format: PixelFormat,
}

impl MatFrame {
    pub(crate) fn new(mat: Mat) -> Self {
        let pixel_format = match mat.typ() {
            CV_8UC1 => PixelFormat::Gray8,
            CV_8UC4 => PixelFormat::Bgra32,
            // VideoCapture converts to BGR unless told otherwise
            _ => PixelFormat::Bgr24,
        };
        MatFrame { mat, pixel_format }
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn into_mat(self) -> Mat {
        self.mat
    }
}

impl Frame for MatFrame {
    fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn size(&self) -> Size {
        Size {
            width: self.mat.cols().max(0) as u32,
            height: self.mat.rows().max(0) as u32,
        }
    }

    fn plane_count(&self) -> usize {
        1
    }

    fn plane(&self, index: usize) -> Option<Plane<'_>> {
        if index != 0 || !self.mat.is_continuous() {
            return None;
        }
        let data = self.mat.data_bytes().ok()?;
        let rows = self.mat.rows().max(1) as usize;
        Some(Plane {
            data,
            bytes_per_row: data.len() / rows,
        })
    }
}
