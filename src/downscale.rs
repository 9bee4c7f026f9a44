use crate::error::Error;

/// Default downscale factor for a frame of at least the given width, ordered by
/// descending width.
///
/// Wider video gets proportionally more downscaling to keep per-frame cost
/// bounded. Anything narrower than the last entry is left at full resolution.
pub const DEFAULT_DOWNSCALE_FACTORS: [(u32, u32); 7] = [
    (3200, 12), // ~4k
    (2100, 8),  // ~2k
    (1700, 6),  // ~1080p
    (1200, 5),
    (900, 4), // ~720p
    (600, 3),
    (400, 2), // ~480p
];

/// Default downscale factor for video of the given frame width.
pub fn compute_downscale_factor(frame_width: u32) -> u32 {
    DEFAULT_DOWNSCALE_FACTORS
        .iter()
        .find(|&&(width, _)| frame_width >= width)
        .map_or(1, |&(_, factor)| factor)
}

/// A requested downscale factor, before validation.
///
/// Fractional values are accepted and truncated, with a warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleFactor {
    Whole(i64),
    Fractional(f64),
}

impl From<i32> for ScaleFactor {
    fn from(v: i32) -> Self {
        Self::Whole(v.into())
    }
}

impl From<i64> for ScaleFactor {
    fn from(v: i64) -> Self {
        Self::Whole(v)
    }
}

impl From<u32> for ScaleFactor {
    fn from(v: u32) -> Self {
        Self::Whole(v.into())
    }
}

impl From<f32> for ScaleFactor {
    fn from(v: f32) -> Self {
        Self::Fractional(v.into())
    }
}

impl From<f64> for ScaleFactor {
    fn from(v: f64) -> Self {
        Self::Fractional(v)
    }
}

/// Per-stream downscale setting. Always at least 1, where 1 means no scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downscale(u32);

impl Default for Downscale {
    fn default() -> Self {
        Downscale(1)
    }
}

impl Downscale {
    pub fn factor(&self) -> u32 {
        self.0
    }

    /// Validate and store a new factor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `factor` is below 1 or not finite. The
    /// stored factor is left unchanged in that case.
    pub fn set(&mut self, factor: impl Into<ScaleFactor>) -> Result<(), Error> {
        let factor = match factor.into() {
            ScaleFactor::Whole(v) if v >= 1 => v,
            ScaleFactor::Fractional(v) if v.is_finite() && v >= 1.0 => {
                if v.fract() != 0.0 {
                    tracing::warn!(factor = v, "downscale factor will be truncated to integer");
                }
                v.trunc() as i64
            }
            _ => {
                return Err(Error::InvalidArgument(
                    "downscale factor must be a positive integer >= 1",
                ));
            }
        };
        self.0 = u32::try_from(factor)
            .map_err(|_| Error::InvalidArgument("downscale factor is too large"))?;
        Ok(())
    }
}
