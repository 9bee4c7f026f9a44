use core::fmt;
use core::ops::{Add, Sub};

/// Lowest frame rate a stream may report before it is considered unusable.
///
/// Anything at or below this is treated as "no rate available" when a stream is
/// opened, which keeps frame/time conversions away from a division by zero.
pub const MINIMUM_FRAMES_PER_SECOND: f64 = 1.0 / 1000.0;

/// An immutable position within a stream, expressed as a zero-based frame
/// number at a fixed frame rate.
///
/// Timecodes are never mutated; offsets produce new values:
///
/// ```
/// use video_stream::Timecode;
///
/// let base = Timecode::at_frame(0, 25.0);
/// let later = base + 50;
/// assert_eq!(later.to_frames(), 50);
/// assert_eq!(later.to_seconds(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timecode {
    frame_number: i64,
    frame_rate: f64,
}

impl Timecode {
    /// Timecode for zero-based frame `frame_number`. Negative frames are allowed
    /// and represent a position before the start of the stream.
    pub const fn at_frame(frame_number: i64, frame_rate: f64) -> Self {
        Timecode {
            frame_number,
            frame_rate,
        }
    }

    /// Timecode for the frame presented at `seconds`, rounded to the nearest frame.
    pub fn from_seconds(seconds: f64, frame_rate: f64) -> Self {
        Timecode {
            frame_number: (seconds * frame_rate).round() as i64,
            frame_rate,
        }
    }

    pub fn to_frames(&self) -> i64 {
        self.frame_number
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn to_seconds(&self) -> f64 {
        self.frame_number as f64 / self.frame_rate
    }

    /// The same instant expressed at another frame rate.
    pub fn at_rate(&self, frame_rate: f64) -> Self {
        if self.frame_rate == frame_rate {
            return *self;
        }
        Timecode::from_seconds(self.to_seconds(), frame_rate)
    }
}

impl Add<i64> for Timecode {
    type Output = Timecode;

    fn add(self, offset: i64) -> Timecode {
        Timecode {
            frame_number: self.frame_number.saturating_add(offset),
            frame_rate: self.frame_rate,
        }
    }
}

impl Sub<i64> for Timecode {
    type Output = Timecode;

    fn sub(self, offset: i64) -> Timecode {
        Timecode {
            frame_number: self.frame_number.saturating_sub(offset),
            frame_rate: self.frame_rate,
        }
    }
}

/// Sum of two timecodes. The right-hand side is converted to the left-hand
/// side's frame rate first.
impl Add<Timecode> for Timecode {
    type Output = Timecode;

    fn add(self, other: Timecode) -> Timecode {
        self + other.at_rate(self.frame_rate).frame_number
    }
}

/// Formats as `HH:MM:SS.mmm`. Negative timecodes are prefixed with `-`.
impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.to_seconds();
        let sign = if seconds < 0.0 { "-" } else { "" };
        let total_ms = (seconds.abs() * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms / 60_000) % 60;
        let secs = (total_ms / 1000) % 60;
        let millis = total_ms % 1000;
        write!(f, "{sign}{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
    }
}
