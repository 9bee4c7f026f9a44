//! OpenCV `VideoCapture` backend.
//!
//! ```no_run
//! use video_stream::platform::opencv::OpencvBackend;
//! use video_stream::{CaptureStream, StreamConfig, VideoStream};
//!
//! let config = StreamConfig::default();
//! let mut stream = CaptureStream::open(OpencvBackend::default(), "video.mp4", &config)?;
//! stream.downscale_auto()?;
//! while let Some(_frame) = stream.next_frame()? {
//!     println!("{}", stream.position()?);
//! }
//! # Ok::<(), video_stream::Error>(())
//! ```

pub mod capture;
pub mod frame;

pub use capture::{OpencvBackend, OpencvCapture};
pub use frame::MatFrame;
