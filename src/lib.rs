//! Uniform frame reading, position tracking and seeking over video decoders.
//!
//! A [`CaptureStream`] wraps one decoder instance from a [`CaptureBackend`] and
//! exposes it through the [`VideoStream`] contract. Whatever the backend's own
//! numbering, frame 0 means "nothing read yet" and the first frame read is
//! frame 1 at presentation time 0.

pub mod adapter;
pub mod capture;
pub mod downscale;
pub mod error;
pub mod frame;
pub mod platform;
pub mod stream;
pub mod timecode;
pub mod types;

#[cfg(test)]
mod testing;

// Re-exports
pub use adapter::*;
pub use capture::*;
pub use downscale::*;
pub use error::*;
pub use frame::*;
pub use stream::*;
pub use timecode::*;
pub use types::*;
