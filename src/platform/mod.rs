//! Bindings to concrete decoding libraries.

#[cfg(feature = "opencv")]
pub mod opencv;
