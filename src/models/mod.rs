//! Data Models
//!
//! Contains the in-memory editor structures and built-in preset scales.

pub mod draft;
pub mod preset;

pub use draft::*;
pub use preset::*;
