#![forbid(unsafe_code)]

//! Shared building blocks for the smpfx SM2 key container reader.

pub mod algorithm;
pub mod error;

pub use error::{Error, Result};
