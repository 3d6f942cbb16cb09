#![forbid(unsafe_code)]

//! Key types for the smpfx SM2 key container reader.
//!
//! [`Sm2PrivateKey`] pairs a recovered private scalar with the public key
//! taken from the container's certificate; [`x509`] extracts that public key.

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
pub mod key;
pub mod x509;

pub use key::Sm2PrivateKey;
