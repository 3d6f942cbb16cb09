#![forbid(unsafe_code)]

//! Cryptographic building blocks for reading SM2 key containers.
//!
//! Both the hash behind the key derivation and the block cipher behind the
//! CBC decryption are type parameters. The `sm3`/`sm4` defaults match the
//! container format; other RustCrypto primitives plug in the same way.

pub mod cipher;
pub mod kdf;

pub use kdf::{derive_key, derive_key_with, DerivedKeyMaterial};
