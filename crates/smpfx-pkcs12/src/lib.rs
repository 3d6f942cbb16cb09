#![forbid(unsafe_code)]

//! Reader for PKCS#12-like SM2 key containers (`.sm2` files).
//!
//! A container holds an SM4-CBC encrypted SM2 private scalar next to the
//! DER certificate of the matching public key. The cipher key and IV are
//! the SM3 digest of the password and a fixed counter.
//!
//! Only the read path is provided; there is no MAC, no bag list and no
//! writer.

mod context;
mod parse;
mod reconstruct;

#[cfg(test)]
mod testutil;

use std::path::Path;

use base64::Engine;
use log::debug;
use smpfx_core::Error;
use smpfx_keys::Sm2PrivateKey;
use x509_cert::Certificate;
use zeroize::Zeroizing;

pub use context::{ContentEncoding, DecodeContext};
pub use parse::{parse_container, Container, PrivateKeySection, PublicKeySection};
pub use reconstruct::{Reconstructor, MAX_CONTENT_LEN, MIN_CONTENT_LEN};

/// Decode container bytes with the default context.
pub fn decode(data: &[u8], password: &str) -> Result<(Sm2PrivateKey, Certificate), Error> {
    decode_with_context(data, password, &DecodeContext::default())
}

/// Decode container bytes.
pub fn decode_with_context(
    data: &[u8],
    password: &str,
    context: &DecodeContext,
) -> Result<(Sm2PrivateKey, Certificate), Error> {
    let container = parse_container(data)?;
    Reconstructor::new(context.clone()).reconstruct(&container, password)
}

/// Decrypt an encrypted scalar blob with SM3/SM4 and the default context.
///
/// Content outside 32..=64 bytes is an [`Error::Length`].
pub fn decrypt_scalar_blob(
    password: &str,
    encrypted: &[u8],
) -> Result<Zeroizing<Vec<u8>>, Error> {
    Reconstructor::new(DecodeContext::default()).decrypt_scalar(password, encrypted)
}

/// Decode base64 container text. ASCII whitespace (line wrapping) is ignored.
pub fn decode_base64_text(text: &[u8]) -> Result<Vec<u8>, Error> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(&compact)
        .map_err(|e| Error::Base64(format!("container file is not valid base64: {e}")))
}

/// Read a base64 container file and return the DER bytes.
pub fn read_container_file(path: impl AsRef<Path>) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let text = std::fs::read(path)?;
    debug!("read {} bytes from {}", text.len(), path.display());
    decode_base64_text(&text)
}

/// Load the private key and certificate from a base64 container file.
pub fn load_from_file(
    path: impl AsRef<Path>,
    password: &str,
) -> Result<(Sm2PrivateKey, Certificate), Error> {
    load_from_file_with_context(path, password, &DecodeContext::default())
}

/// Load the private key and certificate from a base64 container file.
pub fn load_from_file_with_context(
    path: impl AsRef<Path>,
    password: &str,
    context: &DecodeContext,
) -> Result<(Sm2PrivateKey, Certificate), Error> {
    let data = read_container_file(path)?;
    decode_with_context(&data, password, context)
}

/// Load only the private key from a base64 container file.
pub fn load_private_key_from_file(
    path: impl AsRef<Path>,
    password: &str,
) -> Result<Sm2PrivateKey, Error> {
    let (key, _certificate) = load_from_file(path, password)?;
    Ok(key)
}
