#![forbid(unsafe_code)]

/// Errors produced while reading an SM2 key container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed container: {0}")]
    Format(String),

    #[error("private key content is {0} bytes, expected 32..=64")]
    Length(usize),

    #[error("decryption error: {0}")]
    Decryption(String),

    #[error("certificate error: {0}")]
    Certificate(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("cryptographic error: {0}")]
    Crypto(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("base64 decode error: {0}")]
    Base64(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
