#![forbid(unsafe_code)]

//! Decode context: configuration for reading a container.

/// How the private key content is interpreted before decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    /// Content whose length is neither 32 nor 48 bytes is base64-decoded
    /// when it is valid standard base64; anything else is used raw.
    #[default]
    Auto,
    /// Always decrypt the raw content bytes.
    Raw,
}

/// Context for container decoding.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    /// Treatment of the private key content.
    pub content_encoding: ContentEncoding,
    /// Require `d·G` to equal the certificate's public key.
    pub verify_key_pair: bool,
    /// Require the SM2_Data / SM4_CBC algorithm identifiers.
    pub strict_algorithms: bool,
}

impl DecodeContext {
    /// Create a context with the permissive defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.content_encoding = encoding;
        self
    }

    pub fn with_verify_key_pair(mut self, verify: bool) -> Self {
        self.verify_key_pair = verify;
        self
    }

    pub fn with_strict_algorithms(mut self, strict: bool) -> Self {
        self.strict_algorithms = strict;
        self
    }
}
