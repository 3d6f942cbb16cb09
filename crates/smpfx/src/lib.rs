#![forbid(unsafe_code)]

pub use smpfx_core as core;
pub use smpfx_crypto as crypto;
pub use smpfx_keys as keys;
pub use smpfx_pkcs12 as pkcs12;

pub use smpfx_core::{Error, Result};
pub use smpfx_keys::Sm2PrivateKey;
pub use smpfx_pkcs12::{
    decode, decode_with_context, decrypt_scalar_blob, load_from_file, load_private_key_from_file,
    ContentEncoding, DecodeContext,
};
