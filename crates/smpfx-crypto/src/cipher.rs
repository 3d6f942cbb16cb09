#![forbid(unsafe_code)]

//! CBC-mode block decryption without padding removal.
//!
//! The container stores the private scalar as raw CBC blocks; whatever the
//! last block holds is handed back untouched.

use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockCipher, BlockDecryptMut, KeyInit, KeyIvInit};
use smpfx_core::Error;
use zeroize::Zeroizing;

/// Decrypt `ciphertext` in CBC mode with block cipher `C`.
///
/// Fails with [`Error::Decryption`] when the key or IV length does not suit
/// `C`, or when the ciphertext is not a whole number of blocks.
pub fn cbc_decrypt_no_padding<C>(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, Error>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| Error::Decryption(format!("CBC init failed: {e}")))?;

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let len = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| {
            Error::Decryption(format!(
                "CBC decrypt of {} bytes failed: {e}",
                ciphertext.len()
            ))
        })?
        .len();
    buf.truncate(len);
    Ok(buf)
}

/// Decrypt with SM4-CBC.
pub fn sm4_cbc_decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, Error> {
    cbc_decrypt_no_padding::<sm4::Sm4>(key, iv, ciphertext)
}
