#![forbid(unsafe_code)]

//! Key reconstruction: password → key material → scalar → private key.

use std::borrow::Cow;
use std::marker::PhantomData;

use base64::Engine;
use cipher::{BlockCipher, BlockDecryptMut, KeyInit};
use digest::Digest;
use log::debug;
use smpfx_core::Error;
use smpfx_crypto::cipher::cbc_decrypt_no_padding;
use smpfx_crypto::DerivedKeyMaterial;
use smpfx_keys::{x509, Sm2PrivateKey};
use x509_cert::Certificate;
use zeroize::Zeroizing;

use crate::context::{ContentEncoding, DecodeContext};
use crate::parse::Container;

/// Smallest accepted private key content.
pub const MIN_CONTENT_LEN: usize = 32;
/// Largest accepted private key content.
pub const MAX_CONTENT_LEN: usize = 64;

/// Turns a parsed [`Container`] into a private key and certificate.
///
/// `D` is the KDF hash and `C` the CBC block cipher; the defaults are the
/// SM3/SM4 pair the format is defined with.
pub struct Reconstructor<D = sm3::Sm3, C = sm4::Sm4> {
    context: DecodeContext,
    _primitives: PhantomData<fn() -> (D, C)>,
}

impl Reconstructor<sm3::Sm3, sm4::Sm4> {
    /// SM3/SM4 reconstructor.
    pub fn new(context: DecodeContext) -> Self {
        Self::with_primitives(context)
    }
}

impl<D, C> Reconstructor<D, C>
where
    D: Digest,
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    /// Reconstructor over arbitrary hash and block cipher types.
    pub fn with_primitives(context: DecodeContext) -> Self {
        Self {
            context,
            _primitives: PhantomData,
        }
    }

    pub fn context(&self) -> &DecodeContext {
        &self.context
    }

    /// Decrypt the private key content into the raw scalar bytes.
    ///
    /// The decrypted blocks are returned whole; no padding is stripped.
    pub fn decrypt_scalar(
        &self,
        password: &str,
        encrypted: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        let len = encrypted.len();
        if !(MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len) {
            return Err(Error::Length(len));
        }

        let ciphertext = self.select_ciphertext(encrypted);
        let material = DerivedKeyMaterial::from_password::<D>(password.as_bytes())?;
        cbc_decrypt_no_padding::<C>(material.key(), material.iv(), &ciphertext)
    }

    /// Apply the content encoding policy.
    fn select_ciphertext<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        match self.context.content_encoding {
            ContentEncoding::Raw => Cow::Borrowed(content),
            ContentEncoding::Auto => {
                // 32 and 48 are whole-block binary ciphertexts.
                if content.len() == 32 || content.len() == 48 {
                    return Cow::Borrowed(content);
                }
                match base64::engine::general_purpose::STANDARD.decode(content) {
                    Ok(decoded) => {
                        debug!(
                            "private key content is base64 ({} -> {} bytes)",
                            content.len(),
                            decoded.len()
                        );
                        Cow::Owned(decoded)
                    }
                    Err(_) => Cow::Borrowed(content),
                }
            }
        }
    }

    /// Decrypt the scalar, parse the certificate, and bind the two.
    pub fn reconstruct(
        &self,
        container: &Container,
        password: &str,
    ) -> Result<(Sm2PrivateKey, Certificate), Error> {
        if self.context.strict_algorithms {
            container.check_algorithms()?;
        }

        let scalar = self.decrypt_scalar(password, &container.private_key.content)?;

        let certificate = x509::parse_certificate(&container.public_key.content)?;
        let public = x509::sm2_public_key(&certificate)?;
        let key = Sm2PrivateKey::from_scalar_bytes(public, &scalar);

        if self.context.verify_key_pair {
            key.check_pair()?;
            debug!("private scalar matches certificate public key");
        }

        debug!(
            "reconstructed SM2 key for certificate {}",
            x509::subject(&certificate)
        );
        Ok((key, certificate))
    }
}
