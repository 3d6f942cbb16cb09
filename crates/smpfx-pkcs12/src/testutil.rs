#![forbid(unsafe_code)]

//! Container fixtures built at test time.

use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockCipher, BlockEncryptMut, KeyInit, KeyIvInit};
use digest::Digest;
use smpfx_core::algorithm;
use smpfx_crypto::DerivedKeyMaterial;
use smpfx_keys::fixtures;
use yasna::models::ObjectIdentifier;

pub const PASSWORD: &str = "test-password";

/// Fixture certificate for [`fixtures::SCALAR`]'s public key.
pub fn certificate() -> Vec<u8> {
    fixtures::certificate_der(&fixtures::secret_key().public_key())
}

/// CBC-encrypt `plain` (block aligned) under a key derived from `password`.
pub fn encrypt_with<D, C>(password: &str, plain: &[u8]) -> Vec<u8>
where
    D: Digest,
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let material = DerivedKeyMaterial::from_password::<D>(password.as_bytes()).unwrap();
    let mut buf = plain.to_vec();
    cbc::Encryptor::<C>::new_from_slices(material.key(), material.iv())
        .unwrap()
        .encrypt_padded_mut::<NoPadding>(&mut buf, plain.len())
        .unwrap();
    buf
}

/// SM3/SM4 encryption, as the format uses.
pub fn encrypt(password: &str, plain: &[u8]) -> Vec<u8> {
    encrypt_with::<sm3::Sm3, sm4::Sm4>(password, plain)
}

pub fn container_der(version: i64, private_content: &[u8], cert_der: &[u8]) -> Vec<u8> {
    let sm2_data = ObjectIdentifier::from_slice(algorithm::SM2_DATA);
    let sm4_cbc = ObjectIdentifier::from_slice(algorithm::SM4_CBC);
    yasna::construct_der(|w| {
        w.write_sequence(|w| {
            w.next().write_i64(version);
            w.next().write_sequence(|w| {
                w.next().write_oid(&sm2_data);
                w.next().write_oid(&sm4_cbc);
                w.next().write_bytes(private_content);
            });
            w.next().write_sequence(|w| {
                w.next().write_oid(&sm2_data);
                w.next().write_bytes(cert_der);
            });
        })
    })
}

/// A complete container for [`fixtures::SCALAR`] under [`PASSWORD`].
pub fn fixture_container() -> Vec<u8> {
    container_der(1, &encrypt(PASSWORD, &fixtures::SCALAR), &certificate())
}
