#![forbid(unsafe_code)]

//! Password key derivation.
//!
//! A single round of the counter-mode KDF from GM/T 0003: the password is
//! hashed together with the big-endian counter `1` and the digest is used
//! as-is. The container format never asks for more than one digest worth of
//! material, so no further counter values are ever hashed.

use digest::Digest;
use smpfx_core::Error;
use zeroize::Zeroizing;

/// Counter appended to the seed (big-endian `1`).
pub const COUNTER: [u8; 4] = [0, 0, 0, 1];

/// Length of the CBC initialization vector taken from the front of the digest.
pub const IV_LEN: usize = 16;

/// Derive key material from `seed` with SM3.
pub fn derive_key(seed: &[u8]) -> Vec<u8> {
    derive_key_with::<sm3::Sm3>(seed)
}

/// Derive key material from `seed` with an arbitrary hash.
///
/// Output length is the hash's native digest size.
pub fn derive_key_with<D: Digest>(seed: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    Digest::update(&mut hasher, seed);
    Digest::update(&mut hasher, COUNTER);
    hasher.finalize().to_vec()
}

/// IV and cipher key derived from a password, wiped on drop.
pub struct DerivedKeyMaterial {
    iv: Zeroizing<Vec<u8>>,
    key: Zeroizing<Vec<u8>>,
}

impl DerivedKeyMaterial {
    /// Run the KDF over `password` and split the digest into
    /// `iv = digest[..16]` and `key = digest[16..]`.
    pub fn from_password<D: Digest>(password: &[u8]) -> Result<Self, Error> {
        let digest = Zeroizing::new(derive_key_with::<D>(password));
        if digest.len() <= IV_LEN {
            return Err(Error::Crypto(format!(
                "{}-byte digest is too short for a {IV_LEN}-byte IV plus key",
                digest.len()
            )));
        }
        Ok(Self {
            iv: Zeroizing::new(digest[..IV_LEN].to_vec()),
            key: Zeroizing::new(digest[IV_LEN..].to_vec()),
        })
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DerivedKeyMaterial {{ iv: {} bytes, key: {} bytes }}",
            self.iv.len(),
            self.key.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sm3_primitive_vector() {
        // GB/T 32905 example 1: SM3("abc")
        let digest = sm3::Sm3::digest(b"abc");
        assert_eq!(
            digest.as_slice(),
            &hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0")[..]
        );
    }

    #[test]
    fn test_derive_key_hashes_seed_then_counter() {
        let seed = b"test-password";
        let mut input = seed.to_vec();
        input.extend_from_slice(&[0, 0, 0, 1]);
        assert_eq!(derive_key(seed), sm3::Sm3::digest(&input).to_vec());
    }

    #[test]
    fn test_derive_key_deterministic() {
        let a = derive_key(b"123456");
        let b = derive_key(b"123456");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);

        let c = derive_key(b"1234567");
        assert_ne!(a, c);
    }

    #[test]
    fn test_derive_key_empty_seed() {
        // Hashes just the counter.
        assert_eq!(derive_key(b""), sm3::Sm3::digest(COUNTER).to_vec());
    }

    #[test]
    fn test_derive_key_with_other_hash() {
        let out = derive_key_with::<sha2::Sha512>(b"pw");
        assert_eq!(out.len(), 64);
        assert_ne!(out[..32], derive_key(b"pw")[..]);
    }

    #[test]
    fn test_key_material_split() {
        let material = DerivedKeyMaterial::from_password::<sm3::Sm3>(b"test-password").unwrap();
        let digest = derive_key(b"test-password");
        assert_eq!(material.iv(), &digest[..16]);
        assert_eq!(material.key(), &digest[16..]);
        assert_eq!(material.key().len(), 16);
    }

    #[test]
    fn test_key_material_debug_hides_bytes() {
        let material = DerivedKeyMaterial::from_password::<sm3::Sm3>(b"pw").unwrap();
        let dbg = format!("{material:?}");
        assert_eq!(dbg, "DerivedKeyMaterial { iv: 16 bytes, key: 16 bytes }");
    }
}
