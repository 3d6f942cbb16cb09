#![forbid(unsafe_code)]

//! Deterministic key and certificate fixtures for tests.
//!
//! The certificates are structurally valid but carry a dummy signature;
//! nothing in this workspace verifies certificate signatures.

use std::str::FromStr;
use std::time::Duration;

use der::asn1::{BitString, ObjectIdentifier, UtcTime};
use der::{Decode, Encode};
use sm2::pkcs8::EncodePublicKey;
use smpfx_core::algorithm;
use x509_cert::certificate::{Certificate, TbsCertificate, Version};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::{Time, Validity};

/// Private scalar used across the test suites.
pub const SCALAR: [u8; 32] = [
    0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56,
    0x78, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34,
    0x56, 0x78,
];

/// Subject and issuer of every fixture certificate.
pub const SUBJECT: &str = "CN=smpfx test,O=smpfx";

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// The SM2 secret key for [`SCALAR`].
pub fn secret_key() -> sm2::SecretKey {
    sm2::SecretKey::from_slice(&SCALAR).expect("fixture scalar is in range")
}

/// DER certificate whose subject public key is `public`.
pub fn certificate_der(public: &sm2::PublicKey) -> Vec<u8> {
    let spki_doc = public
        .to_public_key_der()
        .expect("SM2 public key encodes");
    let spki = SubjectPublicKeyInfoOwned::from_der(spki_doc.as_bytes())
        .expect("encoded SPKI parses");
    certificate_with_spki(spki)
}

/// DER certificate claiming an RSA key, for key-type mismatch tests.
pub fn certificate_der_with_rsa_oid() -> Vec<u8> {
    let spki = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: RSA_ENCRYPTION,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(&[0x30, 0x03, 0x02, 0x01, 0x03])
            .expect("bit string"),
    };
    certificate_with_spki(spki)
}

fn certificate_with_spki(spki: SubjectPublicKeyInfoOwned) -> Vec<u8> {
    let sm2_with_sm3 = ObjectIdentifier::new(&algorithm::dotted(algorithm::SM2_WITH_SM3))
        .expect("SM2-with-SM3 OID parses");
    let signature_algorithm = AlgorithmIdentifierOwned {
        oid: sm2_with_sm3,
        parameters: None,
    };
    let name = Name::from_str(SUBJECT).expect("fixture subject parses");
    let validity = Validity {
        not_before: utc(1_600_000_000),
        not_after: utc(2_400_000_000),
    };

    let tbs_certificate = TbsCertificate {
        version: Version::V3,
        serial_number: SerialNumber::new(&[0x01]).expect("serial"),
        signature: signature_algorithm.clone(),
        issuer: name.clone(),
        validity,
        subject: name,
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: None,
    };

    Certificate {
        tbs_certificate,
        signature_algorithm,
        signature: BitString::from_bytes(&[0u8; 72]).expect("bit string"),
    }
    .to_der()
    .expect("fixture certificate encodes")
}

fn utc(secs: u64) -> Time {
    Time::UtcTime(UtcTime::from_unix_duration(Duration::from_secs(secs)).expect("utc time"))
}
