#![forbid(unsafe_code)]

//! X.509 certificate handling for the container's public key section.

use der::{Decode, Encode};
use sm2::pkcs8::DecodePublicKey;
use smpfx_core::Error;
use x509_cert::Certificate;

/// Parse a DER-encoded certificate.
pub fn parse_certificate(der: &[u8]) -> Result<Certificate, Error> {
    Certificate::from_der(der)
        .map_err(|e| Error::Certificate(format!("failed to parse certificate: {e}")))
}

/// Extract the SM2 public key from a certificate's SubjectPublicKeyInfo.
///
/// Fails when the key is not an EC key on the SM2 curve.
pub fn sm2_public_key(cert: &Certificate) -> Result<sm2::PublicKey, Error> {
    let spki = &cert.tbs_certificate.subject_public_key_info;
    let spki_der = spki
        .to_der()
        .map_err(|e| Error::Certificate(format!("failed to encode public key info: {e}")))?;

    sm2::PublicKey::from_public_key_der(&spki_der).map_err(|e| {
        Error::Certificate(format!(
            "certificate does not hold an SM2 public key (algorithm {}): {e}",
            spki.algorithm.oid
        ))
    })
}

/// Subject distinguished name in RFC 4514 form.
pub fn subject(cert: &Certificate) -> String {
    cert.tbs_certificate.subject.to_string()
}

/// Serial number as lowercase hex.
pub fn serial_hex(cert: &Certificate) -> String {
    hex::encode(cert.tbs_certificate.serial_number.as_bytes())
}
