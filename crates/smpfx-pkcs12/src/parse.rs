#![forbid(unsafe_code)]

//! DER parsing of the SM2 key container.
//!
//! ```text
//! Container ::= SEQUENCE {
//!     version        INTEGER,
//!     privateSection SEQUENCE { curveData OID, cipherMode OID, content },
//!     publicSection  SEQUENCE { curveData OID, content }
//! }
//! ```
//!
//! Each `content` is taken as a raw TLV value: OCTET STRING is what writers
//! emit, but any primitive tag is accepted and its value bytes used as-is.

use log::debug;
use smpfx_core::{algorithm, Error};
use yasna::models::ObjectIdentifier;
use yasna::{ASN1Error, ASN1ErrorKind, BERReader};

fn oid(components: &[u64]) -> ObjectIdentifier {
    ObjectIdentifier::from_slice(components)
}

// ── Parsed structures ──────────────────────────────────────────────────────

/// The decoded top-level container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub version: i64,
    pub private_key: PrivateKeySection,
    pub public_key: PublicKeySection,
}

/// The encrypted private scalar and the algorithms that protect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeySection {
    /// Normally SM2_Data.
    pub curve_data_oid: ObjectIdentifier,
    /// Normally SM4_CBC.
    pub cipher_mode_oid: ObjectIdentifier,
    /// Encrypted scalar, possibly base64 text.
    pub content: Vec<u8>,
}

/// The DER certificate holding the matching public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeySection {
    pub curve_data_oid: ObjectIdentifier,
    pub content: Vec<u8>,
}

impl Container {
    /// Reject containers whose sections do not name SM2_Data / SM4_CBC.
    pub fn check_algorithms(&self) -> Result<(), Error> {
        let expected = [
            ("private key data", &self.private_key.curve_data_oid, algorithm::SM2_DATA),
            ("private key cipher", &self.private_key.cipher_mode_oid, algorithm::SM4_CBC),
            ("public key data", &self.public_key.curve_data_oid, algorithm::SM2_DATA),
        ];
        for (field, actual, wanted) in expected {
            if *actual != oid(wanted) {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "{field}: {actual} (expected {})",
                    algorithm::dotted(wanted)
                )));
            }
        }
        Ok(())
    }
}

// ── Top-level parser ───────────────────────────────────────────────────────

/// Parse container bytes. Every byte must belong to the outer SEQUENCE.
pub fn parse_container(data: &[u8]) -> Result<Container, Error> {
    let container = yasna::parse_der(data, |r| {
        r.read_sequence(|r| {
            let version = r.next().read_i64()?;
            let private_key = parse_private_section(r.next())?;
            let public_key = parse_public_section(r.next())?;
            Ok(Container {
                version,
                private_key,
                public_key,
            })
        })
    })
    .map_err(|e| match e.kind() {
        ASN1ErrorKind::Extra => {
            Error::Format(format!("trailing data in key container: {e}"))
        }
        _ => Error::Format(format!("failed to parse key container: {e}")),
    })?;

    debug!(
        "parsed key container v{}: {}-byte private content, {}-byte certificate",
        container.version,
        container.private_key.content.len(),
        container.public_key.content.len()
    );
    Ok(container)
}

fn parse_private_section(r: BERReader) -> Result<PrivateKeySection, ASN1Error> {
    r.read_sequence(|r| {
        let curve_data_oid = r.next().read_oid()?;
        let cipher_mode_oid = r.next().read_oid()?;
        let content = read_content(r.next())?;
        Ok(PrivateKeySection {
            curve_data_oid,
            cipher_mode_oid,
            content,
        })
    })
}

fn parse_public_section(r: BERReader) -> Result<PublicKeySection, ASN1Error> {
    r.read_sequence(|r| {
        let curve_data_oid = r.next().read_oid()?;
        let content = read_content(r.next())?;
        Ok(PublicKeySection {
            curve_data_oid,
            content,
        })
    })
}

/// Value bytes of the next element, whatever its tag.
fn read_content(r: BERReader) -> Result<Vec<u8>, ASN1Error> {
    let value = r.read_tagged_der()?;
    if value.pcbit() != yasna::PCBit::Primitive {
        return Err(ASN1Error::new(ASN1ErrorKind::Invalid));
    }
    Ok(value.value().to_vec())
}
