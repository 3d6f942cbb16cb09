#![forbid(unsafe_code)]

//! Object identifiers used by the SM2 key container.
//!
//! Arcs are kept as `u64` slices so they can be compared directly against
//! parsed OID components.

// ── GM/T 0010 content types ──────────────────────────────────────────

/// SM2_Data (`1.2.156.10197.6.1.4.2.1`), tags both container sections.
pub const SM2_DATA: &[u64] = &[1, 2, 156, 10197, 6, 1, 4, 2, 1];

// ── Ciphers ──────────────────────────────────────────────────────────

/// SM4 in CBC mode (`1.2.156.10197.1.104`).
pub const SM4_CBC: &[u64] = &[1, 2, 156, 10197, 1, 104];

// ── Curves and signatures ────────────────────────────────────────────

/// The SM2 curve (`1.2.156.10197.1.301`).
pub const SM2_CURVE: &[u64] = &[1, 2, 156, 10197, 1, 301];
/// SM2 signature with SM3 (`1.2.156.10197.1.501`).
pub const SM2_WITH_SM3: &[u64] = &[1, 2, 156, 10197, 1, 501];

/// Render an OID arc list in dotted form.
pub fn dotted(components: &[u64]) -> String {
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
