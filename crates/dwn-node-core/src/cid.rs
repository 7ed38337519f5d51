//! Content identifiers.
//!
//! A [`ContentId`] is a CIDv1 over the canonical CBOR encoding of a value:
//!
//! `b` + base32lower(0x01 || 0x71 || 0x12 || 0x20 || sha256(canonical_bytes))
//!
//! Identical values always produce identical identifiers; the encoding is
//! independent of struct field order (see [`crate::canonical`]).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::canonical::canonical_bytes;
use crate::crypto::Sha256Hash;
use crate::error::{CoreError, Result};

/// CIDv1 prefix: version 1, dag-cbor codec, sha2-256 multihash, 32-byte digest.
const CID_PREFIX: [u8; 4] = [0x01, 0x71, 0x12, 0x20];

/// Multibase prefix for base32 lower, no padding.
const MULTIBASE_BASE32: char = 'b';

const BASE32_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// A content identifier (CIDv1, dag-cbor, sha2-256).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(Sha256Hash);

impl ContentId {
    /// Compute the identifier of any serializable value.
    pub fn compute<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let bytes = canonical_bytes(value)?;
        Ok(Self::of_canonical_bytes(&bytes))
    }

    /// Compute the identifier of bytes that are already canonical CBOR.
    pub fn of_canonical_bytes(bytes: &[u8]) -> Self {
        Self(Sha256Hash::hash(bytes))
    }

    /// The sha2-256 digest inside this identifier.
    pub fn digest(&self) -> &Sha256Hash {
        &self.0
    }

    fn to_bytes(self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..4].copy_from_slice(&CID_PREFIX);
        out[4..].copy_from_slice(self.0.as_bytes());
        out
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MULTIBASE_BASE32, base32_encode(&self.to_bytes()))
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self)
    }
}

impl FromStr for ContentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let encoded = s
            .strip_prefix(MULTIBASE_BASE32)
            .ok_or_else(|| CoreError::InvalidContentId(format!("unsupported multibase: {s}")))?;
        let bytes = base32_decode(encoded)
            .ok_or_else(|| CoreError::InvalidContentId(format!("invalid base32: {s}")))?;

        if bytes.len() != 36 || bytes[..4] != CID_PREFIX {
            return Err(CoreError::InvalidContentId(format!(
                "expected CIDv1 dag-cbor sha2-256: {s}"
            )));
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&bytes[4..]);
        Ok(Self(Sha256Hash::from_bytes(digest)))
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// RFC 4648 Base32 encoding (lowercase, no padding)
fn base32_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in data {
        buffer = (buffer << 8) | (byte as u64);
        bits_in_buffer += 8;

        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let index = ((buffer >> bits_in_buffer) & 0x1f) as usize;
            result.push(BASE32_ALPHABET[index] as char);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((buffer << (5 - bits_in_buffer)) & 0x1f) as usize;
        result.push(BASE32_ALPHABET[index] as char);
    }

    result
}

fn base32_decode(data: &str) -> Option<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() * 5 / 8);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for c in data.bytes() {
        let value = BASE32_ALPHABET.iter().position(|&a| a == c)? as u64;
        buffer = (buffer << 5) | value;
        bits_in_buffer += 5;

        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            result.push(((buffer >> bits_in_buffer) & 0xff) as u8);
        }
    }

    // Leftover bits are encoder padding and must be zero.
    if bits_in_buffer >= 5 || buffer & ((1 << bits_in_buffer) - 1) != 0 {
        return None;
    }

    Some(result)
}
