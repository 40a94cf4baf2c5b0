//! Certificate fingerprint types used for TLS pinning.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A SHA-256 fingerprint of a DER-encoded certificate.
///
/// Parsed from hex, case-insensitive, with optional `:` separators as
/// printed by `openssl x509 -fingerprint -sha256`.
///
/// # Example
///
/// ```
/// use vimeo_core::CertFingerprint;
///
/// let fp = CertFingerprint::of_der(b"certificate bytes");
/// let parsed: CertFingerprint = fp.to_string().to_uppercase().parse().unwrap();
/// assert_eq!(fp, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertFingerprint([u8; 32]);

impl CertFingerprint {
    /// Parse a hex fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input holds exactly 64 hex digits.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: &str| InvalidInputError::Fingerprint {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let digits: Vec<u8> = s
            .trim()
            .bytes()
            .filter(|b| *b != b':')
            .map(|b| match b {
                b'0'..=b'9' => Ok(b - b'0'),
                b'a'..=b'f' => Ok(b - b'a' + 10),
                b'A'..=b'F' => Ok(b - b'A' + 10),
                _ => Err(invalid("contains a non-hex character")),
            })
            .collect::<Result<_, _>>()?;

        if digits.len() != 64 {
            return Err(invalid("must be a SHA-256 digest (64 hex digits)").into());
        }

        let mut bytes = [0u8; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }

    /// Fingerprint the given DER certificate bytes.
    pub fn of_der(der: &[u8]) -> Self {
        Self(Sha256::digest(der).into())
    }

    /// Returns the raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CertFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CertFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertFingerprint({})", self)
    }
}

impl FromStr for CertFingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for CertFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CertFingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CertFingerprint::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The allow-list of certificates a client will talk to.
///
/// An empty list trusts nothing: every request made with it fails.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedFingerprints(Vec<CertFingerprint>);

impl TrustedFingerprints {
    /// Create an allow-list, dropping duplicates.
    pub fn new(fingerprints: impl IntoIterator<Item = CertFingerprint>) -> Self {
        let mut list: Vec<CertFingerprint> = Vec::new();
        for fp in fingerprints {
            if !list.contains(&fp) {
                list.push(fp);
            }
        }
        Self(list)
    }

    /// Parse a list of hex fingerprints.
    pub fn parse<I, S>(values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = values
            .into_iter()
            .map(CertFingerprint::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(parsed))
    }

    /// True when nothing is trusted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the DER certificate's fingerprint is on the list.
    pub fn contains_der(&self, der: &[u8]) -> bool {
        self.contains(&CertFingerprint::of_der(der))
    }

    pub fn contains(&self, fingerprint: &CertFingerprint) -> bool {
        self.0.contains(fingerprint)
    }
}

impl FromIterator<CertFingerprint> for TrustedFingerprints {
    fn from_iter<T: IntoIterator<Item = CertFingerprint>>(iter: T) -> Self {
        Self::new(iter)
    }
}
