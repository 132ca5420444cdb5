//! Configuration keys and the versioned blob envelope.
//!
//! # Blob Format
//!
//! ```text
//! [4 bytes magic "QRHB"][u16 LE format version][u8 key tag][32 bytes SHA-256 of payload][payload]
//! ```
//!
//! The payload is the bincode encoding of the value. bincode is deterministic
//! for the configuration types (no hash maps), so decoding and re-encoding a
//! blob reproduces it byte for byte.

use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::repository::{RepositoryError, Result};

pub const BLOB_MAGIC: [u8; 4] = *b"QRHB";
pub const BLOB_FORMAT_VERSION: u16 = 1;

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = BLOB_MAGIC.len() + 2 + 1 + DIGEST_LEN;

/// The three independently stored configuration kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfigKey {
    /// The level table.
    #[strum(to_string = "questions", serialize = "levels")]
    Questions,
    Survey,
    Directory,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::Questions, ConfigKey::Survey, ConfigKey::Directory];

    /// Tag byte written into the blob header.
    pub const fn tag(self) -> u8 {
        match self {
            ConfigKey::Questions => 1,
            ConfigKey::Survey => 2,
            ConfigKey::Directory => 3,
        }
    }
}

/// Wraps `value` in a blob for `key`.
pub fn encode_blob<T: Serialize>(key: ConfigKey, value: &T) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(value).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let digest = Sha256::digest(&payload);

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&BLOB_MAGIC);
    bytes.extend_from_slice(&BLOB_FORMAT_VERSION.to_le_bytes());
    bytes.push(key.tag());
    bytes.extend_from_slice(&digest);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Validates the envelope of a blob stored under `key` and decodes its
/// payload.
pub fn decode_blob<T: DeserializeOwned>(key: ConfigKey, bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_LEN {
        return Err(RepositoryError::CorruptedData(format!(
            "{key} blob is {} bytes, shorter than its header",
            bytes.len()
        )));
    }

    let (magic, rest) = bytes.split_at(BLOB_MAGIC.len());
    if magic != BLOB_MAGIC {
        return Err(RepositoryError::CorruptedData(format!(
            "{key} blob has bad magic {}",
            hex::encode(magic)
        )));
    }

    let version = u16::from_le_bytes([rest[0], rest[1]]);
    if version != BLOB_FORMAT_VERSION {
        return Err(RepositoryError::UnsupportedVersion {
            found: version,
            expected: BLOB_FORMAT_VERSION,
        });
    }

    let tag = rest[2];
    if tag != key.tag() {
        return Err(RepositoryError::CorruptedData(format!(
            "blob tagged {tag} was stored under '{key}'"
        )));
    }

    let (digest, payload) = rest[3..].split_at(DIGEST_LEN);
    let actual = Sha256::digest(payload);
    if digest != actual.as_slice() {
        return Err(RepositoryError::CorruptedData(format!(
            "{key} blob digest mismatch: header {}, payload {}",
            hex::encode(digest),
            hex::encode(actual)
        )));
    }

    bincode::deserialize(payload).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::{SurveyQuestion, SurveySet};

    fn survey() -> SurveySet {
        SurveySet::new(vec![
            SurveyQuestion::boolean(1, "Tea?"),
            SurveyQuestion::boolean(2, "Coffee?"),
        ])
    }

    #[test]
    fn decode_then_encode_is_byte_identical() {
        let blob = encode_blob(ConfigKey::Survey, &survey()).unwrap();
        let decoded: SurveySet = decode_blob(ConfigKey::Survey, &blob).unwrap();

        assert_eq!(decoded, survey());
        assert_eq!(encode_blob(ConfigKey::Survey, &decoded).unwrap(), blob);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let blob = encode_blob(ConfigKey::Survey, &survey()).unwrap();
        let error = decode_blob::<SurveySet>(ConfigKey::Directory, &blob).unwrap_err();
        assert!(matches!(error, RepositoryError::CorruptedData(_)));
    }

    #[test]
    fn flipped_payload_bit_fails_the_digest() {
        let mut blob = encode_blob(ConfigKey::Survey, &survey()).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x01;

        let error = decode_blob::<SurveySet>(ConfigKey::Survey, &blob).unwrap_err();
        assert!(error.to_string().contains("digest mismatch"));
    }

    #[test]
    fn future_versions_are_refused() {
        let mut blob = encode_blob(ConfigKey::Survey, &survey()).unwrap();
        blob[4..6].copy_from_slice(&7u16.to_le_bytes());

        assert!(matches!(
            decode_blob::<SurveySet>(ConfigKey::Survey, &blob),
            Err(RepositoryError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn truncated_blobs_are_corrupted() {
        assert!(matches!(
            decode_blob::<SurveySet>(ConfigKey::Survey, b"QRHB"),
            Err(RepositoryError::CorruptedData(_))
        ));
    }

    #[test]
    fn keys_parse_from_their_names() {
        assert_eq!("questions".parse::<ConfigKey>().unwrap(), ConfigKey::Questions);
        assert_eq!("levels".parse::<ConfigKey>().unwrap(), ConfigKey::Questions);
        assert_eq!("Directory".parse::<ConfigKey>().unwrap(), ConfigKey::Directory);
        assert_eq!(ConfigKey::Survey.to_string(), "survey");
    }
}
