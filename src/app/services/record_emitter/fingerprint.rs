//! Metadata fingerprint used to deduplicate repeated metadata blocks

use crate::app::models::MetadataEntry;
use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the JSON form of a metadata snapshot
pub fn metadata_hash(metadata: &[MetadataEntry]) -> Result<String> {
    let encoded = serde_json::to_vec(metadata)
        .map_err(|e| Error::json("Failed to encode metadata snapshot", e))?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::QualifierValue;

    fn entry(name: &str, value: f64) -> MetadataEntry {
        MetadataEntry {
            name: name.to_string(),
            value: Some(QualifierValue::Scalar(value)),
            units: "CODE TABLE".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_hash_is_stable_and_order_sensitive() {
        let a = vec![entry("type_of_station", 1.0), entry("time_significance", 2.0)];
        let b = a.clone();
        let reversed: Vec<_> = a.iter().rev().cloned().collect();

        let hash = metadata_hash(&a).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, metadata_hash(&b).unwrap());
        assert_ne!(hash, metadata_hash(&reversed).unwrap());
    }

    #[test]
    fn test_empty_snapshot_hash() {
        // sha256 of "[]"
        assert_eq!(
            metadata_hash(&[]).unwrap(),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }
}
