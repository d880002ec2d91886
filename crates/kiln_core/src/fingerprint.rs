//! Content fingerprints used as cache keys
//!
//! A fingerprint is derived from the canonical JSON encoding of a
//! configuration value. Field order follows declaration order and sequence
//! order is preserved, so structurally equal values always encode to the
//! same text and therefore the same fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Deterministic cache key derived from a configuration value
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of any serializable value
///
/// The key is the 64-bit SipHash of the encoded text followed by the
/// encoded length, both in hex. It is not cryptographic: a collision makes
/// two configurations share one cached artifact.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<Fingerprint> {
    let encoded = serde_json::to_string(value)?;
    Ok(fingerprint_text(&encoded))
}

fn fingerprint_text(encoded: &str) -> Fingerprint {
    let mut hasher = DefaultHasher::new();
    encoded.hash(&mut hasher);
    Fingerprint(format!("{:016x}{:x}", hasher.finish(), encoded.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Style<'a> {
        width: f32,
        name: &'a str,
        stops: Vec<f32>,
    }

    #[test]
    fn same_value_same_fingerprint() {
        let a = Style {
            width: 2.0,
            name: "stroke",
            stops: vec![0.0, 1.0],
        };
        let b = Style {
            width: 2.0,
            name: "stroke",
            stops: vec![0.0, 1.0],
        };
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&a).unwrap());
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn any_field_change_changes_fingerprint() {
        let base = fingerprint(&Style {
            width: 2.0,
            name: "stroke",
            stops: vec![0.0, 1.0],
        })
        .unwrap();
        let width = fingerprint(&Style {
            width: 2.5,
            name: "stroke",
            stops: vec![0.0, 1.0],
        })
        .unwrap();
        let order = fingerprint(&Style {
            width: 2.0,
            name: "stroke",
            stops: vec![1.0, 0.0],
        })
        .unwrap();
        assert_ne!(base, width);
        assert_ne!(base, order);
        assert_ne!(width, order);
    }

    #[test]
    fn nesting_is_significant() {
        let flat = fingerprint(&(1, 2, 3)).unwrap();
        let nested = fingerprint(&((1, 2), 3)).unwrap();
        assert_ne!(flat, nested);
    }
}
