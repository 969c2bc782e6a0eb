//! Index construction configuration.
//!
//! Mirrors the shape of the teacher's `Config` (serde `Serialize`/
//! `Deserialize`, a sensible `Default`), minus the `confy` file binding: this
//! crate performs no I/O, so a host application owns reading/writing the
//! config blob and hands this crate the deserialized struct.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `max_edit_distance in [0, 16]` is a practical upper bound, not an enforced
/// invariant; `prefix_length >= max_edit_distance` is enforced by
/// [`SymSpellConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymSpellConfig {
    pub max_edit_distance: i64,
    pub prefix_length: i64,
    pub count_threshold: i64,
}

impl Default for SymSpellConfig {
    fn default() -> Self {
        Self { max_edit_distance: 2, prefix_length: 7, count_threshold: 1 }
    }
}

impl SymSpellConfig {
    pub fn new(max_edit_distance: i64, prefix_length: i64, count_threshold: i64) -> Self {
        Self { max_edit_distance, prefix_length, count_threshold }
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix_length < self.max_edit_distance {
            return Err(Error::InvalidPrefixLength {
                prefix_length: self.prefix_length,
                max_edit_distance: self.max_edit_distance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_defaults() {
        let cfg = SymSpellConfig::default();
        assert_eq!(cfg.max_edit_distance, 2);
        assert_eq!(cfg.prefix_length, 7);
        assert_eq!(cfg.count_threshold, 1);
    }

    #[test]
    fn rejects_prefix_shorter_than_edit_distance() {
        let cfg = SymSpellConfig::new(3, 2, 1);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn roundtrips_through_json() {
        let cfg = SymSpellConfig::new(1, 5, 2);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SymSpellConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
