//! Legacy code crosswalk.
//!
//! Parts of the source data still carry codes from the retired 158-region
//! scheme. The crosswalk maps those old integer codes to the current
//! 140-scheme (code, name) pair. The table is static, loaded once, and
//! consulted opportunistically: a miss is an ordinary outcome and the caller
//! falls back to the region's own code and name.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;
use tracing::info;

use crate::dataset::LoadError;
use crate::models::RegionId;

#[derive(Debug, Clone, Deserialize)]
struct CrosswalkTarget {
    code: String,
    name: String,
}

/// Read-only mapping from old 158-scheme codes to current (code, name) pairs.
#[derive(Debug, Clone, Default)]
pub struct Crosswalk {
    entries: HashMap<RegionId, CrosswalkTarget>,
}

impl Crosswalk {
    /// Load the crosswalk from a JSON file of the form
    /// `{"5": {"code": "174", "name": "South Eglinton-Davisville (174)"}, ...}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path.as_ref())?;
        let raw: std::collections::HashMap<RegionId, CrosswalkTarget> =
            serde_json::from_str(&content)?;
        info!(
            "Loaded {} crosswalk entries from {}",
            raw.len(),
            path.as_ref().display()
        );
        Ok(Self {
            entries: raw.into_iter().collect(),
        })
    }

    /// Build a crosswalk from (old_code, code, name) triples.
    pub fn from_entries<I, C, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RegionId, C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(old, code, name)| {
                    (
                        old,
                        CrosswalkTarget {
                            code: code.into(),
                            name: name.into(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Translate an old code, or `None` when no mapping exists.
    pub fn map(&self, old_code: RegionId) -> Option<(&str, &str)> {
        self.entries
            .get(&old_code)
            .map(|target| (target.code.as_str(), target.name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
