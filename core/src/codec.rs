//! Dense integer codes for alert descriptors
//!
//! The server sends alerts as small integers rather than string ids. Codes
//! are assigned in ascending id order so any two peers holding the same
//! catalog agree on them, regardless of which file declared what first.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{AlertDescriptor, CatalogSource};
use crate::error::AlertError;

/// Wire identifier of one alert descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertCode(pub u32);

impl fmt::Display for AlertCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct CodecEntry {
    descriptor: Arc<AlertDescriptor>,
    /// Position in catalog declaration order
    rank: usize,
}

/// Immutable code <-> descriptor table, built once per catalog
#[derive(Debug, Default)]
pub struct AlertCodec {
    by_code: Vec<CodecEntry>,
    by_id: HashMap<String, AlertCode>,
}

impl AlertCodec {
    /// Build the table from every descriptor in the catalog
    pub fn new(catalog: &impl CatalogSource) -> Self {
        let mut ranked: Vec<(usize, Arc<AlertDescriptor>)> =
            catalog.all_descriptors().into_iter().enumerate().collect();
        ranked.sort_by(|(_, a), (_, b)| a.id.cmp(&b.id));

        let mut codec = Self::default();
        for (rank, descriptor) in ranked {
            if let Some((min, max)) = descriptor.severity_range() {
                if max < min {
                    tracing::warn!(
                        id = %descriptor.id,
                        min,
                        max,
                        "Skipping alert with inverted severity range"
                    );
                    continue;
                }
            }
            if codec.by_id.contains_key(&descriptor.id) {
                tracing::warn!(id = %descriptor.id, "Catalog yielded duplicate alert id, keeping first");
                continue;
            }
            let code = AlertCode(codec.by_code.len() as u32);
            codec.by_id.insert(descriptor.id.clone(), code);
            codec.by_code.push(CodecEntry { descriptor, rank });
        }
        codec
    }

    pub fn encode(&self, descriptor_id: &str) -> Result<AlertCode, AlertError> {
        self.by_id
            .get(descriptor_id)
            .copied()
            .ok_or_else(|| AlertError::UnknownDescriptor(descriptor_id.to_string()))
    }

    pub fn decode(&self, code: AlertCode) -> Result<&Arc<AlertDescriptor>, AlertError> {
        self.by_code
            .get(code.0 as usize)
            .map(|entry| &entry.descriptor)
            .ok_or(AlertError::UnrecognizedCode(code))
    }

    /// Catalog declaration position of the alert behind `code`
    pub fn rank(&self, code: AlertCode) -> Option<usize> {
        self.by_code.get(code.0 as usize).map(|entry| entry.rank)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
