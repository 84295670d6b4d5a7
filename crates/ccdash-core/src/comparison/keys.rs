//! Top-level key diffs of JSON documents

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::model::{ArtifactError, ConfigArtifact};

/// Key-level difference between two JSON objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDiff {
    /// Keys only in the left object
    pub keys_only_left: BTreeSet<String>,
    /// Keys only in the right object
    pub keys_only_right: BTreeSet<String>,
    /// Shared keys whose serialized values differ
    pub keys_with_different_values: BTreeSet<String>,
}

impl KeyDiff {
    /// Whether both objects have the same keys and values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys_only_left.is_empty()
            && self.keys_only_right.is_empty()
            && self.keys_with_different_values.is_empty()
    }

    /// Diff the top-level keys of two parsed documents
    ///
    /// Values are compared by their serialized text. Documents that are not
    /// objects contribute no keys.
    #[must_use]
    pub fn between(left: &Value, right: &Value) -> Self {
        let (Some(left), Some(right)) = (left.as_object(), right.as_object()) else {
            return Self::default();
        };

        let mut diff = Self::default();

        for (key, value) in left {
            match right.get(key) {
                None => {
                    diff.keys_only_left.insert(key.clone());
                }
                Some(other) if other.to_string() != value.to_string() => {
                    diff.keys_with_different_values.insert(key.clone());
                }
                Some(_) => {}
            }
        }

        diff.keys_only_right = right
            .keys()
            .filter(|key| !left.contains_key(*key))
            .cloned()
            .collect();

        diff
    }
}

/// Outcome of diffing one shared JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonDiff {
    /// Both sides parsed
    Keys(KeyDiff),
    /// At least one side did not parse
    Invalid {
        /// Marker text, `Invalid JSON` for parse failures
        error: String,
    },
}

impl JsonDiff {
    /// Diff two artifacts holding JSON
    #[must_use]
    pub fn between(left: &ConfigArtifact, right: &ConfigArtifact) -> Self {
        match (parse(left), parse(right)) {
            (Ok(left), Ok(right)) => Self::Keys(KeyDiff::between(&left, &right)),
            (Err(error), _) | (_, Err(error)) => Self::Invalid {
                error: error.to_string(),
            },
        }
    }
}

fn parse(artifact: &ConfigArtifact) -> Result<Value, ArtifactError> {
    match (&artifact.error, artifact.content.as_deref()) {
        (Some(ArtifactError::Unreadable(reason)), _) => {
            Err(ArtifactError::Unreadable(reason.clone()))
        }
        (_, Some(text)) => serde_json::from_str(text).map_err(|_| ArtifactError::InvalidJson),
        (_, None) => Err(ArtifactError::InvalidJson),
    }
}
