//! Name-set comparison of artifact lists

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{ArtifactKind, ConfigArtifact, McpServer};

use super::keys::JsonDiff;

/// Comparison of two artifact lists of one kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSetDiff {
    /// Names present only on the left
    pub only_left: BTreeSet<String>,
    /// Names present only on the right
    pub only_right: BTreeSet<String>,
    /// Names present on both sides
    pub shared: BTreeSet<String>,
    /// Shared names whose content hashes differ
    pub changed: BTreeSet<String>,
    /// Key diffs of shared `.json` files
    pub json: BTreeMap<String, JsonDiff>,
}

impl FileSetDiff {
    /// Whether both sides hold the same files with the same content
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty() && self.changed.is_empty()
    }

    /// Compare two lists of artifacts by name
    ///
    /// Agents and memory files are keyed by file name so `a.md` and `a.json`
    /// stay distinct; other kinds use their display name. The first artifact
    /// with a given name wins.
    #[must_use]
    pub fn compare(left: &[ConfigArtifact], right: &[ConfigArtifact]) -> Self {
        let left = index(left);
        let right = index(right);

        let mut diff = Self::default();

        for (name, left_artifact) in &left {
            let Some(right_artifact) = right.get(name) else {
                diff.only_left.insert(name.clone());
                continue;
            };

            diff.shared.insert(name.clone());

            if left_artifact.content_hash != right_artifact.content_hash {
                diff.changed.insert(name.clone());
            }

            if name.ends_with(".json") {
                diff.json
                    .insert(name.clone(), JsonDiff::between(left_artifact, right_artifact));
            }
        }

        diff.only_right = right
            .keys()
            .filter(|name| !left.contains_key(*name))
            .cloned()
            .collect();

        diff
    }
}

fn set_key(artifact: &ConfigArtifact) -> String {
    match artifact.kind {
        ArtifactKind::Agent | ArtifactKind::Memory => artifact.file_name(),
        _ => artifact.name.clone(),
    }
}

fn index(artifacts: &[ConfigArtifact]) -> BTreeMap<String, &ConfigArtifact> {
    let mut map = BTreeMap::new();
    for artifact in artifacts {
        map.entry(set_key(artifact)).or_insert(artifact);
    }
    map
}

/// Comparison of two lists of MCP servers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpDiff {
    /// Servers declared only on the left
    pub only_left: BTreeSet<String>,
    /// Servers declared only on the right
    pub only_right: BTreeSet<String>,
    /// Shared servers whose serialized descriptors differ
    pub differing: BTreeSet<String>,
}

impl McpDiff {
    /// Whether both sides declare the same servers identically
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty() && self.differing.is_empty()
    }

    /// Compare servers by name
    ///
    /// When one side declares a name in several files the first declaration
    /// counts.
    #[must_use]
    pub fn compare(left: &[McpServer], right: &[McpServer]) -> Self {
        let left = descriptors(left);
        let right = descriptors(right);

        let mut diff = Self::default();

        for (name, descriptor) in &left {
            match right.get(name) {
                None => {
                    diff.only_left.insert(name.clone());
                }
                Some(other) if other != descriptor => {
                    diff.differing.insert(name.clone());
                }
                Some(_) => {}
            }
        }

        diff.only_right = right
            .keys()
            .filter(|name| !left.contains_key(*name))
            .cloned()
            .collect();

        diff
    }
}

fn descriptors(servers: &[McpServer]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for server in servers {
        map.entry(server.server_name.clone())
            .or_insert_with(|| server.descriptor.to_string());
    }
    map
}
