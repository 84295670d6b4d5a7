//! Reading one file into a `ConfigArtifact`
//!
//! Missing files are `None`, never errors. Files that exist but cannot be
//! read or parsed still produce an artifact carrying an error marker.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::model::{ArtifactError, ArtifactKind, ConfigArtifact, Scope};

/// Compute the SHA-256 hex digest of some bytes
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Display name for a file of the given kind
fn display_name(path: &Path, kind: ArtifactKind) -> String {
    let strip = matches!(kind, ArtifactKind::Memory | ArtifactKind::Agent);
    let name = if strip { path.file_stem() } else { path.file_name() };
    name.map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Nothing at the path, including a path through a non-directory parent
fn is_absent(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

fn expects_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Load a file as an artifact
///
/// Returns `None` when nothing exists at `path` or it is not a file.
#[must_use]
pub fn read_artifact(path: &Path, kind: ArtifactKind, scope: Scope) -> Option<ConfigArtifact> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if is_absent(&e) => return None,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to stat artifact");
            return Some(unreadable(path, kind, scope, &e.to_string()));
        }
    };

    if !metadata.is_file() {
        return None;
    }

    let mut artifact = ConfigArtifact {
        kind,
        name: display_name(path, kind),
        absolute_path: path.to_path_buf(),
        content: None,
        size_bytes: metadata.len(),
        last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        scope,
        content_hash: None,
        error: None,
    };

    match fs::read(path) {
        Ok(bytes) => {
            artifact.content_hash = Some(content_hash(&bytes));
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if expects_json(path) && serde_json::from_str::<serde_json::Value>(&text).is_err() {
                artifact.error = Some(ArtifactError::InvalidJson);
            }
            artifact.content = Some(text);
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to read artifact");
            artifact.error = Some(ArtifactError::Unreadable(e.to_string()));
        }
    }

    Some(artifact)
}

fn unreadable(path: &Path, kind: ArtifactKind, scope: Scope, reason: &str) -> ConfigArtifact {
    ConfigArtifact {
        kind,
        name: display_name(path, kind),
        absolute_path: path.to_path_buf(),
        content: None,
        size_bytes: 0,
        last_modified: None,
        scope,
        content_hash: None,
        error: Some(ArtifactError::Unreadable(reason.to_string())),
    }
}

/// Load every file directly inside `dir` accepted by `accept`
///
/// Entries are sorted by file name. A missing directory yields an empty list.
#[must_use]
pub fn read_dir_artifacts(
    dir: &Path,
    kind: ArtifactKind,
    scope: Scope,
    accept: impl Fn(&Path) -> bool,
) -> Vec<ConfigArtifact> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if !is_absent(&e) {
                debug!(dir = %dir.display(), error = %e, "Failed to list directory");
            }
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && accept(path))
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| read_artifact(path, kind, scope))
        .collect()
}

/// Synthesize a hook artifact from the `hooks` key of a settings file
///
/// Returns `None` unless the file parses as JSON with a top-level `hooks`
/// key. The artifact points at the settings file and holds the key's value
/// pretty-printed.
#[must_use]
pub fn embedded_hooks(settings: &ConfigArtifact) -> Option<ConfigArtifact> {
    let value = settings.parsed_json()?;
    let hooks = value.get("hooks")?;
    let content = serde_json::to_string_pretty(hooks).ok()?;

    Some(ConfigArtifact {
        kind: ArtifactKind::Hook,
        name: format!("hooks (in {})", settings.file_name()),
        absolute_path: settings.absolute_path.clone(),
        size_bytes: content.len() as u64,
        last_modified: settings.last_modified,
        scope: settings.scope,
        content_hash: Some(content_hash(content.as_bytes())),
        content: Some(content),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let artifact = read_artifact(
            &tmp.path().join("CLAUDE.md"),
            ArtifactKind::Memory,
            Scope::Project,
        );
        assert!(artifact.is_none());
    }

    #[test]
    fn test_directory_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_artifact(tmp.path(), ArtifactKind::Memory, Scope::Project).is_none());
    }

    #[test]
    fn test_reads_metadata_and_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CLAUDE.md");
        fs::write(&path, "# Memory\n").unwrap();

        let artifact = read_artifact(&path, ArtifactKind::Memory, Scope::Project).unwrap();

        assert_eq!(artifact.name, "CLAUDE");
        assert_eq!(artifact.content.as_deref(), Some("# Memory\n"));
        assert_eq!(artifact.size_bytes, 9);
        assert!(artifact.last_modified.is_some());
        assert!(artifact.error.is_none());
        assert_eq!(artifact.content_hash, Some(content_hash(b"# Memory\n")));
    }

    #[test]
    fn test_invalid_json_is_marked_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ broken").unwrap();

        let artifact = read_artifact(&path, ArtifactKind::Settings, Scope::Project).unwrap();

        assert_eq!(artifact.name, "settings.json");
        assert_eq!(artifact.error, Some(ArtifactError::InvalidJson));
        assert_eq!(artifact.content.as_deref(), Some("{ broken"));
    }

    #[test]
    fn test_markdown_is_not_json_checked() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reviewer.md");
        fs::write(&path, "{ not json").unwrap();

        let artifact = read_artifact(&path, ArtifactKind::Agent, Scope::Project).unwrap();
        assert!(artifact.error.is_none());
        assert_eq!(artifact.name, "reviewer");
    }

    #[test]
    fn test_read_dir_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.md"), "b").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(tmp.path().join("nested.md")).unwrap();

        let artifacts = read_dir_artifacts(
            tmp.path(),
            ArtifactKind::Agent,
            Scope::Project,
            crate::resolver::is_agent_file,
        );

        let names: Vec<_> = artifacts.iter().map(ConfigArtifact::file_name).collect();
        assert_eq!(names, ["a.json", "b.md"]);
    }

    #[test]
    fn test_read_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let artifacts = read_dir_artifacts(
            &tmp.path().join("hooks"),
            ArtifactKind::Hook,
            Scope::Project,
            |_| true,
        );
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_embedded_hooks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"hooks":{"PreToolUse":[{"matcher":"Bash"}]},"model":"x"}"#,
        )
        .unwrap();
        let settings = read_artifact(&path, ArtifactKind::Settings, Scope::Project).unwrap();

        let hook = embedded_hooks(&settings).unwrap();

        assert_eq!(hook.kind, ArtifactKind::Hook);
        assert_eq!(hook.name, "hooks (in settings.json)");
        assert_eq!(hook.absolute_path, path);
        let value: serde_json::Value =
            serde_json::from_str(hook.content.as_deref().unwrap()).unwrap();
        assert_eq!(value["PreToolUse"][0]["matcher"], "Bash");
    }

    #[test]
    fn test_no_embedded_hooks_without_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{"model":"x"}"#).unwrap();
        let settings = read_artifact(&path, ArtifactKind::Settings, Scope::Project).unwrap();

        assert!(embedded_hooks(&settings).is_none());
    }
}
