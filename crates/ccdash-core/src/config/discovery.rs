//! Locating dashboard settings files

use std::path::{Path, PathBuf};

/// Project settings file name
pub const PROJECT_CONFIG_FILE: &str = ".ccdash.toml";
/// Project-local settings file name, usually not committed
pub const LOCAL_CONFIG_FILE: &str = ".ccdash.local.toml";

/// Settings files that exist, one slot per tier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Explicit `--config` path, kept even when missing
    pub cli: Option<PathBuf>,
    /// Project-local config (.ccdash.local.toml)
    pub local: Option<PathBuf>,
    /// Project config (.ccdash.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Files that were found, lowest precedence first
    #[must_use]
    pub fn in_merge_order(&self) -> Vec<&Path> {
        [&self.global, &self.project, &self.local, &self.cli]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl Default for ConfigDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDiscovery {
    /// Stateless discovery
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Discover configuration files starting from the current directory
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let start = std::env::current_dir().ok();
        let mut files = Self::discover_from(start.as_deref(), cli_path);
        files.global = Self::global_config_path();
        files
    }

    /// Discover project files by walking up from `start`
    ///
    /// An explicit CLI path is kept even when it does not exist so that
    /// reading it reports the mistake. The global file is not looked up.
    #[must_use]
    pub fn discover_from(start: Option<&Path>, cli_path: Option<&Path>) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            local: start.and_then(|s| Self::find_file(s, LOCAL_CONFIG_FILE)),
            project: start.and_then(|s| Self::find_file(s, PROJECT_CONFIG_FILE)),
            global: None,
        }
    }

    /// Find a config file in `start` or its ancestors
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// `ccdash/config.toml` under the platform config directory
    fn global_config_path() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("ccdash").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_cli_config_kept_as_given() {
        let dir = TempDir::new().unwrap();
        let cli_config = dir.path().join("custom.toml");

        let files = ConfigDiscovery::discover_from(None, Some(&cli_config));

        assert_eq!(files.cli, Some(cli_config));
        assert!(files.project.is_none());
    }

    #[test]
    fn test_project_files_found_in_ancestors() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
        fs::write(dir.path().join("a").join(LOCAL_CONFIG_FILE), "").unwrap();

        let files = ConfigDiscovery::discover_from(Some(&nested), None);

        assert_eq!(files.project, Some(dir.path().join(PROJECT_CONFIG_FILE)));
        assert_eq!(files.local, Some(dir.path().join("a").join(LOCAL_CONFIG_FILE)));
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(PROJECT_CONFIG_FILE)).unwrap();

        let files = ConfigDiscovery::discover_from(Some(dir.path()), None);

        assert!(files.project.is_none());
    }

    #[test]
    fn test_merge_order() {
        let files = ConfigFiles {
            cli: Some(PathBuf::from("/cli.toml")),
            local: None,
            project: Some(PathBuf::from("/p/.ccdash.toml")),
            global: Some(PathBuf::from("/g/config.toml")),
        };

        assert_eq!(
            files.in_merge_order(),
            [
                Path::new("/g/config.toml"),
                Path::new("/p/.ccdash.toml"),
                Path::new("/cli.toml")
            ]
        );
    }
}
