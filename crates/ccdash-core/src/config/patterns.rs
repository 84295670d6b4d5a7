//! Directory pruning rules for workspace discovery

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

/// Which list a rule came from, used for error messages
#[derive(Debug, Clone, Copy)]
enum RuleKind {
    Ignore,
    Include,
}

impl RuleKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Include => "include",
        }
    }

    /// Include rules re-admit what an ignore rule pruned
    fn line(self, pattern: &str) -> String {
        match self {
            Self::Ignore => pattern.to_string(),
            Self::Include => format!("!{pattern}"),
        }
    }
}

/// Decides which directories a discovery walk may enter
///
/// Patterns use gitignore syntax and are matched against paths relative to
/// the workspace root being walked. Later rules win, and include rules are
/// always added after ignore rules.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    rules: Option<Gitignore>,
}

impl PatternMatcher {
    /// A matcher that prunes nothing
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: None }
    }

    /// Compile ignore and include patterns into one rule set
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that is not valid gitignore syntax.
    pub fn with_patterns(ignore_patterns: &[String], include_patterns: &[String]) -> Result<Self> {
        let rules = ignore_patterns
            .iter()
            .map(|p| (RuleKind::Ignore, p))
            .chain(include_patterns.iter().map(|p| (RuleKind::Include, p)));

        let mut builder = GitignoreBuilder::new("");
        let mut count = 0usize;
        for (kind, pattern) in rules {
            builder
                .add_line(None, &kind.line(pattern))
                .with_context(|| format!("Invalid {} pattern: '{pattern}'", kind.label()))?;
            count += 1;
        }

        if count == 0 {
            return Ok(Self::new());
        }

        let compiled = builder
            .build()
            .context("Failed to compile workspace pruning rules")?;
        Ok(Self {
            rules: Some(compiled),
        })
    }

    /// Whether any rule is configured
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_none()
    }

    /// Whether the walk may visit `path`, given relative to the walk root
    #[must_use]
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        match &self.rules {
            None => true,
            Some(rules) => !rules.matched(path, is_dir).is_ignore(),
        }
    }
}
