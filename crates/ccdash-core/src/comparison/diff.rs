//! Line diffs of memory files

use std::fmt::Write;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::model::ConfigArtifact;

/// Line diff operation, read from left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOp {
    /// Present on both sides
    Equal,
    /// Present only on the right
    Insert,
    /// Present only on the left
    Delete,
}

impl From<ChangeTag> for LineOp {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Equal,
            ChangeTag::Insert => Self::Insert,
            ChangeTag::Delete => Self::Delete,
        }
    }
}

/// A run of consecutive lines sharing one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRun {
    /// Operation
    pub op: LineOp,
    /// The lines, newline-terminated as in the source
    pub text: String,
}

/// Memory file comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDiff {
    /// Whether the left side has a memory file
    pub left_exists: bool,
    /// Whether the right side has a memory file
    pub right_exists: bool,
    /// Runs of the line diff, empty unless both sides exist
    pub line_diff: Vec<DiffRun>,
    /// Lines only on the right
    pub lines_added: usize,
    /// Lines only on the left
    pub lines_removed: usize,
}

impl MemoryDiff {
    /// Whether both sides exist with identical text
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.left_exists
            && self.right_exists
            && self.line_diff.iter().all(|run| run.op == LineOp::Equal)
    }
}

/// Diff generator for memory files
pub struct DiffGenerator;

impl Default for DiffGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffGenerator {
    /// Create a new diff generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compare two optional memory artifacts
    ///
    /// The line diff is only computed when both sides have content.
    #[must_use]
    pub fn memory(left: Option<&ConfigArtifact>, right: Option<&ConfigArtifact>) -> MemoryDiff {
        let left_text = left.and_then(|a| a.content.as_deref());
        let right_text = right.and_then(|a| a.content.as_deref());

        let mut result = MemoryDiff {
            left_exists: left.is_some(),
            right_exists: right.is_some(),
            line_diff: Vec::new(),
            lines_added: 0,
            lines_removed: 0,
        };

        if let (Some(left_text), Some(right_text)) = (left_text, right_text) {
            result.line_diff = Self::line_runs(left_text, right_text);
            let (added, removed) = Self::count_changes(left_text, right_text);
            result.lines_added = added;
            result.lines_removed = removed;
        }

        result
    }

    /// Line diff of two texts, consecutive lines with the same operation
    /// joined into one run
    #[must_use]
    pub fn line_runs(left: &str, right: &str) -> Vec<DiffRun> {
        let diff = TextDiff::from_lines(left, right);
        let mut runs: Vec<DiffRun> = Vec::new();

        for change in diff.iter_all_changes() {
            let op = LineOp::from(change.tag());
            match runs.last_mut() {
                Some(run) if run.op == op => run.text.push_str(change.value()),
                _ => runs.push(DiffRun {
                    op,
                    text: change.value().to_string(),
                }),
            }
        }

        runs
    }

    /// Count added and removed lines
    #[must_use]
    pub fn count_changes(left: &str, right: &str) -> (usize, usize) {
        let diff = TextDiff::from_lines(left, right);

        let mut added = 0;
        let mut removed = 0;

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => added += 1,
                ChangeTag::Delete => removed += 1,
                ChangeTag::Equal => {}
            }
        }

        (added, removed)
    }

    /// Render a color-coded unified diff with three lines of context
    #[must_use]
    pub fn unified(left: &str, right: &str, left_label: &str, right_label: &str) -> String {
        const DIFF_CONTEXT_LINES: usize = 3;

        let diff = TextDiff::from_lines(left, right);

        let mut output = String::new();

        let _ = writeln!(output, "\x1b[1m--- {left_label}\x1b[0m");
        let _ = writeln!(output, "\x1b[1m+++ {right_label}\x1b[0m");

        for (idx, group) in diff.grouped_ops(DIFF_CONTEXT_LINES).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }

            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, color) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"), // Red
                        ChangeTag::Insert => ("+", "\x1b[32m"), // Green
                        ChangeTag::Equal => (" ", "\x1b[0m"),
                    };

                    let newline = if change.value().ends_with('\n') {
                        ""
                    } else {
                        "\n"
                    };

                    let _ = write!(output, "{color}{sign}{}{newline}\x1b[0m", change.value());
                }
            }
        }

        output
    }
}
