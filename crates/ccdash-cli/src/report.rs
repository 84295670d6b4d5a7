//! Human-readable rendering of dashboard results

use std::collections::BTreeSet;
use std::fmt::Write;

use ccdash_core::comparison::{FileSetDiff, JsonDiff, LineOp, McpDiff, MemoryDiff};
use ccdash_core::model::{ConfigArtifact, DiscoveryPass, Scope};
use ccdash_core::mutator::MutationReport;
use ccdash_core::{ComparisonResult, ProjectConfig, WorkspaceScan};

const fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::Project => "project",
        Scope::Legacy => "legacy",
        Scope::Local => "local",
        Scope::Global => "global",
    }
}

const fn pass_label(pass: DiscoveryPass) -> &'static str {
    match pass {
        DiscoveryPass::ClaudeDir => ".claude",
        DiscoveryPass::McpJson => ".mcp.json",
        DiscoveryPass::MemoryFile => "CLAUDE.md",
        DiscoveryPass::AgentsDir => "agents/",
    }
}

fn artifact_line(artifact: &ConfigArtifact) -> String {
    let mut line = format!(
        "{} ({}, {} bytes)",
        artifact.absolute_path.display(),
        scope_label(artifact.scope),
        artifact.size_bytes
    );
    if let Some(error) = &artifact.error {
        let _ = write!(line, " ✗ {error}");
    }
    line
}

fn artifact_section(output: &mut String, title: &str, artifacts: &[ConfigArtifact]) {
    let _ = writeln!(output, "{title} ({}):", artifacts.len());
    for artifact in artifacts {
        let _ = writeln!(output, "  - {}", artifact_line(artifact));
    }
}

/// Render every artifact of a project
#[must_use]
pub fn project_details(project: &ProjectConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "\n=== {} ===", project.name);
    let _ = writeln!(output, "Path: {}", project.path.display());

    if !project.discovered_by.is_empty() {
        let passes: Vec<_> = project.discovered_by.iter().map(|p| pass_label(*p)).collect();
        let _ = writeln!(output, "Found by: {}", passes.join(", "));
    }

    match &project.memory {
        Some(memory) => {
            let _ = writeln!(output, "Memory: {}", artifact_line(memory));
        }
        None => output.push_str("Memory: none\n"),
    }
    for candidate in project.memory_candidates.iter().filter(|c| !c.active) {
        let _ = writeln!(output, "  shadowed: {}", candidate.path.display());
    }
    if let Some(local) = &project.local_memory {
        let _ = writeln!(output, "Local memory: {}", artifact_line(local));
    }

    artifact_section(&mut output, "Settings", &project.settings);
    artifact_section(&mut output, "Agents", &project.agents);
    artifact_section(&mut output, "Hooks", &project.hooks);

    let _ = writeln!(output, "MCP servers ({}):", project.mcp_servers.len());
    for server in &project.mcp_servers {
        let target = server
            .command
            .as_deref()
            .or(server.url.as_deref())
            .unwrap_or("?");
        let disabled = if server.disabled { " [disabled]" } else { "" };
        let _ = writeln!(
            output,
            "  - {}: {target}{disabled} ({})",
            server.server_name, server.source_description
        );
    }
    for file in project.mcp_files.iter().filter(|f| f.error.is_some()) {
        let _ = writeln!(output, "  ✗ {}", artifact_line(file));
    }

    output
}

/// One line per project plus the global config and warnings
#[must_use]
pub fn scan_summary(scan: &WorkspaceScan) -> String {
    let mut output = String::new();

    output.push_str("\n=== Projects ===\n");
    if scan.projects.is_empty() {
        output.push_str("No projects found\n");
    }
    for project in &scan.projects {
        let _ = writeln!(
            output,
            "{:<24} memory:{} settings:{} agents:{} hooks:{} mcp:{}  {}",
            project.name,
            if project.memory.is_some() { "yes" } else { "no" },
            project.settings.len(),
            project.agents.len(),
            project.hooks.len(),
            project.mcp_servers.len(),
            project.path.display()
        );
    }

    let global = &scan.global;
    let _ = writeln!(
        output,
        "\nGlobal ({}): memory:{} settings:{} agents:{} hooks:{} mcp:{}",
        global.path.display(),
        if global.memory.is_some() { "yes" } else { "no" },
        global.settings.len(),
        global.agents.len(),
        global.hooks.len(),
        global.mcp_servers.len()
    );

    if !scan.warnings.is_empty() {
        let _ = writeln!(output, "\nWarnings ({}):", scan.warnings.len());
        for warning in &scan.warnings {
            let _ = writeln!(output, "  - {warning}");
        }
    }

    let _ = writeln!(output, "\nTotal projects: {}", scan.projects.len());
    output
}

fn names(label: &str, set: &BTreeSet<String>, output: &mut String) {
    if !set.is_empty() {
        let joined: Vec<_> = set.iter().map(String::as_str).collect();
        let _ = writeln!(output, "  {label}: {}", joined.join(", "));
    }
}

fn memory_section(memory: &MemoryDiff, output: &mut String) {
    output.push_str("Memory:\n");
    match (memory.left_exists, memory.right_exists) {
        (false, false) => output.push_str("  neither side has CLAUDE.md\n"),
        (true, false) => output.push_str("  only left has CLAUDE.md\n"),
        (false, true) => output.push_str("  only right has CLAUDE.md\n"),
        (true, true) if memory.is_identical() => output.push_str("  identical\n"),
        (true, true) => {
            let _ = writeln!(
                output,
                "  +{} -{} lines",
                memory.lines_added, memory.lines_removed
            );
            for run in memory.line_diff.iter().filter(|r| r.op != LineOp::Equal) {
                let sign = if run.op == LineOp::Insert { '+' } else { '-' };
                for line in run.text.lines() {
                    let _ = writeln!(output, "  {sign} {line}");
                }
            }
        }
    }
}

fn file_set_section(title: &str, diff: &FileSetDiff, output: &mut String) {
    let _ = writeln!(output, "{title}:");
    let keys_match = diff
        .json
        .values()
        .all(|j| matches!(j, JsonDiff::Keys(k) if k.is_empty()));
    if diff.is_identical() && keys_match {
        let _ = writeln!(output, "  identical ({} shared)", diff.shared.len());
        return;
    }
    names("only left", &diff.only_left, output);
    names("only right", &diff.only_right, output);
    names("changed", &diff.changed, output);

    for (file, json) in &diff.json {
        match json {
            JsonDiff::Keys(keys) if keys.is_empty() => {}
            JsonDiff::Keys(keys) => {
                let _ = writeln!(output, "  {file}:");
                names("  keys only left", &keys.keys_only_left, output);
                names("  keys only right", &keys.keys_only_right, output);
                names("  different values", &keys.keys_with_different_values, output);
            }
            JsonDiff::Invalid { error } => {
                let _ = writeln!(output, "  {file}: ✗ {error}");
            }
        }
    }
}

fn mcp_section(diff: &McpDiff, output: &mut String) {
    output.push_str("MCP servers:\n");
    if diff.is_identical() {
        output.push_str("  identical\n");
        return;
    }
    names("only left", &diff.only_left, output);
    names("only right", &diff.only_right, output);
    names("different", &diff.differing, output);
}

/// Render a comparison section by section
#[must_use]
pub fn comparison_summary(result: &ComparisonResult, left: &str, right: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "\n=== Comparison ===");
    let _ = writeln!(output, "Left:  {left}");
    let _ = writeln!(output, "Right: {right}\n");

    memory_section(&result.memory, &mut output);
    file_set_section("Settings", &result.settings, &mut output);
    file_set_section("Agents", &result.agents, &mut output);
    file_set_section("Hooks", &result.hooks, &mut output);
    mcp_section(&result.mcp, &mut output);

    if result.is_identical() {
        output.push_str("\nStatus: ✓ Identical\n");
    } else {
        output.push_str("\nStatus: ✗ Different\n");
    }

    output
}

/// Describe a completed or planned write
#[must_use]
pub fn mutation_summary(report: &MutationReport) -> String {
    let mut output = String::new();
    let prefix = if report.dry_run { "[DRY RUN] Would write" } else { "Wrote" };

    let _ = writeln!(
        output,
        "{prefix} {} bytes to {}",
        report.bytes_written,
        report.target.display()
    );
    if let Some(backup) = &report.backup {
        let verb = if report.dry_run { "Would back up" } else { "Backed up" };
        let _ = writeln!(output, "{verb} previous content to {}", backup.display());
    }

    output
}
