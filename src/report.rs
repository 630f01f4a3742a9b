/*!
 * Rendering of validation reports and the language status view.
 *
 * Nothing here decides anything: the renderers only format what the
 * validation service produced.
 */

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::validation::{DirectoryStatus, ValidationIssue, ValidationReport};

// @module: Report rendering

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Render a report in the requested format
pub fn render(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Markdown => Ok(render_markdown(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize validation report")
        }
    }
}

fn status_label(report: &ValidationReport) -> &'static str {
    if report.result.success { "PASSED" } else { "FAILED" }
}

fn location(issue: &ValidationIssue) -> String {
    match &issue.file {
        Some(file) => format!(" ({})", file.display()),
        None => String::new(),
    }
}

// writeln! into a String cannot fail
pub fn render_text(report: &ValidationReport) -> String {
    let result = &report.result;
    let summary = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Validation Summary");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "Status:   {}", status_label(report));
    let _ = writeln!(out, "Files:    {}", summary.total_files);
    let _ = writeln!(out, "Words:    {}", summary.total_words);
    let _ = writeln!(out, "Errors:   {}", summary.errors);
    let _ = writeln!(out, "Warnings: {}", summary.warnings);

    if !result.errors.is_empty() {
        let _ = writeln!(out, "\nErrors:");
        for issue in &result.errors {
            let _ = writeln!(out, "  ✗ {}", issue);
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for issue in &result.warnings {
            let _ = writeln!(out, "  ⚠ {}", issue);
        }
    }

    if !summary.languages.is_empty() {
        let _ = writeln!(out, "\nLanguages:");
        let _ = writeln!(out, "  {:<6}{:>7}{:>8}{:>8}{:>10}", "lang", "files", "words", "errors", "warnings");
        for language in &summary.languages {
            let _ = writeln!(
                out,
                "  {:<6}{:>7}{:>8}{:>8}{:>10}",
                language.language.code(),
                language.files,
                language.words,
                language.errors,
                language.warnings
            );
        }
    }

    let with_findings: Vec<_> = report.comparisons.iter().filter(|c| !c.is_clean()).collect();
    if !with_findings.is_empty() {
        let _ = writeln!(out, "\nTranslation comparisons:");
        for comparison in with_findings {
            let _ = writeln!(
                out,
                "  {} -> {} ({} missing, {} extra)",
                comparison.source_file.display(),
                comparison.target_file.display(),
                comparison.missing_words.len(),
                comparison.extra_words.len()
            );
            for error in comparison.flattened_errors() {
                let _ = writeln!(out, "    - [{}] {}", kind_label(&error.kind), error.message);
            }
        }
    }

    out
}

pub fn render_markdown(report: &ValidationReport) -> String {
    let result = &report.result;
    let summary = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "# Validation Report\n");
    let _ = writeln!(out, "**Status:** {}\n", status_label(report));
    let _ = writeln!(out, "| Metric | Count |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| Files | {} |", summary.total_files);
    let _ = writeln!(out, "| Words | {} |", summary.total_words);
    let _ = writeln!(out, "| Errors | {} |", summary.errors);
    let _ = writeln!(out, "| Warnings | {} |", summary.warnings);

    if !summary.languages.is_empty() {
        let _ = writeln!(out, "\n## Languages\n");
        let _ = writeln!(out, "| Language | Files | Words | Errors | Warnings |");
        let _ = writeln!(out, "|----------|-------|-------|--------|----------|");
        for language in &summary.languages {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                language.language.name(),
                language.files,
                language.words,
                language.errors,
                language.warnings
            );
        }
    }

    for (title, issues) in [("Errors", &result.errors), ("Warnings", &result.warnings)] {
        if issues.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n## {}\n", title);
        for issue in issues.iter() {
            let _ = writeln!(out, "- {}{}", issue.message, location(issue));
        }
    }

    let with_findings: Vec<_> = report.comparisons.iter().filter(|c| !c.is_clean()).collect();
    if !with_findings.is_empty() {
        let _ = writeln!(out, "\n## Translation Comparisons\n");
        for comparison in with_findings {
            let _ = writeln!(out, "### `{}`\n", comparison.target_file.display());
            if !comparison.extra_words.is_empty() {
                let _ = writeln!(out, "Extra words: {}\n", comparison.extra_words.join(", "));
            }
            for error in comparison.flattened_errors() {
                let _ = writeln!(out, "- `{}` {}", kind_label(&error.kind), error.message);
            }
            let _ = writeln!(out);
        }
    }

    out
}

fn kind_label(kind: &crate::validation::TranslationErrorKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Text table of the content tree per content type and language
pub fn render_status(status: &[DirectoryStatus]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Language Structure");
    let _ = writeln!(out, "==================");

    let mut current = None;
    for entry in status {
        if current != Some(entry.content_type) {
            current = Some(entry.content_type);
            let _ = writeln!(out, "\n{}:", entry.content_type);
        }

        if !entry.exists {
            let _ = writeln!(out, "  {:<4} missing", entry.language.code());
            continue;
        }

        let grades: Vec<String> = entry
            .grades
            .iter()
            .map(|g| format!("g{}:{}", g.grade, g.files))
            .collect();
        let _ = writeln!(
            out,
            "  {:<4} {:>4} files  [{}]",
            entry.language.code(),
            entry.total_files(),
            grades.join(" ")
        );
    }

    out
}
