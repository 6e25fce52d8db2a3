//! CLI output formatting for the pipeline.
//!
//! Output is information-first: each combination shape leads with its
//! positional index and its dimension keys, and the page counts that matter
//! (unique pages, skipped duplicates, stale files removed) follow as indented
//! context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Combinations
//! 001 genre × roast_style × target (72)
//! 002 genre × roast_style × famous_critic (54)
//!
//! Pages
//!     120 unique of 126 combinations
//!     6 duplicate slugs skipped
//! ```
//!
//! ## Build
//!
//! ```text
//! Combinations
//! 001 genre × roast_style × target (72)
//!
//! Output
//!     Cleared 75 stale files
//!     72 pages → p/{slug}/index.html
//!     sitemap-programmatic.xml, sitemap-main.xml, sitemap.xml
//!
//! Generated 72 pages, 3 sitemaps
//! ```
//!
//! Each `format_*` function returns lines for testability; the `print_*`
//! wrappers write them to stdout.

use crate::generate::{GenerateReport, Plan, ShapeSummary};
use crate::sitemap::{SITEMAP_INDEX, SITEMAP_MAIN, SITEMAP_PROGRAMMATIC};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn shape_lines(shapes: &[ShapeSummary]) -> Vec<String> {
    let mut lines = vec!["Combinations".to_string()];
    for (i, summary) in shapes.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            summary.shape,
            summary.combinations
        ));
    }
    lines
}

/// Format the dry-run plan. With `list_pages`, every slug is listed in
/// first-seen order.
pub fn format_plan_output(plan: &Plan, list_pages: bool) -> Vec<String> {
    let mut lines = shape_lines(&plan.shapes);

    lines.push(String::new());
    lines.push("Pages".to_string());
    lines.push(format!(
        "{}{} unique of {}",
        indent(1),
        plan.pages.len(),
        plural(plan.combination_total(), "combination", "combinations")
    ));
    if plan.pages.duplicates() > 0 {
        lines.push(format!(
            "{}{} skipped",
            indent(1),
            plural(plan.pages.duplicates(), "duplicate slug", "duplicate slugs")
        ));
    }
    if list_pages {
        for (i, slug) in plan.pages.slugs().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), slug));
        }
    }
    lines
}

/// Print the dry-run plan to stdout.
pub fn print_plan_output(plan: &Plan, list_pages: bool) {
    for line in format_plan_output(plan, list_pages) {
        println!("{}", line);
    }
}

/// Format the summary of a completed build.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = shape_lines(&report.shapes);

    lines.push(String::new());
    lines.push("Output".to_string());
    if report.write.stale_files > 0 {
        lines.push(format!(
            "{}Cleared {}",
            indent(1),
            plural(report.write.stale_files, "stale file", "stale files")
        ));
    }
    lines.push(format!(
        "{}{} \u{2192} p/{{slug}}/index.html",
        indent(1),
        plural(report.write.pages_written, "page", "pages")
    ));
    if report.duplicates > 0 {
        lines.push(format!(
            "{}{} skipped",
            indent(1),
            plural(report.duplicates, "duplicate slug", "duplicate slugs")
        ));
    }
    lines.push(format!(
        "{}{}, {}, {}",
        indent(1),
        SITEMAP_PROGRAMMATIC,
        SITEMAP_MAIN,
        SITEMAP_INDEX
    ));

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages, "page", "pages"),
        plural(report.write.sitemaps_written, "sitemap", "sitemaps")
    ));
    lines
}

/// Print the build summary to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
