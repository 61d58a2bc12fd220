use super::find_page_files;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cloudpage_linter::{lint_page, Diagnostic, DiagnosticLevel, LintOptions};
use cloudpage_model::CloudPage;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Page snapshot or directory to lint (defaults to the configured srcDir)
    pub input: Option<PathBuf>,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Totals across every linted page
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LintSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    diagnostics: &'a [Diagnostic],
}

pub fn lint(args: LintArgs, cwd: &str) -> Result<LintSummary> {
    let input = match &args.input {
        Some(path) => PathBuf::from(cwd).join(path),
        None => Config::load(cwd)?.get_src_dir(cwd),
    };
    let text = args.format == OutputFormat::Text;

    if text {
        println!("🔍 {} CloudPage Linter", "Starting".green().bold());
        println!("   Input: {}", input.display());
        println!();
    }

    let page_files = find_page_files(&input)?;
    let mut summary = LintSummary::default();

    for file in &page_files {
        let diagnostics = lint_file(file)?;
        summary.files += 1;
        summary.errors += diagnostics.iter().filter(|d| d.is_error()).count();
        summary.warnings += diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count();

        match args.format {
            OutputFormat::Json => {
                let report = FileReport {
                    file: file.display().to_string(),
                    diagnostics: &diagnostics,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print_diagnostics(file, &diagnostics, args.all),
        }
    }

    if text {
        print_summary(&summary);
    }

    Ok(summary)
}

fn lint_file(file_path: &Path) -> Result<Vec<Diagnostic>> {
    let page = CloudPage::from_path(file_path)
        .with_context(|| format!("Failed to load {}", file_path.display()))?;
    Ok(lint_page(&page, LintOptions::default()))
}

fn print_diagnostics(file_path: &Path, diagnostics: &[Diagnostic], all: bool) {
    if diagnostics.is_empty() {
        if all {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return;
    }

    println!("{}", file_path.display());

    for diagnostic in diagnostics {
        if !all && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        let location = diagnostic
            .component_id
            .as_deref()
            .map(|id| format!(" {}", id.bright_white()))
            .unwrap_or_default();

        println!(
            "  {} [{}]{} {}",
            level_str, diagnostic.rule, location, diagnostic.message
        );

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
}

fn print_summary(summary: &LintSummary) {
    println!(
        "✨ {} Linting complete!",
        if summary.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", summary.files);

    if summary.errors > 0 {
        println!("   {} {}", "Errors:".red(), summary.errors);
    }
    if summary.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), summary.warnings);
    }
    if summary.errors == 0 && summary.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }
}
