use super::find_page_files;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use cloudpage_compiler_html::{generate_document, GenerateOptions};
use cloudpage_model::CloudPage;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Page snapshot or directory of snapshots (defaults to the configured srcDir)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Generate editor previews: no A/B branching, no tracking pixel
    #[arg(long)]
    pub preview: bool,

    /// Render literal fallbacks instead of template interpolation
    #[arg(long)]
    pub hide_ampscript: bool,

    /// Origin of the page-view pixel endpoint (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl CompileArgs {
    fn generate_options(&self, config: &Config) -> GenerateOptions {
        let mut options = config.generate_options();
        options.is_for_preview |= self.preview;
        options.hide_ampscript |= self.hide_ampscript;
        if let Some(base_url) = &self.base_url {
            options.base_url = base_url.clone();
        }
        options
    }
}

/// Compiles every page under the input and returns the written files
pub fn compile(args: CompileArgs, cwd: &str) -> Result<Vec<PathBuf>> {
    let config = Config::load(cwd)?;
    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let options = args.generate_options(&config);

    println!("{}", "🔨 Compiling CloudPages...".bright_blue().bold());

    let page_files = find_page_files(&input)?;
    if page_files.is_empty() {
        println!("{}", "⚠️  No page snapshots found".yellow());
        return Ok(Vec::new());
    }

    println!("Found {} pages", page_files.len());

    // A single file lands directly in the output directory
    let root = if input.is_dir() {
        input.clone()
    } else {
        input.parent().map(Path::to_path_buf).unwrap_or_default()
    };

    let mut written = Vec::new();
    let mut error_count = 0;

    for page_file in &page_files {
        let relative_path = page_file.strip_prefix(&root).unwrap_or(page_file);
        match compile_file(page_file, relative_path, &out_dir, &options, args.stdout) {
            Ok(output) => {
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stdout".to_string())
                );
                written.extend(output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} pages successfully",
            "✅".green(),
            page_files.len()
        );
        Ok(written)
    } else {
        Err(anyhow!(
            "{} of {} pages failed to compile",
            error_count,
            page_files.len()
        ))
    }
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    out_dir: &Path,
    options: &GenerateOptions,
    stdout: bool,
) -> Result<Option<PathBuf>> {
    let page = CloudPage::from_path(file_path)
        .with_context(|| format!("Failed to load {}", file_path.display()))?;

    let html = generate_document(&page, options);
    debug!(page = %page.id, bytes = html.len(), "Generated document");

    if stdout {
        println!("{}", html);
        return Ok(None);
    }

    let output_file = out_dir.join(relative_path).with_extension("html");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;

    Ok(Some(output_file))
}
