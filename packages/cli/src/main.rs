mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, init, lint, CompileArgs, InitArgs, LintArgs};
use tracing_subscriber::EnvFilter;

/// CloudPage CLI - compile page snapshots into publishable CloudPages
#[derive(Parser, Debug)]
#[command(name = "cloudpage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new CloudPage project
    Init(InitArgs),

    /// Compile page snapshots to HTML
    Compile(CompileArgs),

    /// Check page snapshots for problems the compiler silently works around
    Lint(LintArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, cwd: &str) -> anyhow::Result<bool> {
    match command {
        Command::Init(args) => init(args, cwd).map(|_| true),
        Command::Compile(args) => compile(args, cwd).map(|_| true),
        Command::Lint(args) => lint(args, cwd).map(|summary| summary.errors == 0),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli.command, &cwd.display().to_string()));

    match result {
        Ok(true) => {}
        // Lint found errors; the report is already printed
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!();
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            eprintln!();
            std::process::exit(1);
        }
    }
}
