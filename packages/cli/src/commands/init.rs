use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for page snapshots
    #[arg(short, long, default_value = "pages")]
    pub src_dir: String,

    /// Origin of the page-view pixel endpoint
    #[arg(short, long, default_value = "")]
    pub base_url: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_PAGE: &str = r##"{
  "id": "example",
  "name": "Example",
  "meta": {
    "title": "Welcome",
    "language": "en",
    "dataExtensionKey": "YOUR_DATA_EXTENSION_KEY",
    "security": {"type": "none"}
  },
  "styles": {
    "themeColor": "#0070d2",
    "fontFamily": "Roboto"
  },
  "components": [
    {"id": "title", "type": "Title", "order": 0, "props": {"text": "Hello", "dataBinding": "FirstName"}},
    {"id": "row", "type": "Columns", "order": 1, "props": {"columnCount": 2, "columnWidths": [60, 40]}},
    {"id": "intro", "type": "Paragraph", "parentId": "row", "column": 0, "props": {"text": "Leave your details and we will get back to you."}},
    {"id": "signup", "type": "Form", "parentId": "row", "column": 1, "props": {
      "fields": {
        "name": {"enabled": true, "required": true},
        "email": {"enabled": true, "required": true, "prefillFromUrl": true}
      },
      "buttonText": "Send",
      "successMessage": "Thanks!"
    }}
  ]
}
"##;

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing CloudPage project...".bright_blue().bold()
    );

    // Create source directory if it doesn't exist
    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("example.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_PAGE)?;
        println!("  {} Created example.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        base_url: args.base_url.clone(),
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/example.json", args.src_dir);
    println!("  2. Run: cloudpage lint");
    println!("  3. Run: cloudpage compile");
    println!("  4. Check output in {}/", config.out_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpage_model::CloudPage;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            src_dir: "pages".to_string(),
            base_url: "https://studio.example.com".to_string(),
            force,
        }
    }

    #[test]
    fn test_init_writes_config_and_example() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(args(false), &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.base_url, "https://studio.example.com");

        let example = dir.path().join("pages/example.json");
        let page = CloudPage::from_path(&example).unwrap();
        assert_eq!(page.id, "example");
        assert!(page.form().is_some());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let config_path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&config_path, r#"{"srcDir": "mine"}"#).unwrap();

        init(args(false), &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().src_dir, "mine");

        init(args(true), &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().src_dir, "pages");
    }
}
