use cloudpage_compiler_html::GenerateOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "cloudpage.config.json";

/// CloudPage project configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page snapshots (`*.json`)
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory generated documents are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Origin of the page-view pixel endpoint
    #[serde(default)]
    pub base_url: String,

    /// Generate editor previews instead of publishable documents
    #[serde(default)]
    pub preview: bool,

    /// Render literal fallbacks instead of template interpolation
    #[serde(default)]
    pub hide_ampscript: bool,
}

fn default_src_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            is_for_preview: self.preview,
            hide_ampscript: self.hide_ampscript,
            base_url: self.base_url.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            base_url: String::new(),
            preview: false,
            hide_ampscript: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "cloudpages",
            "outDir": "build",
            "baseUrl": "https://studio.example.com",
            "hideAmpscript": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "cloudpages");
        assert_eq!(config.out_dir, "build");
        assert!(!config.preview);

        let options = config.generate_options();
        assert_eq!(options.base_url, "https://studio.example.com");
        assert!(options.hide_ampscript);
        assert!(!options.is_for_preview);
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, "dist");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
