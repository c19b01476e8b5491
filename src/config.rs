use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".clibscanrc.json";

/// Client library folder manifests.
pub const DEFAULT_MANIFEST_PATTERNS: &[&str] = &["**/.content.xml"];

/// Build-tool configuration files (aem-clientlib-generator style).
pub const DEFAULT_CONFIG_PATTERNS: &[&str] = &[
    "**/clientlib.config.js",
    "**/clientlib.config.cjs",
    "**/clientlib.config.mjs",
    "**/clientlib.config.ts",
    "**/clientlibs.config.js",
];

pub const DEFAULT_TEMPLATE_PATTERNS: &[&str] = &["**/*.html", "**/*.htl", "**/*.jsp"];

pub const DEFAULT_SOURCE_PATTERNS: &[&str] = &["**/*.js", "**/*.ts", "**/*.json", "**/*.xml"];

pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/target/**",
    "**/dist/**",
    "**/.git/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_manifests")]
    pub manifests: Vec<String>,
    #[serde(default = "default_configs")]
    pub configs: Vec<String>,
    #[serde(default = "default_templates")]
    pub templates: Vec<String>,
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// Substring identifying the base library for `optimize`.
    #[serde(default = "default_base_category")]
    pub base_category: String,
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_output_dir", alias = "outDir")]
    pub output_dir: String,
}

fn to_strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

fn default_ignores() -> Vec<String> {
    to_strings(DEFAULT_IGNORE_PATTERNS)
}

fn default_manifests() -> Vec<String> {
    to_strings(DEFAULT_MANIFEST_PATTERNS)
}

fn default_configs() -> Vec<String> {
    to_strings(DEFAULT_CONFIG_PATTERNS)
}

fn default_templates() -> Vec<String> {
    to_strings(DEFAULT_TEMPLATE_PATTERNS)
}

fn default_sources() -> Vec<String> {
    to_strings(DEFAULT_SOURCE_PATTERNS)
}

fn default_base_category() -> String {
    "base".to_string()
}

fn default_project_name() -> String {
    "site".to_string()
}

fn default_output_dir() -> String {
    "./report".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            manifests: default_manifests(),
            configs: default_configs(),
            templates: default_templates(),
            sources: default_sources(),
            base_category: default_base_category(),
            project_name: default_project_name(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending field if any glob pattern is invalid.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&str, &Vec<String>); 5] = [
            ("ignores", &self.ignores),
            ("manifests", &self.manifests),
            ("configs", &self.configs),
            ("templates", &self.templates),
            ("sources", &self.sources),
        ];

        for (field, patterns) in fields {
            for pattern in patterns {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in '{}': \"{}\"", field, pattern)
                })?;
            }
        }

        if self.base_category.trim().is_empty() {
            anyhow::bail!("'baseCategory' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
