use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ProductType;

/// Environment variable holding the completion API bearer credential
pub const TOKEN_ENV: &str = "AMEX_E2_TOKEN";

/// Environment variable overriding the completion model
pub const MODEL_ENV: &str = "AI_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

/// Where the product workbooks live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub root: PathBuf,
    pub business_checking: String,
    pub consumer_checking: String,
    pub consumer_savings: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Never read from or written to disk
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("excel-data"),
            business_checking: "BS-8WW.xlsx".to_string(),
            consumer_checking: "CC-LO7.xlsx".to_string(),
            consumer_savings: "CS.xlsx".to_string(),
        }
    }
}

impl DataConfig {
    /// Data root holding all three workbooks under their default names
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute or root-relative path of a product's workbook
    pub fn workbook_path(&self, product: ProductType) -> PathBuf {
        let file = match product {
            ProductType::BusinessChecking => &self.business_checking,
            ProductType::ConsumerChecking => &self.consumer_checking,
            ProductType::ConsumerSavings => &self.consumer_savings,
        };
        self.root.join(file)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1".to_string(),
            temperature: 0.3,
            token: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Config::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Pick up the credential and model override from the environment
    pub fn apply_env(&mut self) {
        self.completion.token = std::env::var(TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(model) = std::env::var(MODEL_ENV)
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
        {
            self.completion.model = model;
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".bconfig").join("config.toml"))
    }

    pub fn has_token(&self) -> bool {
        self.completion.token.is_some()
    }
}
