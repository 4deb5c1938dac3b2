//! Configuration management for repovec.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! API credentials are only ever read from the environment.

use crate::core::embedding::Distance;
use crate::core::error::{RepovecError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Token budget used when nothing overrides it
pub const DEFAULT_MAX_TOKENS: usize = 800;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Traversal and chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Estimated tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Directory names never descended into
    #[serde(default = "default_skipped_dirs")]
    pub skipped_dirs: Vec<String>,

    /// File names never read
    #[serde(default = "default_skipped_files")]
    pub skipped_files: Vec<String>,

    /// Extensions (without the dot) of files to read
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Extra glob patterns to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Optional dimension override sent with each request
    #[serde(default)]
    pub dimensions: Option<usize>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (from OPENAI_API_KEY only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Vector store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Qdrant REST endpoint
    #[serde(default = "default_qdrant_url")]
    pub url: String,

    /// Destination collection
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Vector dimensionality of the collection
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,

    /// Distance metric of the collection
    #[serde(default)]
    pub distance: Distance,

    /// Characters of chunk text kept in the payload preview
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (from QDRANT_API_KEY only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Per-run defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// User id recorded when the caller does not pass one
    #[serde(default = "default_user_id")]
    pub default_user_id: String,
}

// Default value functions
fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

fn default_max_file_size() -> usize {
    10
}

fn default_embedding_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_qdrant_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_collection() -> String {
    "codebase".to_string()
}

fn default_vector_size() -> usize {
    1536
}

fn default_preview_chars() -> usize {
    300
}

fn default_user_id() -> String {
    "user_123".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_skipped_dirs() -> Vec<String> {
    to_strings(&[
        "node_modules",
        ".git",
        "dist",
        "build",
        ".next",
        "out",
        "coverage",
        ".turbo",
        ".vercel",
        ".cache",
        "logs",
        "log",
        ".expo",
        ".idea",
        ".vscode",
        "storybook-static",
        ".firebase",
        "cypress",
        "public",
        "tmp",
        "temp",
    ])
}

fn default_skipped_files() -> Vec<String> {
    to_strings(&[
        // Lock files
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "bun.lockb",
        // Secrets
        ".env",
        ".env.local",
        ".env.production",
        // Project boilerplate
        "README.md",
        "LICENSE",
        "CHANGELOG.md",
        // Tool configuration
        "tsconfig.json",
        "next.config.js",
        "vite.config.ts",
        "tsconfig.node.json",
        "tsconfig.app.json",
        "webpack.config.js",
        "eslint.config.js",
        ".gitignore",
        ".eslintrc",
        ".prettierrc",
        ".editorconfig",
        ".npmrc",
    ])
}

fn default_allowed_extensions() -> Vec<String> {
    to_strings(&[
        // Web
        "js", "jsx", "ts", "tsx", "json", "html", "css", "scss", "md",
        // Scripting
        "py", "php", "rb", "sh", "bat",
        // Systems
        "cpp", "cc", "cxx", "c", "h", "hpp", "rs", "go", "java", "kt", "kts",
        // Config
        "xml", "toml", "yml", "yaml", "ini",
    ])
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            max_file_size_mb: default_max_file_size(),
            skipped_dirs: default_skipped_dirs(),
            skipped_files: default_skipped_files(),
            allowed_extensions: default_allowed_extensions(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            dimensions: None,
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            collection: default_collection(),
            vector_size: default_vector_size(),
            distance: Distance::default(),
            preview_chars: default_preview_chars(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RepovecError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// File lookup order:
    /// 1. REPOVEC_CONFIG env var
    /// 2. XDG config file (~/.config/repovec/config.toml)
    /// 3. ./repovec.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("REPOVEC_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("repovec.toml").exists() {
                Self::from_file("repovec.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(max_tokens) = env::var("REPOVEC_MAX_TOKENS") {
            if let Ok(n) = max_tokens.parse() {
                self.indexing.max_tokens = n;
            }
        }
        if let Ok(max_size) = env::var("REPOVEC_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_file_size_mb = size;
            }
        }

        // Embedding configuration
        if let Ok(model) = env::var("REPOVEC_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(base_url) = env::var("REPOVEC_EMBEDDING_BASE_URL") {
            self.embedding.base_url = base_url;
        }
        if let Ok(dimensions) = env::var("REPOVEC_EMBEDDING_DIMENSIONS") {
            if let Ok(d) = dimensions.parse() {
                self.embedding.dimensions = Some(d);
            }
        }
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            self.embedding.api_key = Some(key);
        }

        // Storage configuration
        if let Ok(url) = env::var("REPOVEC_QDRANT_URL") {
            self.storage.url = url;
        }
        if let Ok(collection) = env::var("REPOVEC_COLLECTION") {
            self.storage.collection = collection;
        }
        if let Ok(key) = env::var("QDRANT_API_KEY") {
            self.storage.api_key = Some(key);
        }

        // Run configuration
        if let Ok(user_id) = env::var("REPOVEC_USER_ID") {
            self.run.default_user_id = user_id;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate indexing config
        if self.indexing.max_tokens == 0 {
            return Err(RepovecError::ConfigError(
                "Max tokens must be non-zero".to_string(),
            ));
        }

        // Validate embedding config
        if self.embedding.model.trim().is_empty() {
            return Err(RepovecError::ConfigError(
                "Embedding model must not be empty".to_string(),
            ));
        }

        if !is_http_url(&self.embedding.base_url) {
            return Err(RepovecError::ConfigError(format!(
                "Embedding base URL must be an http(s) URL: {}",
                self.embedding.base_url
            )));
        }

        if self.embedding.timeout_secs == 0 {
            return Err(RepovecError::ConfigError(
                "Embedding timeout must be non-zero".to_string(),
            ));
        }

        // Validate storage config
        if !is_http_url(&self.storage.url) {
            return Err(RepovecError::ConfigError(format!(
                "Qdrant URL must be an http(s) URL: {}",
                self.storage.url
            )));
        }

        if self.storage.collection.trim().is_empty() {
            return Err(RepovecError::ConfigError(
                "Collection name must not be empty".to_string(),
            ));
        }

        if self.storage.vector_size == 0 {
            return Err(RepovecError::ConfigError(
                "Vector size must be non-zero".to_string(),
            ));
        }

        if let Some(dimensions) = self.embedding.dimensions {
            if dimensions != self.storage.vector_size {
                return Err(RepovecError::ConfigError(format!(
                    "Embedding dimensions ({dimensions}) must match collection vector size ({})",
                    self.storage.vector_size
                )));
            }
        }

        if self.storage.timeout_secs == 0 {
            return Err(RepovecError::ConfigError(
                "Storage timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Max tokens: {}", self.indexing.max_tokens);
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!(
            "  Skipped dirs: {}, skipped files: {}, extensions: {}",
            self.indexing.skipped_dirs.len(),
            self.indexing.skipped_files.len(),
            self.indexing.allowed_extensions.len()
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::info!("  Embedding model: {}", self.embedding.model);
        tracing::info!("  Embedding base URL: {}", self.embedding.base_url);
        tracing::info!(
            "  OpenAI API key: {}",
            if self.embedding.api_key.is_some() {
                "set"
            } else {
                "missing"
            }
        );
        tracing::info!("  Qdrant URL: {}", self.storage.url);
        tracing::info!(
            "  Collection: {} ({} dims, {:?})",
            self.storage.collection,
            self.storage.vector_size,
            self.storage.distance
        );
        tracing::info!("  Default user: {}", self.run.default_user_id);
    }
}
