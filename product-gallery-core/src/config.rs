use crate::error::GalleryError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/products";
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const ENDPOINT_ENV: &str = "PRODUCT_GALLERY_ENDPOINT";
pub const PAGE_SIZE_ENV: &str = "PRODUCT_GALLERY_PAGE_SIZE";

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub endpoint: String,
    pub page_size: usize,
}

/// Partial config as stored on disk; missing keys keep the defaults.
#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    endpoint: Option<String>,
    page_size: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "product-gallery").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

impl GalleryConfig {
    /// Defaults, then the platform config file, then environment variables.
    pub fn load() -> Result<Self, GalleryError> {
        let mut config = Self::default();

        if let Some(path) = get_config_file_path() {
            if path.exists() {
                config.apply_file(&path)?;
            } else {
                debug!("no config file at {}", path.display());
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        info!(
            "config: endpoint={} page_size={}",
            config.endpoint, config.page_size
        );
        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<(), GalleryError> {
        let body = std::fs::read(path)?;
        let file: ConfigFile = serde_json::from_slice(&body)?;
        debug!("applying config file {}", path.display());

        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
        Ok(())
    }

    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), GalleryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            self.page_size = raw.trim().parse().map_err(|_| {
                GalleryError::Config(format!("{} must be a positive integer, got '{}'", PAGE_SIZE_ENV, raw))
            })?;
        }
        Ok(())
    }

    /// Flag overrides from a front end; `None` leaves the value alone.
    pub fn with_overrides(mut self, endpoint: Option<String>, page_size: Option<usize>) -> Result<Self, GalleryError> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.page_size == 0 {
            return Err(GalleryError::Config("page size must be positive".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(GalleryError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}
