//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Content
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub home: HomeConfig,

    // Contact details shown in the footer and on the contact page
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Pinnacle Global".to_string(),
            subtitle: "Shaping Future Leaders".to_string(),
            description: "Empowering minds, inspiring innovation, and building tomorrow's leaders through world-class education.".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            store: StoreConfig::default(),
            home: HomeConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Which record store implementation serves content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON snapshots on disk, one file per collection
    File,
    /// Remote content API
    Http,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Base URL of the content API (http backend)
    pub base_url: String,
    /// Directory holding `<collection>.json` files (file backend)
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            base_url: "http://localhost:8080/api".to_string(),
            data_dir: "data".to_string(),
        }
    }
}

/// Display caps for the home page aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub courses: usize,
    pub testimonials: usize,
    pub gallery: usize,
    pub events: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            courses: 3,
            testimonials: 3,
            gallery: 6,
            events: 3,
        }
    }
}

/// Institution contact details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub office_hours: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            address: "123 Education Street, Knowledge City, India - 110001".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "info@pinnacleglobal.edu".to_string(),
            office_hours: "Mon - Fri: 9:00 AM - 6:00 PM".to_string(),
        }
    }
}
