//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid interwiki name: {0:?}")]
    InvalidWikiName(String),
}

/// Main configuration struct matching the wikiref.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name this wiki is registered under in the interwiki map
    #[serde(default = "default_self")]
    pub interwikiname: String,

    /// Path prefix the wiki is served under
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Wiki name -> base URL
    #[serde(default)]
    pub interwiki_map: BTreeMap<String, String>,

    /// Wiki hosting user home pages
    #[serde(default = "default_self")]
    pub user_homewiki: String,

    /// Show editor IP/hostname for anonymous edits
    #[serde(default = "default_true")]
    pub show_hosts: bool,

    #[serde(default)]
    pub navi_bar: Vec<NaviBarEntry>,

    #[serde(default)]
    pub sistersites: Vec<SisterSite>,

    #[serde(default)]
    pub auth: AuthConfig,

    // Internal: path to config file
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_self() -> String {
    String::from("Self")
}

fn default_url_prefix() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

/// Static navibar entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaviBarEntry {
    #[serde(default = "default_navi_class")]
    pub css_class: String,
    pub href: String,
    pub text: String,
    #[serde(default)]
    pub title: String,
}

fn default_navi_class() -> String {
    String::from("wikilink")
}

/// Sister wiki publishing an item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SisterSite {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_methods")]
    pub methods: Vec<AuthMethodConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            methods: default_auth_methods(),
        }
    }
}

fn default_auth_methods() -> Vec<AuthMethodConfig> {
    vec![AuthMethodConfig::Moin]
}

/// One entry of the login backend chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum AuthMethodConfig {
    Moin,
    Given(GivenAuthConfig),
}

/// Options for trusting a username supplied by the web server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GivenAuthConfig {
    #[serde(default)]
    pub strip_maildomain: bool,

    #[serde(default)]
    pub strip_windomain: bool,

    #[serde(default)]
    pub titlecase: bool,

    #[serde(default)]
    pub remove_blanks: bool,

    #[serde(default)]
    pub autocreate: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Config::parse(&contents)?;

        config.config_path = Some(path.to_path_buf());
        tracing::info!(
            "Loaded config {:?} with {} interwiki entries",
            path,
            config.interwiki_map.len()
        );

        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the file this config was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Normalized url prefix with leading and trailing slash ("/wiki/" or "/")
    pub fn normalized_url_prefix(&self) -> String {
        normalize_url_prefix(&self.url_prefix)
    }

    /// Login inputs requested by the configured backends
    pub fn login_inputs(&self) -> Vec<&'static str> {
        let mut inputs = Vec::new();
        for method in &self.auth.methods {
            let wanted: &[&'static str] = match method {
                AuthMethodConfig::Moin => &["username", "password"],
                AuthMethodConfig::Given(_) => &["special_no_input"],
            };
            for input in wanted {
                if !inputs.contains(input) {
                    inputs.push(*input);
                }
            }
        }
        inputs
    }

    /// Whether any backend takes interactive login input
    pub fn has_login(&self) -> bool {
        self.auth
            .methods
            .iter()
            .any(|m| matches!(m, AuthMethodConfig::Moin))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for name in std::iter::once(&self.interwikiname).chain(self.interwiki_map.keys()) {
            if name.is_empty() || name.contains(':') || name.contains('/') {
                return Err(ConfigError::InvalidWikiName(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interwikiname: default_self(),
            url_prefix: default_url_prefix(),
            interwiki_map: BTreeMap::new(),
            user_homewiki: default_self(),
            show_hosts: true,
            navi_bar: Vec::new(),
            sistersites: Vec::new(),
            auth: AuthConfig::default(),
            config_path: None,
        }
    }
}

/// Ensure url prefixes have a leading and trailing slash
pub fn normalize_url_prefix(raw: &str) -> String {
    let mut s = raw.trim().to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}
