use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::site::{NavItem, SiteConfig};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

/// Site configuration as written in `docpress.toml`, before resolution.
///
/// Every field is optional here; defaults and validation live in
/// [`crate::resolver::ConfigResolver`]. Unknown keys are rejected at parse
/// time so typos fail the build instead of silently disappearing.
///
/// `head` entries stay untyped (`toml::Value`) on purpose: their shape is
/// checked by the resolver so a malformed entry reports which entry is wrong
/// rather than surfacing as a generic deserialization error.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub base: Option<String>,
    pub head: Vec<toml::Value>,
    pub theme: RawThemeConfig,
    pub plugins: Vec<String>,
}

impl RawConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: RawConfig = toml::from_str(&data)?;

        Ok(config)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RawThemeConfig {
    pub repo: Option<String>,
    pub edit_links: Option<bool>,
    pub edit_link_text: Option<String>,
    pub last_updated: Option<bool>,
    pub nav: Vec<NavItem>,
    pub sidebar: BTreeMap<String, Vec<RawSidebarGroup>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawSidebarGroup {
    pub title: String,
    pub collapsable: Option<bool>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// A resolved configuration converts back to its raw form losslessly, so
/// resolving it again yields an equal value.
impl From<SiteConfig> for RawConfig {
    fn from(site: SiteConfig) -> Self {
        RawConfig {
            title: Some(site.title),
            description: Some(site.description),
            base: Some(site.base),
            head: site.head.into_iter().map(head_tag_value).collect(),
            theme: RawThemeConfig {
                repo: Some(site.theme.repo),
                edit_links: Some(site.theme.edit_links),
                edit_link_text: Some(site.theme.edit_link_text),
                last_updated: Some(site.theme.last_updated),
                nav: site.theme.nav,
                sidebar: site
                    .theme
                    .sidebar
                    .into_iter()
                    .map(|(prefix, groups)| {
                        let groups = groups
                            .into_iter()
                            .map(|g| RawSidebarGroup {
                                title: g.title,
                                collapsable: Some(g.collapsable),
                                children: g.children,
                            })
                            .collect();
                        (prefix, groups)
                    })
                    .collect(),
            },
            plugins: site.plugins.into_iter().map(|p| p.0).collect(),
        }
    }
}

fn head_tag_value(tag: crate::site::HeadTag) -> toml::Value {
    let attrs = tag
        .1
        .into_iter()
        .map(|(k, v)| (k, toml::Value::String(v)))
        .collect::<toml::map::Map<String, toml::Value>>();

    toml::Value::Array(vec![toml::Value::String(tag.0), toml::Value::Table(attrs)])
}
