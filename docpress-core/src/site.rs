use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully resolved site configuration.
///
/// Built once by [`crate::resolver::ConfigResolver`] at startup and handed
/// to the rendering pipeline read-only. Every optional field has been
/// populated with its default and `base` is slash-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Path prefix the site is served under. Always starts and ends with `/`.
    pub base: String,
    /// Extra tags injected into every page's `<head>`, in order.
    pub head: Vec<HeadTag>,
    pub theme: ThemeConfig,
    /// Plugin packages to activate, in order.
    pub plugins: Vec<PluginRef>,
}

/// An HTML `<head>` tag: element name plus attributes.
///
/// Serializes as a `[name, attributes]` pair. Duplicate tags are allowed;
/// order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag(pub String, pub BTreeMap<String, String>);

impl HeadTag {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.1
    }
}

/// Theme settings: repo link, edit-link behavior and the nav/sidebar tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Repository slug or URL shown in the top nav. Empty when unset.
    pub repo: String,
    pub edit_links: bool,
    pub edit_link_text: String,
    pub last_updated: bool,
    pub nav: Vec<NavItem>,
    /// Sidebar groups keyed by path prefix (`/guide/` style).
    pub sidebar: BTreeMap<String, Vec<SidebarGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub text: String,
    /// Site-relative path or absolute URL.
    pub link: String,
}

/// A collapsible cluster of pages within one sidebar section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub title: String,
    pub collapsable: bool,
    /// Page slugs relative to the sidebar prefix. The empty slug is the
    /// section landing page (README.md or index.md).
    pub children: Vec<String>,
}

/// Name of an externally resolved plugin package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRef(pub String);

impl PluginRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
