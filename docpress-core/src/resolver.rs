use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::config::{RawConfig, RawSidebarGroup};
use crate::site::{HeadTag, NavItem, PluginRef, SidebarGroup, SiteConfig, ThemeConfig};
use crate::source::ContentSource;

/// A configuration value that failed validation. Loading is all-or-nothing:
/// the first offending field aborts resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Turns a [`RawConfig`] into a normalized, fully defaulted [`SiteConfig`].
///
/// Page existence checks go through the [`ContentSource`] the resolver was
/// built with; nothing here touches the filesystem directly.
pub struct ConfigResolver<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> ConfigResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn resolve(&self, raw: RawConfig) -> Result<SiteConfig, ValidationError> {
        let head = resolve_head(raw.head)?;
        let nav = resolve_nav(raw.theme.nav)?;
        let sidebar = self.resolve_sidebar(raw.theme.sidebar)?;
        let plugins = resolve_plugins(raw.plugins)?;

        Ok(SiteConfig {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            base: normalize_base(raw.base.as_deref().unwrap_or("/")),
            head,
            theme: ThemeConfig {
                repo: raw.theme.repo.unwrap_or_default(),
                edit_links: raw.theme.edit_links.unwrap_or(true),
                edit_link_text: raw.theme.edit_link_text.unwrap_or_default(),
                last_updated: raw.theme.last_updated.unwrap_or(true),
                nav,
                sidebar,
            },
            plugins,
        })
    }

    fn resolve_sidebar(
        &self,
        raw: BTreeMap<String, Vec<RawSidebarGroup>>,
    ) -> Result<BTreeMap<String, Vec<SidebarGroup>>, ValidationError> {
        let mut sidebar = BTreeMap::new();

        for (key, raw_groups) in raw {
            if key.len() < 2 || !key.starts_with('/') || !key.ends_with('/') {
                return Err(ValidationError::new(
                    "sidebar key",
                    format!("`{}` must start and end with /", key),
                ));
            }

            let section = Path::new(key.trim_start_matches('/'));
            let mut groups = Vec::with_capacity(raw_groups.len());

            for group in raw_groups {
                for child in &group.children {
                    if !self.child_exists(section, child) {
                        return Err(ValidationError::new(
                            format!("sidebar[{}]", key),
                            format!("`{}` does not resolve to a page under {}", child, key),
                        ));
                    }
                }

                groups.push(SidebarGroup {
                    title: group.title,
                    collapsable: group.collapsable.unwrap_or(true),
                    children: group.children,
                });
            }

            sidebar.insert(key, groups);
        }

        Ok(sidebar)
    }

    fn child_exists(&self, section: &Path, slug: &str) -> bool {
        if slug.is_empty() {
            // The empty slug is the section landing page
            self.source.page_exists(&section.join("README.md"))
                || self.source.page_exists(&section.join("index.md"))
        } else {
            self.source.page_exists(&section.join(format!("{}.md", slug)))
        }
    }
}

/// Collapses `base` to exactly one leading and one trailing slash.
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

fn resolve_head(entries: Vec<toml::Value>) -> Result<Vec<HeadTag>, ValidationError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| resolve_head_entry(i, entry))
        .collect()
}

fn resolve_head_entry(index: usize, entry: toml::Value) -> Result<HeadTag, ValidationError> {
    let field = format!("head[{}]", index);

    let toml::Value::Array(parts) = entry else {
        return Err(ValidationError::new(
            field,
            "must be a [tag, attributes] pair",
        ));
    };
    let Ok([name, attrs]) = <[toml::Value; 2]>::try_from(parts) else {
        return Err(ValidationError::new(
            field,
            "must be a [tag, attributes] pair",
        ));
    };
    let toml::Value::String(name) = name else {
        return Err(ValidationError::new(field, "tag name must be a string"));
    };
    let toml::Value::Table(attrs) = attrs else {
        return Err(ValidationError::new(
            field,
            "attributes must be a table of strings",
        ));
    };

    let mut resolved = BTreeMap::new();
    for (attr, value) in attrs {
        let toml::Value::String(value) = value else {
            return Err(ValidationError::new(
                field,
                format!("attribute `{}` must be a string", attr),
            ));
        };
        resolved.insert(attr, value);
    }

    Ok(HeadTag(name, resolved))
}

fn resolve_nav(nav: Vec<NavItem>) -> Result<Vec<NavItem>, ValidationError> {
    for (i, item) in nav.iter().enumerate() {
        if item.text.is_empty() {
            return Err(ValidationError::new(
                format!("theme.nav[{}].text", i),
                "must not be empty",
            ));
        }
        if item.link.is_empty() {
            return Err(ValidationError::new(
                format!("theme.nav[{}].link", i),
                "must not be empty",
            ));
        }
    }

    Ok(nav)
}

fn resolve_plugins(plugins: Vec<String>) -> Result<Vec<PluginRef>, ValidationError> {
    plugins
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                Err(ValidationError::new(
                    format!("plugins[{}]", i),
                    "must be a non-empty package identifier",
                ))
            } else {
                Ok(PluginRef(name))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::NavItem;

    struct FakeSource(&'static [&'static str]);

    impl ContentSource for FakeSource {
        fn page_exists(&self, rel_path: &Path) -> bool {
            self.0.iter().any(|p| Path::new(p) == rel_path)
        }
    }

    fn resolver(pages: &'static [&'static str]) -> ConfigResolver<FakeSource> {
        ConfigResolver::new(FakeSource(pages))
    }

    fn guide_config() -> RawConfig {
        toml::from_str(
            r#"
base = "/"
head = [["meta", { name = "x", content = "y" }]]
plugins = []

[theme]
nav = []

[theme.sidebar]
"/guide/" = [{ title = "Guide", collapsable = false, children = [""] }]
"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_config_gets_defaults() {
        let site = resolver(&[]).resolve(RawConfig::default()).unwrap();

        assert_eq!(site.base, "/");
        assert!(site.theme.edit_links);
        assert!(site.theme.last_updated);
        assert_eq!(site.theme.edit_link_text, "");
        assert!(site.head.is_empty());
        assert!(site.theme.nav.is_empty());
        assert!(site.theme.sidebar.is_empty());
        assert!(site.plugins.is_empty());
    }

    #[test]
    fn guide_scenario_resolves_with_defaults() {
        let site = resolver(&["guide/README.md"])
            .resolve(guide_config())
            .unwrap();

        assert!(site.theme.edit_links, "edit_links should default to true");
        assert_eq!(site.head[0].name(), "meta");
        assert_eq!(site.head[0].attrs()["name"], "x");

        let groups = &site.theme.sidebar["/guide/"];
        assert_eq!(groups[0].title, "Guide");
        assert!(!groups[0].collapsable);
    }

    #[test]
    fn base_is_slash_normalized() {
        for (input, expected) in [
            ("/", "/"),
            ("", "/"),
            ("docs", "/docs/"),
            ("/docs", "/docs/"),
            ("docs/", "/docs/"),
            ("/a/b/", "/a/b/"),
        ] {
            let raw = RawConfig {
                base: Some(input.to_string()),
                ..RawConfig::default()
            };
            let site = resolver(&[]).resolve(raw).unwrap();
            assert_eq!(site.base, expected, "base {:?}", input);
        }
    }

    #[test]
    fn sidebar_key_without_slashes_fails() {
        let raw = RawConfig {
            theme: crate::config::RawThemeConfig {
                sidebar: BTreeMap::from([(
                    "guide".to_string(),
                    vec![RawSidebarGroup {
                        title: "Guide".to_string(),
                        collapsable: None,
                        children: vec![],
                    }],
                )]),
                ..Default::default()
            },
            ..RawConfig::default()
        };

        let err = resolver(&[]).resolve(raw).unwrap_err();
        assert_eq!(err.field, "sidebar key");
        assert!(err.reason.contains("must start and end with /"));
    }

    #[test]
    fn bare_slash_is_not_a_sidebar_key() {
        let raw = RawConfig {
            theme: crate::config::RawThemeConfig {
                sidebar: BTreeMap::from([(
                    "/".to_string(),
                    vec![RawSidebarGroup {
                        title: "Root".to_string(),
                        collapsable: None,
                        children: vec![],
                    }],
                )]),
                ..Default::default()
            },
            ..RawConfig::default()
        };

        assert_eq!(
            resolver(&[]).resolve(raw).unwrap_err().field,
            "sidebar key"
        );
    }

    #[test]
    fn head_entry_must_be_a_pair() {
        for entry in [
            toml::Value::String("meta".to_string()),
            toml::Value::Array(vec![toml::Value::String("meta".to_string())]),
            toml::Value::Array(vec![
                toml::Value::String("meta".to_string()),
                toml::Value::Table(toml::map::Map::new()),
                toml::Value::String("extra".to_string()),
            ]),
        ] {
            let raw = RawConfig {
                head: vec![entry],
                ..RawConfig::default()
            };
            let err = resolver(&[]).resolve(raw).unwrap_err();
            assert_eq!(err.field, "head[0]");
        }
    }

    #[test]
    fn head_attribute_values_must_be_strings() {
        let mut attrs = toml::map::Map::new();
        attrs.insert("content".to_string(), toml::Value::Integer(3));
        let raw = RawConfig {
            head: vec![toml::Value::Array(vec![
                toml::Value::String("meta".to_string()),
                toml::Value::Table(attrs),
            ])],
            ..RawConfig::default()
        };

        let err = resolver(&[]).resolve(raw).unwrap_err();
        assert_eq!(err.field, "head[0]");
        assert!(err.reason.contains("content"));
    }

    #[test]
    fn missing_child_page_fails() {
        let err = resolver(&[]).resolve(guide_config()).unwrap_err();
        assert_eq!(err.field, "sidebar[/guide/]");
    }

    #[test]
    fn empty_child_accepts_index_md() {
        assert!(resolver(&["guide/index.md"]).resolve(guide_config()).is_ok());
    }

    #[test]
    fn named_child_maps_to_md_file() {
        let mut raw = guide_config();
        raw.theme.sidebar.get_mut("/guide/").unwrap()[0]
            .children
            .push("Setup".to_string());

        assert!(
            resolver(&["guide/README.md"]).resolve(raw.clone()).is_err(),
            "Setup.md missing"
        );
        assert!(
            resolver(&["guide/README.md", "guide/Setup.md"])
                .resolve(raw)
                .is_ok()
        );
    }

    #[test]
    fn collapsable_defaults_to_true() {
        let raw = RawConfig {
            theme: crate::config::RawThemeConfig {
                sidebar: BTreeMap::from([(
                    "/guide/".to_string(),
                    vec![RawSidebarGroup {
                        title: "Guide".to_string(),
                        collapsable: None,
                        children: vec![],
                    }],
                )]),
                ..Default::default()
            },
            ..RawConfig::default()
        };

        let site = resolver(&[]).resolve(raw).unwrap();
        assert!(site.theme.sidebar["/guide/"][0].collapsable);
    }

    #[test]
    fn empty_plugin_name_fails() {
        let raw = RawConfig {
            plugins: vec!["@docs/plugin-back-to-top".to_string(), " ".to_string()],
            ..RawConfig::default()
        };

        let err = resolver(&[]).resolve(raw).unwrap_err();
        assert_eq!(err.field, "plugins[1]");
    }

    #[test]
    fn empty_nav_link_fails() {
        let raw = RawConfig {
            theme: crate::config::RawThemeConfig {
                nav: vec![NavItem {
                    text: "Guide".to_string(),
                    link: String::new(),
                }],
                ..Default::default()
            },
            ..RawConfig::default()
        };

        let err = resolver(&[]).resolve(raw).unwrap_err();
        assert_eq!(err.field, "theme.nav[0].link");
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = resolver(&["guide/README.md"]);
        let first = resolver.resolve(guide_config()).unwrap();
        let second = resolver.resolve(RawConfig::from(first.clone())).unwrap();

        assert_eq!(first, second);
    }
}
