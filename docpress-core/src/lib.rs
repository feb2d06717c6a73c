pub mod config;
pub mod resolver;
pub mod scanner;
pub mod site;
pub mod source;

// Re-export main types
pub use config::{ConfigError, RawConfig};
pub use resolver::{ConfigResolver, ValidationError};
pub use scanner::{PageScanner, orphan_pages};
pub use site::{HeadTag, NavItem, PluginRef, SidebarGroup, SiteConfig, ThemeConfig};
pub use source::{ContentSource, FsContentSource, NullContentSource};
