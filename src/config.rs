//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a folio.toml, and if present we load settings from there. Lengths
//! are in layout units (one terminal row is `row_height` units) and times in milliseconds.

use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from folio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width for body text wrapping.
    pub wrap_width: usize,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = 2)]
    /// Heading level that starts a page section.
    pub section_level: usize,
    #[facet(default = 20)]
    /// Layout units per terminal row.
    pub row_height: u32,
    #[facet(default = 100)]
    /// How far before reaching the header a section becomes active.
    pub activation_preroll: u32,
    #[facet(default = 300)]
    /// Scroll offset past which the back-to-top control shows.
    pub scroll_top_threshold: u32,
    #[facet(default = 10)]
    /// Quiet period before a scroll burst is classified.
    pub debounce_ms: u64,
    #[facet(default = 400)]
    /// Duration of smooth scrolls.
    pub smooth_scroll_ms: u64,
    #[facet(default = true)]
    /// Whether the fixed header is drawn.
    pub show_header: bool,
    #[facet(default = true)]
    /// Whether sections animate in as they scroll into view.
    pub animations: bool,
    #[facet(default = true)]
    /// Whether images wait until visible before loading.
    pub lazy_images: bool,
    #[facet(default = 80)]
    /// Narrower terminals collapse the links into a menu.
    pub menu_breakpoint: u16,
    #[facet(default = 5000)]
    /// How long the form's success notice stays up.
    pub success_message_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            file_extensions: vec!["md".to_string()],
            section_level: 2,
            row_height: 20,
            activation_preroll: 100,
            scroll_top_threshold: 300,
            debounce_ms: 10,
            smooth_scroll_ms: 400,
            show_header: true,
            animations: true,
            lazy_images: true,
            menu_breakpoint: 80,
            success_message_ms: 5000,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from folio.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults when absent or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    #[must_use]
    /// Debounce delay for scroll classification.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    /// Duration of smooth scrolls.
    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }

    #[must_use]
    /// How long the success notice is shown.
    pub fn success_message(&self) -> Duration {
        Duration::from_millis(self.success_message_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
