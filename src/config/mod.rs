//! Configuration loading.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables prefixed `SHELFCHECK_`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::MediaTypeFilter;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub libraries: LibraryConfig,
    pub media_types: MediaTypeConfig,
    pub catalog: CatalogConfig,
}

/// Which libraries to check and where the directory comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library ids checked when none are passed on the command line
    pub selected: Vec<String>,

    /// Optional path to a directory file replacing the bundled one
    pub directory_path: Option<PathBuf>,
}

/// Media-type display preferences. Both default to enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTypeConfig {
    pub show_ebooks: bool,
    pub show_audiobooks: bool,
}

impl Default for MediaTypeConfig {
    fn default() -> Self {
        Self {
            show_ebooks: true,
            show_audiobooks: true,
        }
    }
}

impl MediaTypeConfig {
    pub fn filter(&self) -> MediaTypeFilter {
        let mut filter = MediaTypeFilter::empty();
        if self.show_ebooks {
            filter |= MediaTypeFilter::EBOOKS;
        }
        if self.show_audiobooks {
            filter |= MediaTypeFilter::AUDIOBOOKS;
        }
        filter
    }
}

/// Catalog endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog search API
    pub base_url: String,

    /// Delay between successive library lookups, in milliseconds
    pub stagger_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://thunder.api.overdrive.com/v2".to_string(),
            stagger_ms: 100,
        }
    }
}

/// Load configuration, optionally layering a file over the defaults.
pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.clone()));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("SHELFCHECK").separator("__"))
        .build()?;

    let mut cfg: Config = settings.try_deserialize()?;
    if cfg.catalog.base_url.is_empty() {
        cfg.catalog.base_url = CatalogConfig::default().base_url;
    }
    Ok(cfg)
}

/// Search the conventional locations for a config file.
///
/// Checks `./shelfcheck.toml`, then the per-user config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("shelfcheck.toml");
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("shelfcheck").join("config.toml");
    user.is_file().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.libraries.selected.is_empty());
        assert!(cfg.media_types.show_ebooks);
        assert!(cfg.media_types.show_audiobooks);
        assert_eq!(cfg.catalog.stagger_ms, 100);
        assert!(cfg.catalog.base_url.contains("thunder"));
    }

    #[test]
    fn test_media_type_filter_from_prefs() {
        let both = MediaTypeConfig::default();
        assert_eq!(both.filter(), MediaTypeFilter::all());

        let ebooks_only = MediaTypeConfig {
            show_ebooks: true,
            show_audiobooks: false,
        };
        assert_eq!(ebooks_only.filter(), MediaTypeFilter::EBOOKS);

        let none = MediaTypeConfig {
            show_ebooks: false,
            show_audiobooks: false,
        };
        assert!(none.filter().is_empty());
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let cfg = load_config(None).unwrap();
        assert!(cfg.media_types.show_ebooks);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml = r#"
            [media_types]
            show_audiobooks = false

            [libraries]
            selected = ["bpl", "lapl"]
        "#;
        let cfg: Config = toml::from_str(toml).unwrap();
        assert!(cfg.media_types.show_ebooks);
        assert!(!cfg.media_types.show_audiobooks);
        assert_eq!(cfg.libraries.selected, vec!["bpl", "lapl"]);
        assert_eq!(cfg.catalog.stagger_ms, 100);
    }
}
