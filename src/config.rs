// src/config.rs - Loading the configuration document

use crate::content::ContentMatcher;
use crate::error::ConfigError;
use crate::safelist::Safelist;
use crate::source::{ContentSection, ThemeDocument};
use crate::theme::Theme;
use log::{debug, info};
use std::path::Path;

/// The theme shipped with the crate
pub const DEFAULT_THEME: &str = include_str!("../runtime/theme.toml");

/// A fully validated configuration.
///
/// Built once, never mutated, and handed to the generator by reference.
/// Two configurations are equal when their documents are; where a
/// configuration was loaded from does not take part.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub content: ContentMatcher,
    pub safelist: Safelist,
    pub theme: Theme,
    pub plugins: Vec<String>,
}

impl Configuration {
    /// Load the embedded default theme. Content globs resolve against the
    /// current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_THEME)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml_str_in(content, Path::new("."))
    }

    /// Parse a document whose content globs are relative to `root`.
    pub fn from_toml_str_in(content: &str, root: &Path) -> Result<Self, ConfigError> {
        let document: ThemeDocument = toml::from_str(content)?;
        Self::from_document(&document, root)
    }

    /// Load a configuration file. Content globs resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::from_file_in(path, root)
    }

    /// Load a configuration file whose content globs resolve against `root`
    /// rather than the file's directory. Used for user-wide configs that
    /// describe whichever project they are run in.
    pub fn from_file_in(path: &Path, root: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loading configuration from {} (content root {})",
            path.display(),
            root.display()
        );
        Self::from_toml_str_in(&content, root)
    }

    pub fn from_document(document: &ThemeDocument, root: &Path) -> Result<Self, ConfigError> {
        let config = Self {
            content: ContentMatcher::new(root, &document.content.files)?,
            safelist: Safelist::from_source(&document.content.safelist)?,
            theme: Theme::from_section(&document.theme)?,
            plugins: document.plugins.clone(),
        };

        info!(
            "Loaded configuration: {} color entries, {} keyframes, {} animations, {} safelist entries",
            config.theme.colors.entries().len(),
            config.theme.keyframes.len(),
            config.theme.animations.len(),
            config.safelist.len()
        );
        Ok(config)
    }

    pub fn to_document(&self) -> ThemeDocument {
        ThemeDocument {
            plugins: self.plugins.clone(),
            content: ContentSection {
                files: self
                    .content
                    .patterns()
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
                safelist: self.safelist.to_source(),
            },
            theme: self.theme.to_section(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.to_document())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_theme_loads() {
        let config = Configuration::load().unwrap();
        assert_eq!(config.theme.colors.color("brown"), Some(Color::new(0x70, 0x4E, 0x2E)));
        assert_eq!(config.theme.keyframes.len(), 8);
        assert_eq!(config.theme.animations.len(), 9);
        assert_eq!(config.safelist.len(), 11);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_round_trip_is_identical() {
        let config = Configuration::load().unwrap();
        let text = config.to_toml_string().unwrap();
        let reloaded = Configuration::from_toml_str(&text).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.to_toml_string().unwrap(), text);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = Configuration::from_toml_str("[theme.colors\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_roots_globs_at_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leafwind.toml");
        fs::write(&path, DEFAULT_THEME).unwrap();

        let config = Configuration::from_file(&path).unwrap();
        assert_eq!(config.content.root(), temp_dir.path());
        assert_eq!(config, Configuration::load().unwrap());
    }

    #[test]
    fn test_from_file_in_uses_given_root() {
        let config_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let path = config_dir.path().join("theme.toml");
        fs::write(&path, DEFAULT_THEME).unwrap();
        fs::create_dir_all(project.path().join("src/routes")).unwrap();
        fs::write(project.path().join("src/routes/+page.svelte"), "<div />").unwrap();

        let config = Configuration::from_file_in(&path, project.path()).unwrap();
        assert_eq!(config.content.root(), project.path());
        assert_eq!(
            config.content.walk(),
            vec![project.path().join("src/routes/+page.svelte")]
        );
    }

    #[test]
    fn test_missing_file() {
        let err = Configuration::from_file(Path::new("/nonexistent/leafwind.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
