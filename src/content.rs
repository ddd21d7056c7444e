// src/content.rs - Content globs deciding which files the generator scans

use crate::error::ConfigError;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A single file-matching rule, e.g. `./src/**/*.{html,js,svelte,ts}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentGlobPattern(String);

impl ContentGlobPattern {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The glob in gitignore form: `./src/**` is anchored as `/src/**`.
    fn normalized(&self) -> String {
        let (negated, body) = match self.0.strip_prefix('!') {
            Some(body) => ("!", body),
            None => ("", self.0.as_str()),
        };
        match body.strip_prefix("./") {
            Some(relative) => format!("{negated}/{relative}"),
            None => format!("{negated}{body}"),
        }
    }
}

/// Compiled content globs, rooted at the directory the configuration came from.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    root: PathBuf,
    patterns: Vec<ContentGlobPattern>,
    overrides: Override,
}

impl ContentMatcher {
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = OverrideBuilder::new(root);
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let glob = ContentGlobPattern(pattern.clone());
            builder
                .add(&glob.normalized())
                .map_err(|source| ConfigError::InvalidContentGlob {
                    pattern: pattern.clone(),
                    source,
                })?;
            compiled.push(glob);
        }

        let overrides = builder
            .build()
            .map_err(|source| ConfigError::InvalidContentGlob {
                pattern: patterns.join(", "),
                source,
            })?;

        if compiled.is_empty() {
            warn!("No content globs configured; the generator will scan nothing");
        }
        debug!(
            "Compiled {} content glob(s) rooted at {}",
            compiled.len(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            patterns: compiled,
            overrides,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &[ContentGlobPattern] {
        &self.patterns
    }

    /// Whether a file under the root would be scanned. Paths may be relative
    /// to the root or carry it as a prefix.
    pub fn is_match(&self, path: &Path) -> bool {
        !self.patterns.is_empty() && self.overrides.matched(path, false).is_whitelist()
    }

    /// Every file under the root the generator would scan, sorted. Honors
    /// `.gitignore` like the generator does.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.patterns.is_empty() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .overrides(self.overrides.clone())
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }
}

/// Only the patterns take part in equality; the root is where they were loaded from.
impl PartialEq for ContentMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}
