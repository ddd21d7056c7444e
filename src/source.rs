// src/source.rs - Serde mirror of the on-disk theme document
//
// These types carry no validation. `Configuration::from_document` turns them
// into the checked model and `Configuration::to_document` turns it back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub theme: ThemeSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub safelist: Vec<RawSafelistEntry>,
}

/// Either a bare class name or `{ pattern = "regex" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSafelistEntry {
    Class(String),
    Pattern { pattern: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSection {
    #[serde(default, rename = "fontFamily")]
    pub font_family: BTreeMap<String, RawFontStack>,
    #[serde(default)]
    pub colors: BTreeMap<String, RawColor>,
    #[serde(default, rename = "borderWidth")]
    pub border_width: BTreeMap<String, String>,
    /// keyframe name -> steps in source order
    #[serde(default)]
    pub keyframes: BTreeMap<String, Vec<RawKeyframeStep>>,
    /// animation name -> CSS `animation` shorthand
    #[serde(default)]
    pub animation: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Value(String),
    Group(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFontStack {
    #[serde(default)]
    pub families: Vec<String>,
    /// Name of a built-in stack appended after `families`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawKeyframeStep {
    pub at: String,
    #[serde(flatten)]
    pub properties: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_colors() {
        let doc: ThemeDocument = toml::from_str(
            r##"
            [theme.colors]
            black = "#000505"

            [theme.colors.winter]
            leaf1 = "#009FFD"
            "##,
        )
        .unwrap();

        assert_eq!(
            doc.theme.colors.get("black"),
            Some(&RawColor::Value("#000505".to_string()))
        );
        assert!(matches!(
            doc.theme.colors.get("winter"),
            Some(RawColor::Group(group)) if group.len() == 1
        ));
    }

    #[test]
    fn test_parse_safelist_forms() {
        let doc: ThemeDocument = toml::from_str(
            r#"
            [content]
            files = ["./src/**/*.svelte"]
            safelist = [{ pattern = "text-.*" }, "leaf"]
            "#,
        )
        .unwrap();

        assert_eq!(
            doc.content.safelist,
            vec![
                RawSafelistEntry::Pattern {
                    pattern: "text-.*".to_string()
                },
                RawSafelistEntry::Class("leaf".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyframe_steps_keep_source_order() {
        let doc: ThemeDocument = toml::from_str(
            r#"
            [[theme.keyframes.pulse]]
            at = "0%"
            opacity = "1"

            [[theme.keyframes.pulse]]
            at = "100%"
            opacity = "0.5"

            [[theme.keyframes.pulse]]
            at = "50%"
            opacity = "0.6"
            "#,
        )
        .unwrap();

        let steps = &doc.theme.keyframes["pulse"];
        let offsets: Vec<&str> = steps.iter().map(|s| s.at.as_str()).collect();
        assert_eq!(offsets, vec!["0%", "100%", "50%"]);
        assert_eq!(steps[2].properties["opacity"], "0.6");
        assert!(!steps[2].properties.contains_key("at"));
    }

    #[test]
    fn test_empty_document_defaults() {
        let doc: ThemeDocument = toml::from_str("").unwrap();
        assert_eq!(doc, ThemeDocument::default());
    }
}
