// src/font.rs - Font family stacks

use crate::error::ConfigError;
use crate::source::RawFontStack;
use std::collections::BTreeMap;

const MONO_STACK: &[&str] = &[
    "ui-monospace",
    "SFMono-Regular",
    "Menlo",
    "Monaco",
    "Consolas",
    "Liberation Mono",
    "Courier New",
    "monospace",
];

const SANS_STACK: &[&str] = &[
    "ui-sans-serif",
    "system-ui",
    "sans-serif",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Segoe UI Symbol",
    "Noto Color Emoji",
];

const SERIF_STACK: &[&str] = &[
    "ui-serif",
    "Georgia",
    "Cambria",
    "Times New Roman",
    "Times",
    "serif",
];

/// Built-in stacks a font token can fall back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStack {
    Mono,
    Sans,
    Serif,
}

impl FallbackStack {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mono" => Some(FallbackStack::Mono),
            "sans" => Some(FallbackStack::Sans),
            "serif" => Some(FallbackStack::Serif),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FallbackStack::Mono => "mono",
            FallbackStack::Sans => "sans",
            FallbackStack::Serif => "serif",
        }
    }

    pub fn families(&self) -> &'static [&'static str] {
        match self {
            FallbackStack::Mono => MONO_STACK,
            FallbackStack::Sans => SANS_STACK,
            FallbackStack::Serif => SERIF_STACK,
        }
    }
}

/// A logical font name (`mono`) and its ordered family list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontToken {
    pub name: String,
    /// Families listed explicitly, preferred first
    pub preferred: Vec<String>,
    pub fallback: Option<FallbackStack>,
}

impl FontToken {
    pub fn from_source(name: &str, raw: &RawFontStack) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidFontStack {
            font: name.to_string(),
            reason,
        };

        if let Some(position) = raw.families.iter().position(|f| f.trim().is_empty()) {
            return Err(invalid(format!("family #{} is empty", position + 1)));
        }

        let fallback = match &raw.fallback {
            Some(stack) => Some(
                FallbackStack::from_name(stack)
                    .ok_or_else(|| invalid(format!("unknown fallback stack {stack:?}")))?,
            ),
            None => None,
        };

        if raw.families.is_empty() && fallback.is_none() {
            return Err(invalid("no font families".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            preferred: raw.families.clone(),
            fallback,
        })
    }

    pub fn to_source(&self) -> RawFontStack {
        RawFontStack {
            families: self.preferred.clone(),
            fallback: self.fallback.map(|stack| stack.name().to_string()),
        }
    }

    /// Full stack: explicit families, then the fallback stack.
    pub fn families(&self) -> Vec<&str> {
        self.preferred
            .iter()
            .map(String::as_str)
            .chain(self.fallback.iter().flat_map(|s| s.families().iter().copied()))
            .collect()
    }

    /// CSS `font-family` value, quoting names that contain spaces.
    pub fn css_value(&self) -> String {
        self.families()
            .into_iter()
            .map(|family| {
                if family.contains(' ') {
                    format!("\"{family}\"")
                } else {
                    family.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn fonts_from_source(
    fonts: &BTreeMap<String, RawFontStack>,
) -> Result<Vec<FontToken>, ConfigError> {
    fonts
        .iter()
        .map(|(name, raw)| FontToken::from_source(name, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(families: &[&str], fallback: Option<&str>) -> RawFontStack {
        RawFontStack {
            families: families.iter().map(|f| f.to_string()).collect(),
            fallback: fallback.map(str::to_string),
        }
    }

    #[test]
    fn test_preferred_family_comes_first() {
        let font = FontToken::from_source("mono", &stack(&["Roboto Mono"], Some("mono"))).unwrap();
        let families = font.families();
        assert_eq!(families[0], "Roboto Mono");
        assert_eq!(families[1], "ui-monospace");
        assert_eq!(families.last(), Some(&"monospace"));
        assert_eq!(families.len(), 1 + MONO_STACK.len());
    }

    #[test]
    fn test_css_value_quotes_spaced_names() {
        let font = FontToken::from_source("mono", &stack(&["Roboto Mono", "Menlo"], None)).unwrap();
        assert_eq!(font.css_value(), "\"Roboto Mono\", Menlo");
    }

    #[test]
    fn test_unknown_fallback_rejected() {
        let err = FontToken::from_source("mono", &stack(&["Roboto Mono"], Some("cursive")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFontStack { ref font, .. } if font == "mono"));
    }

    #[test]
    fn test_empty_stack_rejected() {
        assert!(FontToken::from_source("mono", &stack(&[], None)).is_err());
        assert!(FontToken::from_source("mono", &stack(&["  "], Some("mono"))).is_err());
    }

    #[test]
    fn test_fallback_only_is_allowed() {
        let font = FontToken::from_source("sans", &stack(&[], Some("sans"))).unwrap();
        assert_eq!(font.families()[0], "ui-sans-serif");
        assert_eq!(font.to_source(), stack(&[], Some("sans")));
    }
}
