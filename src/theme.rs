// src/theme.rs - The validated `theme` section

use crate::animation::{AnimationBinding, animations_from_source};
use crate::color::Palette;
use crate::error::ConfigError;
use crate::font::{FontToken, fonts_from_source};
use crate::keyframes::{KeyframeDefinition, keyframes_from_source};
use crate::length::{Length, lengths_from_source};
use crate::source::ThemeSection;
use log::warn;
use std::collections::{BTreeMap, BTreeSet};

/// Theme configuration: colors, fonts, border widths and animations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub colors: Palette,
    pub fonts: Vec<FontToken>,
    pub border_width: BTreeMap<String, Length>,
    pub keyframes: Vec<KeyframeDefinition>,
    pub animations: Vec<AnimationBinding>,
}

impl Theme {
    pub fn from_section(section: &ThemeSection) -> Result<Self, ConfigError> {
        let theme = Self {
            colors: Palette::from_source(&section.colors)?,
            fonts: fonts_from_source(&section.font_family)?,
            border_width: lengths_from_source(&section.border_width)?,
            keyframes: keyframes_from_source(&section.keyframes)?,
            animations: animations_from_source(&section.animation)?,
        };
        theme.check_references()?;
        Ok(theme)
    }

    pub fn to_section(&self) -> ThemeSection {
        ThemeSection {
            font_family: self
                .fonts
                .iter()
                .map(|font| (font.name.clone(), font.to_source()))
                .collect(),
            colors: self.colors.to_source(),
            border_width: self
                .border_width
                .iter()
                .map(|(key, length)| (key.clone(), length.to_string()))
                .collect(),
            keyframes: self
                .keyframes
                .iter()
                .map(|def| (def.name.clone(), def.to_source()))
                .collect(),
            animation: self
                .animations
                .iter()
                .map(|binding| (binding.name.clone(), binding.shorthand()))
                .collect(),
        }
    }

    /// Every binding must name a defined keyframe. Keyframes no binding uses
    /// are allowed but logged.
    fn check_references(&self) -> Result<(), ConfigError> {
        let defined: BTreeSet<&str> = self.keyframes.iter().map(|k| k.name.as_str()).collect();

        for binding in &self.animations {
            if !defined.contains(binding.keyframe.as_str()) {
                return Err(ConfigError::DanglingAnimationReference {
                    animation: binding.name.clone(),
                    keyframe: binding.keyframe.clone(),
                });
            }
        }

        for keyframe in &self.keyframes {
            if self.bindings_for(&keyframe.name).next().is_none() {
                warn!(
                    "Keyframes `{}` are not used by any animation",
                    keyframe.name
                );
            }
        }

        Ok(())
    }

    pub fn font(&self, name: &str) -> Option<&FontToken> {
        self.fonts.iter().find(|f| f.name == name)
    }

    pub fn keyframe(&self, name: &str) -> Option<&KeyframeDefinition> {
        self.keyframes.iter().find(|k| k.name == name)
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationBinding> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// The keyframe definition a binding resolves to
    pub fn resolve(&self, binding: &AnimationBinding) -> Option<&KeyframeDefinition> {
        self.keyframe(&binding.keyframe)
    }

    pub fn bindings_for<'a>(
        &'a self,
        keyframe: &'a str,
    ) -> impl Iterator<Item = &'a AnimationBinding> + 'a {
        self.animations.iter().filter(move |a| a.keyframe == keyframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawKeyframeStep;

    fn section_with(keyframes: &[(&str, &[&str])], animations: &[(&str, &str)]) -> ThemeSection {
        let mut section = ThemeSection::default();
        for (name, offsets) in keyframes {
            let steps = offsets
                .iter()
                .map(|at| RawKeyframeStep {
                    at: at.to_string(),
                    properties: BTreeMap::from([(
                        "transform".to_string(),
                        "translateX(0)".to_string(),
                    )]),
                })
                .collect();
            section.keyframes.insert(name.to_string(), steps);
        }
        for (name, shorthand) in animations {
            section
                .animation
                .insert(name.to_string(), shorthand.to_string());
        }
        section
    }

    #[test]
    fn test_binding_resolves_to_keyframe() {
        let section = section_with(
            &[("windGust", &["0%", "50%", "100%"])],
            &[(
                "wind-gust",
                "windGust var(--wind-duration, 0.75s) ease-in-out forwards",
            )],
        );
        let theme = Theme::from_section(&section).unwrap();

        let binding = theme.animation("wind-gust").unwrap();
        let keyframe = theme.resolve(binding).unwrap();
        assert_eq!(keyframe.name, "windGust");
        assert_eq!(keyframe.steps.len(), 3);
        assert_eq!(binding.default_duration().map(|t| t.as_secs()), Some(0.75));
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let section = section_with(
            &[("windGust", &["0%", "100%"])],
            &[("gust", "bogusKeyframe 1s linear")],
        );
        let err = Theme::from_section(&section).unwrap_err();
        match err {
            ConfigError::DanglingAnimationReference {
                animation,
                keyframe,
            } => {
                assert_eq!(animation, "gust");
                assert_eq!(keyframe, "bogusKeyframe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shared_keyframes() {
        let section = section_with(
            &[("fadeIn", &["0%", "100%"])],
            &[
                ("fade-in", "fadeIn 0.5s ease-in-out"),
                ("tree-fade-in", "fadeIn 0.5s ease forwards"),
            ],
        );
        let theme = Theme::from_section(&section).unwrap();
        assert_eq!(theme.bindings_for("fadeIn").count(), 2);
    }

    #[test]
    fn test_section_round_trip() {
        let section = section_with(&[("spin", &["0%", "100%"])], &[("spin", "spin 1s linear infinite")]);
        let theme = Theme::from_section(&section).unwrap();
        assert_eq!(Theme::from_section(&theme.to_section()).unwrap(), theme);
    }
}
