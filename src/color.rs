// src/color.rs - Color tokens, groups and the palette

use crate::error::ConfigError;
use crate::source::RawColor;
use std::collections::BTreeMap;
use std::fmt;

/// Number of leaves in a seasonal group (`leaf1`..`leaf4`).
pub const SEASONAL_LEAVES: usize = 4;

const LEAF_PREFIX: &str = "leaf";

/// A color represented as RGB values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`. The leading `#` is required.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorToken {
    pub name: String,
    pub color: Color,
}

/// A nested namespace of colors, e.g. `winter.leaf1` or `background.blue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGroup {
    pub name: String,
    pub tokens: Vec<ColorToken>,
}

impl ColorGroup {
    /// Seasonal groups are the ones keyed `leaf1`..`leaf4`.
    pub fn is_seasonal(&self) -> bool {
        self.tokens.iter().any(|t| t.name.starts_with(LEAF_PREFIX))
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.tokens.iter().find(|t| t.name == name).map(|t| t.color)
    }

    /// Leaf `index` of a seasonal group, 1-based.
    pub fn leaf(&self, index: usize) -> Option<Color> {
        self.get(&format!("{LEAF_PREFIX}{index}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEntry {
    Token(ColorToken),
    Group(ColorGroup),
}

impl PaletteEntry {
    pub fn name(&self) -> &str {
        match self {
            PaletteEntry::Token(token) => &token.name,
            PaletteEntry::Group(group) => &group.name,
        }
    }
}

/// All named colors of a theme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn from_source(colors: &BTreeMap<String, RawColor>) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(colors.len());

        for (name, raw) in colors {
            let entry = match raw {
                RawColor::Value(value) => PaletteEntry::Token(parse_token(name, value, name)?),
                RawColor::Group(members) => PaletteEntry::Group(parse_group(name, members)?),
            };
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    pub fn to_source(&self) -> BTreeMap<String, RawColor> {
        self.entries
            .iter()
            .map(|entry| {
                let raw = match entry {
                    PaletteEntry::Token(token) => RawColor::Value(token.color.to_hex()),
                    PaletteEntry::Group(group) => RawColor::Group(
                        group
                            .tokens
                            .iter()
                            .map(|t| (t.name.clone(), t.color.to_hex()))
                            .collect(),
                    ),
                };
                (entry.name().to_string(), raw)
            })
            .collect()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level color token by name
    pub fn color(&self, name: &str) -> Option<Color> {
        self.entries.iter().find_map(|entry| match entry {
            PaletteEntry::Token(token) if token.name == name => Some(token.color),
            _ => None,
        })
    }

    pub fn group(&self, name: &str) -> Option<&ColorGroup> {
        self.entries.iter().find_map(|entry| match entry {
            PaletteEntry::Group(group) if group.name == name => Some(group),
            _ => None,
        })
    }

    pub fn seasonal_groups(&self) -> impl Iterator<Item = &ColorGroup> {
        self.entries.iter().filter_map(|entry| match entry {
            PaletteEntry::Group(group) if group.is_seasonal() => Some(group),
            _ => None,
        })
    }

    /// Flattened `(utility name, color)` pairs: `black`, `winter-leaf1`, ...
    pub fn utility_names(&self) -> Vec<(String, Color)> {
        let mut names = Vec::new();
        for entry in &self.entries {
            match entry {
                PaletteEntry::Token(token) => names.push((token.name.clone(), token.color)),
                PaletteEntry::Group(group) => {
                    for token in &group.tokens {
                        names.push((format!("{}-{}", group.name, token.name), token.color));
                    }
                }
            }
        }
        names
    }
}

fn parse_token(name: &str, value: &str, path: &str) -> Result<ColorToken, ConfigError> {
    let color = Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColorValue {
        token: path.to_string(),
        value: value.to_string(),
    })?;
    Ok(ColorToken {
        name: name.to_string(),
        color,
    })
}

fn parse_group(name: &str, members: &BTreeMap<String, String>) -> Result<ColorGroup, ConfigError> {
    let mut tokens = Vec::with_capacity(members.len());
    for (member, value) in members {
        tokens.push(parse_token(member, value, &format!("{name}.{member}"))?);
    }
    let group = ColorGroup {
        name: name.to_string(),
        tokens,
    };

    if group.is_seasonal() {
        check_seasonal(&group)?;
    }

    Ok(group)
}

fn check_seasonal(group: &ColorGroup) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidColorGroup {
        group: group.name.clone(),
        reason,
    };

    if group.tokens.len() != SEASONAL_LEAVES {
        return Err(invalid(format!(
            "seasonal group has {} entries, expected exactly {SEASONAL_LEAVES}",
            group.tokens.len()
        )));
    }

    for index in 1..=SEASONAL_LEAVES {
        if group.leaf(index).is_none() {
            return Err(invalid(format!("missing `{LEAF_PREFIX}{index}`")));
        }
    }

    Ok(())
}
