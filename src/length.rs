// src/length.rs - CSS lengths used by border width tokens

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::fmt;

const UNITS: &[&str] = &["px", "rem", "em", "vh", "vw", "pt", "%"];

#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    pub value: f64,
    /// Empty only for a unitless zero
    pub unit: String,
}

impl Length {
    pub fn parse(text: &str) -> Option<Length> {
        let text = text.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);

        let value: f64 = number.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        if unit.is_empty() {
            return (value == 0.0).then(|| Length {
                value,
                unit: String::new(),
            });
        }
        UNITS.contains(&unit).then(|| Length {
            value,
            unit: unit.to_string(),
        })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

pub fn lengths_from_source(
    widths: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Length>, ConfigError> {
    widths
        .iter()
        .map(|(key, value)| {
            Length::parse(value)
                .map(|length| (key.clone(), length))
                .ok_or_else(|| ConfigError::InvalidLength {
                    key: key.clone(),
                    value: value.clone(),
                })
        })
        .collect()
}
