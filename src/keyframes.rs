// src/keyframes.rs - Named animation timelines

use crate::error::ConfigError;
use crate::source::RawKeyframeStep;
use std::collections::BTreeMap;
use std::fmt;

/// Position along a timeline, in percent (0..=100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Offset(f64);

impl Offset {
    pub const START: Offset = Offset(0.0);
    pub const END: Offset = Offset(100.0);

    /// Accepts `N%`, `from` and `to`.
    pub fn parse(text: &str) -> Option<Offset> {
        match text.trim() {
            "from" => Some(Offset::START),
            "to" => Some(Offset::END),
            other => {
                let percent: f64 = other.strip_suffix('%')?.trim().parse().ok()?;
                (0.0..=100.0).contains(&percent).then_some(Offset(percent))
            }
        }
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStep {
    pub offset: Offset,
    /// CSS property -> value
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeDefinition {
    pub name: String,
    pub steps: Vec<KeyframeStep>,
}

impl KeyframeDefinition {
    /// Build a timeline from source steps, checking the 0%..100% anchors and
    /// strictly increasing offsets.
    pub fn from_source(name: &str, raw: &[RawKeyframeStep]) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidKeyframeSequence {
            keyframe: name.to_string(),
            reason,
        };

        let mut steps: Vec<KeyframeStep> = Vec::with_capacity(raw.len());
        for step in raw {
            let offset = Offset::parse(&step.at)
                .ok_or_else(|| invalid(format!("invalid offset {:?}", step.at)))?;

            if step.properties.is_empty() {
                return Err(invalid(format!("step at {offset} has no properties")));
            }

            if let Some(previous) = steps.last()
                && offset <= previous.offset
            {
                return Err(invalid(format!(
                    "offset {offset} does not follow {}; offsets must be strictly increasing",
                    previous.offset
                )));
            }

            steps.push(KeyframeStep {
                offset,
                properties: step.properties.clone(),
            });
        }

        match (steps.first(), steps.last()) {
            (None, _) | (_, None) => return Err(invalid("no steps".to_string())),
            (Some(first), _) if first.offset != Offset::START => {
                return Err(invalid(format!("first step is {}, expected 0%", first.offset)));
            }
            (_, Some(last)) if last.offset != Offset::END => {
                return Err(invalid(format!("last step is {}, expected 100%", last.offset)));
            }
            _ => {}
        }

        Ok(Self {
            name: name.to_string(),
            steps,
        })
    }

    pub fn to_source(&self) -> Vec<RawKeyframeStep> {
        self.steps
            .iter()
            .map(|step| RawKeyframeStep {
                at: step.offset.to_string(),
                properties: step.properties.clone(),
            })
            .collect()
    }

    pub fn offsets(&self) -> Vec<Offset> {
        self.steps.iter().map(|s| s.offset).collect()
    }
}

pub fn keyframes_from_source(
    keyframes: &BTreeMap<String, Vec<RawKeyframeStep>>,
) -> Result<Vec<KeyframeDefinition>, ConfigError> {
    keyframes
        .iter()
        .map(|(name, steps)| KeyframeDefinition::from_source(name, steps))
        .collect()
}
