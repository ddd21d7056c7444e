// src/animation.rs - Animation utilities parsed from the CSS `animation` shorthand
//
// `windGust var(--wind-duration, 0.75s) ease-in-out forwards` becomes a
// binding to the `windGust` keyframes with a variable duration, a timing
// function and a fill mode. The keyframe name must come first.

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::fmt;

/// A time value, stored in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Time(f64);

impl Time {
    pub fn from_secs(secs: f64) -> Self {
        Time(secs)
    }

    pub fn parse(text: &str) -> Option<Time> {
        let (number, scale) = if let Some(ms) = text.strip_suffix("ms") {
            (ms, 1000.0)
        } else {
            (text.strip_suffix('s')?, 1.0)
        };
        let value: f64 = number.parse().ok()?;
        (value.is_finite() && value >= 0.0).then(|| Time(value / scale))
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Either a literal time or a `var(--name, fallback)` reference
#[derive(Debug, Clone, PartialEq)]
pub enum Duration {
    Fixed(Time),
    Variable { name: String, fallback: Option<Time> },
}

impl Duration {
    fn parse(token: &str) -> Option<Duration> {
        if let Some(time) = Time::parse(token) {
            return Some(Duration::Fixed(time));
        }

        let inner = token.strip_prefix("var(")?.strip_suffix(')')?;
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(Time::parse(fallback.trim())?)),
            None => (inner.trim(), None),
        };
        if !name.starts_with("--") || name.len() == 2 {
            return None;
        }
        Some(Duration::Variable {
            name: name.to_string(),
            fallback,
        })
    }

    /// The time used when no override is in effect.
    pub fn default_time(&self) -> Option<Time> {
        match self {
            Duration::Fixed(time) => Some(*time),
            Duration::Variable { fallback, .. } => *fallback,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::Fixed(time) => write!(f, "{time}"),
            Duration::Variable {
                name,
                fallback: Some(time),
            } => write!(f, "var({name}, {time})"),
            Duration::Variable {
                name,
                fallback: None,
            } => write!(f, "var({name})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingFunction {
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
    StepStart,
    StepEnd,
    /// `cubic-bezier(...)` or `steps(...)`, kept verbatim
    Function(String),
}

impl TimingFunction {
    fn parse(token: &str) -> Option<TimingFunction> {
        let function = match token {
            "ease" => TimingFunction::Ease,
            "ease-in" => TimingFunction::EaseIn,
            "ease-out" => TimingFunction::EaseOut,
            "ease-in-out" => TimingFunction::EaseInOut,
            "linear" => TimingFunction::Linear,
            "step-start" => TimingFunction::StepStart,
            "step-end" => TimingFunction::StepEnd,
            other
                if (other.starts_with("cubic-bezier(") || other.starts_with("steps("))
                    && other.ends_with(')') =>
            {
                TimingFunction::Function(other.to_string())
            }
            _ => return None,
        };
        Some(function)
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            TimingFunction::Ease => "ease",
            TimingFunction::EaseIn => "ease-in",
            TimingFunction::EaseOut => "ease-out",
            TimingFunction::EaseInOut => "ease-in-out",
            TimingFunction::Linear => "linear",
            TimingFunction::StepStart => "step-start",
            TimingFunction::StepEnd => "step-end",
            TimingFunction::Function(text) => text,
        };
        f.write_str(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationCount {
    Count(f64),
    Infinite,
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationCount::Count(n) => write!(f, "{n}"),
            IterationCount::Infinite => f.write_str("infinite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl Direction {
    fn parse(token: &str) -> Option<Direction> {
        match token {
            "normal" => Some(Direction::Normal),
            "reverse" => Some(Direction::Reverse),
            "alternate" => Some(Direction::Alternate),
            "alternate-reverse" => Some(Direction::AlternateReverse),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Direction::Normal => "normal",
            Direction::Reverse => "reverse",
            Direction::Alternate => "alternate",
            Direction::AlternateReverse => "alternate-reverse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    None,
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    fn parse(token: &str) -> Option<FillMode> {
        match token {
            "none" => Some(FillMode::None),
            "forwards" => Some(FillMode::Forwards),
            "backwards" => Some(FillMode::Backwards),
            "both" => Some(FillMode::Both),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            FillMode::None => "none",
            FillMode::Forwards => "forwards",
            FillMode::Backwards => "backwards",
            FillMode::Both => "both",
        }
    }
}

/// A named animation utility bound to a keyframe definition
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationBinding {
    pub name: String,
    pub keyframe: String,
    pub duration: Duration,
    pub delay: Option<Duration>,
    pub timing: Option<TimingFunction>,
    pub iterations: Option<IterationCount>,
    pub direction: Option<Direction>,
    pub fill: Option<FillMode>,
}

impl AnimationBinding {
    pub fn parse(name: &str, shorthand: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidAnimation {
            animation: name.to_string(),
            reason,
        };

        let tokens = split_top_level(shorthand).ok_or_else(|| {
            invalid(format!("unbalanced parentheses in {shorthand:?}"))
        })?;
        let (keyframe, rest) = tokens
            .split_first()
            .ok_or_else(|| invalid("empty animation value".to_string()))?;

        if !is_identifier(keyframe) {
            return Err(invalid(format!(
                "expected a keyframe name first, found {keyframe:?}"
            )));
        }

        let mut duration = None;
        let mut delay = None;
        let mut timing = None;
        let mut iterations = None;
        let mut direction = None;
        let mut fill = None;

        for token in rest {
            let token = token.as_str();
            let duplicate = |field: &str| invalid(format!("{field} given twice ({token:?})"));

            if let Some(time) = Duration::parse(token) {
                if duration.is_none() {
                    duration = Some(time);
                } else if delay.is_none() {
                    delay = Some(time);
                } else {
                    return Err(invalid(format!("unexpected third time value {token:?}")));
                }
            } else if let Some(function) = TimingFunction::parse(token) {
                if timing.replace(function).is_some() {
                    return Err(duplicate("timing function"));
                }
            } else if let Some(count) = parse_iteration_count(token) {
                if iterations.replace(count).is_some() {
                    return Err(duplicate("iteration count"));
                }
            } else if let Some(dir) = Direction::parse(token) {
                if direction.replace(dir).is_some() {
                    return Err(duplicate("direction"));
                }
            } else if let Some(mode) = FillMode::parse(token) {
                if fill.replace(mode).is_some() {
                    return Err(duplicate("fill mode"));
                }
            } else {
                return Err(invalid(format!("unrecognised token {token:?}")));
            }
        }

        let duration = duration.ok_or_else(|| invalid("missing duration".to_string()))?;

        Ok(Self {
            name: name.to_string(),
            keyframe: keyframe.clone(),
            duration,
            delay,
            timing,
            iterations,
            direction,
            fill,
        })
    }

    /// Duration applied when no CSS variable overrides it
    pub fn default_duration(&self) -> Option<Time> {
        self.duration.default_time()
    }

    /// The CSS `animation` shorthand for this binding
    pub fn shorthand(&self) -> String {
        let mut parts = vec![self.keyframe.clone(), self.duration.to_string()];
        if let Some(timing) = &self.timing {
            parts.push(timing.to_string());
        }
        if let Some(delay) = &self.delay {
            parts.push(delay.to_string());
        }
        if let Some(iterations) = &self.iterations {
            parts.push(iterations.to_string());
        }
        if let Some(direction) = &self.direction {
            parts.push(direction.keyword().to_string());
        }
        if let Some(fill) = &self.fill {
            parts.push(fill.keyword().to_string());
        }
        parts.join(" ")
    }
}

pub fn animations_from_source(
    animations: &BTreeMap<String, String>,
) -> Result<Vec<AnimationBinding>, ConfigError> {
    animations
        .iter()
        .map(|(name, shorthand)| AnimationBinding::parse(name, shorthand))
        .collect()
}

fn parse_iteration_count(token: &str) -> Option<IterationCount> {
    if token == "infinite" {
        return Some(IterationCount::Infinite);
    }
    let count: f64 = token.parse().ok()?;
    (count.is_finite() && count >= 0.0).then_some(IterationCount::Count(count))
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && Duration::parse(token).is_none()
        && TimingFunction::parse(token).is_none()
        && Direction::parse(token).is_none()
        && FillMode::parse(token).is_none()
        && token != "infinite"
}

/// Split on whitespace outside parentheses. `None` if they don't balance.
fn split_top_level(text: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1)?;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if depth != 0 {
        return None;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Some(tokens)
}
