// src/safelist.rs - Classes the generator must emit even if scanning misses them

use crate::error::ConfigError;
use crate::source::RawSafelistEntry;
use fancy_regex::Regex;

#[derive(Debug, Clone)]
pub enum SafelistEntry {
    Class(String),
    /// A JavaScript-compatible regex, compiled once at load time
    Pattern(Regex),
}

impl SafelistEntry {
    pub fn from_source(raw: &RawSafelistEntry) -> Result<Self, ConfigError> {
        match raw {
            RawSafelistEntry::Class(class) => {
                if class.is_empty() || class.chars().any(char::is_whitespace) {
                    return Err(ConfigError::InvalidSafelistClass {
                        class: class.clone(),
                    });
                }
                Ok(SafelistEntry::Class(class.clone()))
            }
            RawSafelistEntry::Pattern { pattern } => {
                let invalid = |reason: String| ConfigError::InvalidSafelistPattern {
                    pattern: pattern.clone(),
                    reason,
                };
                if let Some(syntax) = rust_only_syntax(pattern) {
                    return Err(invalid(format!(
                        "{syntax} is not supported by JavaScript regular expressions"
                    )));
                }
                Regex::new(pattern)
                    .map(SafelistEntry::Pattern)
                    .map_err(|e| invalid(e.to_string()))
            }
        }
    }

    pub fn to_source(&self) -> RawSafelistEntry {
        match self {
            SafelistEntry::Class(class) => RawSafelistEntry::Class(class.clone()),
            SafelistEntry::Pattern(regex) => RawSafelistEntry::Pattern {
                pattern: regex.as_str().to_string(),
            },
        }
    }

    /// The literal class name or the pattern source
    pub fn as_str(&self) -> &str {
        match self {
            SafelistEntry::Class(class) => class,
            SafelistEntry::Pattern(regex) => regex.as_str(),
        }
    }

    pub fn matches(&self, class: &str) -> bool {
        match self {
            SafelistEntry::Class(name) => name == class,
            // Exceeding the backtrack limit counts as no match
            SafelistEntry::Pattern(regex) => regex.is_match(class).unwrap_or(false),
        }
    }
}

/// Group syntax the generator's JavaScript `RegExp` would reject.
///
/// `(?:`, `(?=`, `(?!`, `(?<=`, `(?<!` and `(?<name>` are shared with
/// JavaScript. `(?P<name>`, `(?P=name)` and inline flag groups such as
/// `(?i)` are not.
fn rust_only_syntax(pattern: &str) -> Option<&'static str> {
    let bytes = pattern.as_bytes();
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class && bytes.get(i + 1) == Some(&b'?') => {
                match bytes.get(i + 2) {
                    Some(b':' | b'=' | b'!' | b'<') => {}
                    Some(b'P') => return Some("Python-style named group `(?P...)`"),
                    _ => return Some("inline flag group `(?flags)`"),
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

impl PartialEq for SafelistEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SafelistEntry::Class(a), SafelistEntry::Class(b)) => a == b,
            (SafelistEntry::Pattern(a), SafelistEntry::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Safelist {
    entries: Vec<SafelistEntry>,
}

impl Safelist {
    pub fn from_source(raw: &[RawSafelistEntry]) -> Result<Self, ConfigError> {
        let entries = raw
            .iter()
            .map(SafelistEntry::from_source)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn to_source(&self) -> Vec<RawSafelistEntry> {
        self.entries.iter().map(SafelistEntry::to_source).collect()
    }

    pub fn entries(&self) -> &[SafelistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry forces `class` into the output
    pub fn contains(&self, class: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(class))
    }

    /// Entries that match none of `classes`, in safelist order.
    pub fn unmatched<'a, I>(&self, classes: I) -> Vec<&SafelistEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        self.entries
            .iter()
            .filter(|entry| !classes.iter().any(|class| entry.matches(class)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> RawSafelistEntry {
        RawSafelistEntry::Pattern {
            pattern: p.to_string(),
        }
    }

    fn class(c: &str) -> RawSafelistEntry {
        RawSafelistEntry::Class(c.to_string())
    }

    #[test]
    fn test_seasonal_pattern_matches_leaves() {
        let entry =
            SafelistEntry::from_source(&pattern("text-(winter|summer|autumn)-leaf[1-4]")).unwrap();
        assert!(entry.matches("text-winter-leaf1"));
        assert!(entry.matches("text-autumn-leaf4"));
        assert!(!entry.matches("text-spring-leaf1"));
        assert!(!entry.matches("text-winter-leaf5"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = SafelistEntry::from_source(&pattern("text-(winter")).unwrap_err();
        match err {
            ConfigError::InvalidSafelistPattern { pattern, .. } => assert_eq!(pattern, "text-(winter"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookaround_and_backreferences_accepted() {
        let entry = SafelistEntry::from_source(&pattern("text-(?!winter).*")).unwrap();
        assert!(entry.matches("text-summer-leaf1"));
        assert!(!entry.matches("text-winter-leaf1"));

        let entry = SafelistEntry::from_source(&pattern("(?<=bg-)(red|blue)")).unwrap();
        assert!(entry.matches("bg-red"));
        assert!(!entry.matches("text-red"));

        let entry = SafelistEntry::from_source(&pattern(r"(?<tone>[a-z]+)-\k<tone>")).unwrap();
        assert!(entry.matches("dark-dark"));
        assert!(!entry.matches("dark-light"));
    }

    #[test]
    fn test_non_javascript_group_syntax_rejected() {
        for source in ["text-(?P<season>winter)", "(?i)TEXT-brown", "(?x: a b )"] {
            let err = SafelistEntry::from_source(&pattern(source)).unwrap_err();
            match err {
                ConfigError::InvalidSafelistPattern { pattern, reason } => {
                    assert_eq!(pattern, source);
                    assert!(reason.contains("JavaScript"), "{reason}");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_group_syntax_inside_class_or_escaped_is_literal() {
        assert!(SafelistEntry::from_source(&pattern(r"text-[(?P]+")).is_ok());
        assert!(SafelistEntry::from_source(&pattern(r"text-\(?i")).is_ok());
    }

    #[test]
    fn test_invalid_class_rejected() {
        assert!(SafelistEntry::from_source(&class("")).is_err());
        assert!(SafelistEntry::from_source(&class("rain fall")).is_err());
    }

    #[test]
    fn test_unmatched_report() {
        let safelist = Safelist::from_source(&[
            pattern("text-(winter|summer|autumn)-leaf[1-4]"),
            class("text-brown"),
            class("rain-drop"),
        ])
        .unwrap();

        let unmatched = safelist.unmatched(["text-summer-leaf2", "text-brown"]);
        let names: Vec<&str> = unmatched.iter().map(|e| e.as_str()).collect();
        assert_eq!(names, vec!["rain-drop"]);
        assert!(safelist.contains("text-winter-leaf3"));
        assert!(!safelist.contains("snow-drop"));
    }

    #[test]
    fn test_source_round_trip() {
        let raw = vec![pattern("bg-.*"), class("leaf")];
        let safelist = Safelist::from_source(&raw).unwrap();
        assert_eq!(safelist.to_source(), raw);
        assert_eq!(Safelist::from_source(&safelist.to_source()).unwrap(), safelist);
    }
}
