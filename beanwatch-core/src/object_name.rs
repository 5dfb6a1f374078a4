//! Management Object Names
//!
//! ## Overview
//!
//! Every managed bean in a management registry is addressed by an object name:
//!
//! ```text
//! java.lang:type=GarbageCollector,name=PS Scavenge
//! \_______/ \______________________________________/
//!  domain               key property list
//! ```
//!
//! This module parses and validates that textual form. It is the grammar that
//! [`JmxBeanAssignment`](crate::assignment::JmxBeanAssignment) relies on when it
//! concatenates its domain and parameters into a candidate name.
//!
//! ## Grammar
//!
//! ```text
//! name      := domain ':' props
//! domain    := any chars except ':' and '\n'
//! props     := entry (',' entry)*
//! entry     := prop | '*'
//! prop      := key '=' value
//! key       := 1* chars except ':' ',' '=' '*' '?' '\n'
//! value     := unquoted | quoted
//! unquoted  := 1* chars except ',' '=' ':' '"' '\n'
//! quoted    := '"' (char except '"' '\' '\n' | '\' ('"' | '\' | '*' | '?' | 'n'))* '"'
//! ```
//!
//! Wildcards (`*`, `?`) in the domain or in a value turn the name into a
//! pattern. A single `*` entry anywhere in the property list makes it a
//! property list pattern; it is always written last when displayed. Patterns
//! are parsed and flagged but never matched here.
//!
//! ## Ordering
//!
//! Key properties keep the order they were written in. [`Display`](fmt::Display)
//! reproduces that order; [`ObjectName::canonical_name`] sorts keys
//! lexicographically. Two names that differ only in key order are equal.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::errors::{ObjectNameError, ObjectNameResult};

const WILDCARDS: [char; 2] = ['*', '?'];

/// A parsed management object name
#[derive(Debug, Clone)]
pub struct ObjectName {
    domain: String,

    /// Key properties in written order
    properties: Vec<(String, String)>,

    property_list_pattern: bool,
    property_value_pattern: bool,

    /// Domain plus key-sorted properties, computed once at parse time
    canonical: String,
}

impl ObjectName {
    /// Parse an object name from its textual form
    pub fn parse(name: &str) -> ObjectNameResult<Self> {
        let (domain, props) = name
            .split_once(':')
            .ok_or(ObjectNameError::MissingDomainSeparator)?;

        if domain.contains('\n') {
            return Err(ObjectNameError::InvalidDomainCharacter { ch: '\n' });
        }
        if props.is_empty() {
            return Err(ObjectNameError::MissingKeyProperties);
        }

        let mut properties: Vec<(String, String)> = Vec::new();
        let mut property_list_pattern = false;
        let mut property_value_pattern = false;
        let mut rest = props;

        loop {
            if let Some(after) = rest
                .strip_prefix('*')
                .filter(|a| a.is_empty() || a.starts_with(','))
            {
                if property_list_pattern {
                    return Err(ObjectNameError::RepeatedWildcard);
                }
                property_list_pattern = true;
                match after.strip_prefix(',') {
                    None => break,
                    Some("") => return Err(ObjectNameError::TrailingComma),
                    Some(next) => {
                        rest = next;
                        continue;
                    }
                }
            }

            let eq = match rest.find(|c: char| c == '=' || c == ',') {
                Some(i) if rest.as_bytes()[i] == b'=' => i,
                Some(i) => {
                    return Err(ObjectNameError::MissingEquals {
                        property: rest[..i].to_string(),
                    })
                }
                None => {
                    return Err(ObjectNameError::MissingEquals {
                        property: rest.to_string(),
                    })
                }
            };

            let key = &rest[..eq];
            validate_key(key)?;
            rest = &rest[eq + 1..];

            let (value, tail) = if rest.starts_with('"') {
                let (len, wildcard) = scan_quoted(rest, key)?;
                property_value_pattern |= wildcard;
                rest.split_at(len)
            } else {
                let end = rest.find(',').unwrap_or(rest.len());
                let value = &rest[..end];
                property_value_pattern |= validate_unquoted(value, key)?;
                rest.split_at(end)
            };

            if properties.iter().any(|(k, _)| k == key) {
                return Err(ObjectNameError::DuplicateKey(key.to_string()));
            }
            properties.push((key.to_string(), value.to_string()));

            if tail.is_empty() {
                break;
            }
            match tail.strip_prefix(',') {
                Some("") => return Err(ObjectNameError::TrailingComma),
                Some(next) => rest = next,
                None => {
                    return Err(ObjectNameError::TrailingCharacters {
                        key: key.to_string(),
                    })
                }
            }
        }

        let canonical = canonical_form(domain, &properties, property_list_pattern);

        Ok(Self {
            domain: domain.to_string(),
            properties,
            property_list_pattern,
            property_value_pattern,
            canonical,
        })
    }

    /// Domain part of the name
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Value for `key`, quoted values are returned with their quotes
    pub fn key_property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Key properties in written order
    pub fn key_properties(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Key property list in written order, without any pattern suffix
    pub fn key_property_list_string(&self) -> String {
        join_properties(self.properties.iter())
    }

    /// Key property list sorted by key, without any pattern suffix
    pub fn canonical_key_property_list_string(&self) -> String {
        join_properties(sorted(&self.properties).into_iter())
    }

    /// Domain and key-sorted properties, used for equality
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    /// True for any kind of pattern
    pub fn is_pattern(&self) -> bool {
        self.is_domain_pattern() || self.property_list_pattern || self.property_value_pattern
    }

    /// True when the domain contains a wildcard
    pub fn is_domain_pattern(&self) -> bool {
        self.domain.contains(WILDCARDS)
    }

    /// True when the property list holds a `*` entry
    pub fn is_property_list_pattern(&self) -> bool {
        self.property_list_pattern
    }

    /// True when any value contains an unescaped wildcard
    pub fn is_property_value_pattern(&self) -> bool {
        self.property_value_pattern
    }

    /// Quote `value` so it can be used as a key property value
    ///
    /// ```rust
    /// use beanwatch_core::ObjectName;
    ///
    /// assert_eq!(ObjectName::quote("a,b"), "\"a,b\"");
    /// assert_eq!(ObjectName::quote("say \"hi\""), r#""say \"hi\"""#);
    /// ```
    pub fn quote(value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for ch in value.chars() {
            match ch {
                '\n' => quoted.push_str("\\n"),
                '"' | '\\' | '*' | '?' => {
                    quoted.push('\\');
                    quoted.push(ch);
                }
                _ => quoted.push(ch),
            }
        }
        quoted.push('"');
        quoted
    }

    /// Reverse of [`ObjectName::quote`]
    pub fn unquote(quoted: &str) -> ObjectNameResult<String> {
        let inner = quoted
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .ok_or_else(|| ObjectNameError::NotQuoted(quoted.to_string()))?;

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some('n') => value.push('\n'),
                    Some(c @ ('"' | '\\' | '*' | '?')) => value.push(c),
                    Some(c) => {
                        return Err(ObjectNameError::InvalidEscape {
                            key: String::new(),
                            ch: c,
                        })
                    }
                    None => return Err(ObjectNameError::NotQuoted(quoted.to_string())),
                },
                '"' | '*' | '?' | '\n' => return Err(ObjectNameError::invalid_value("", ch)),
                _ => value.push(ch),
            }
        }
        Ok(value)
    }
}

fn validate_key(key: &str) -> ObjectNameResult<()> {
    if key.is_empty() {
        return Err(ObjectNameError::EmptyKey);
    }
    match key.chars().find(|&c| matches!(c, ':' | '*' | '?' | '\n')) {
        Some(ch) => Err(ObjectNameError::invalid_key(key, ch)),
        None => Ok(()),
    }
}

/// Returns whether the value holds a wildcard
fn validate_unquoted(value: &str, key: &str) -> ObjectNameResult<bool> {
    if value.is_empty() {
        return Err(ObjectNameError::EmptyValue {
            key: key.to_string(),
        });
    }
    let mut wildcard = false;
    for ch in value.chars() {
        match ch {
            '=' | ':' | '"' | '\n' => return Err(ObjectNameError::invalid_value(key, ch)),
            '*' | '?' => wildcard = true,
            _ => {}
        }
    }
    Ok(wildcard)
}

/// Scan a quoted value at the start of `s`.
///
/// Returns the byte length including both quotes and whether the value holds
/// an unescaped wildcard.
fn scan_quoted(s: &str, key: &str) -> ObjectNameResult<(usize, bool)> {
    let mut wildcard = false;
    let mut chars = s.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((i + 1, wildcard)),
            '\\' => match chars.next() {
                Some((_, '"' | '\\' | '*' | '?' | 'n')) => {}
                Some((_, c)) => {
                    return Err(ObjectNameError::InvalidEscape {
                        key: key.to_string(),
                        ch: c,
                    })
                }
                None => break,
            },
            '\n' => return Err(ObjectNameError::invalid_value(key, ch)),
            '*' | '?' => wildcard = true,
            _ => {}
        }
    }
    Err(ObjectNameError::UnterminatedQuote {
        key: key.to_string(),
    })
}

fn sorted(properties: &[(String, String)]) -> Vec<&(String, String)> {
    let mut sorted: Vec<_> = properties.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
}

fn join_properties<'a>(properties: impl Iterator<Item = &'a (String, String)>) -> String {
    properties
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn canonical_form(domain: &str, properties: &[(String, String)], list_pattern: bool) -> String {
    let mut canonical = format!(
        "{domain}:{}",
        join_properties(sorted(properties).into_iter())
    );
    if list_pattern {
        if !properties.is_empty() {
            canonical.push(',');
        }
        canonical.push('*');
    }
    canonical
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain, self.key_property_list_string())?;
        if self.property_list_pattern {
            if !self.properties.is_empty() {
                f.write_str(",")?;
            }
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectName {
    type Err = ObjectNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ObjectName {
    type Error = ObjectNameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialEq for ObjectName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ObjectName {}

impl Hash for ObjectName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ObjectName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ObjectName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
