//! Path rewrite rules.
//!
//! A rule is a `{from, to}` pair: `from` is a regular expression source and `to`
//! a replacement string using JavaScript's `String.prototype.replace`
//! conventions (`$1`, `$&`, `` $` ``, `$'`, `$<name>`, `$$`). Rules form an
//! ordered list folded over the input: each rule sees the previous rule's
//! output, and only the first match of each rule is replaced.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
    has_named_groups: bool,
}

impl RewriteRule {
    pub fn new(index: usize, from: &str, to: &str) -> Result<Self> {
        let pattern =
            Regex::new(from).map_err(|e| Error::rewrite_invalid_regex(index, from, e))?;
        let has_named_groups = pattern.capture_names().flatten().next().is_some();

        Ok(Self {
            pattern,
            replacement: to.to_string(),
            has_named_groups,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace the first match of this rule in `input`. No match leaves it unchanged.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace(input, |caps: &Captures<'_>| {
                expand(&self.replacement, caps, input, self.has_named_groups)
            })
            .into_owned()
    }
}

/// Fold `rules` over `input` left to right.
pub fn apply_all(rules: &[RewriteRule], input: &str) -> String {
    rules.iter().fold(input.to_string(), |acc, rule| {
        let next = rule.apply(&acc);
        if next != acc {
            crate::log_status!("rewrite", "'{}' -> '{}' ({})", acc, next, rule.pattern());
        }
        next
    })
}

/// Parse `replacePath` input.
///
/// Accepts the JSON-encoded string form (`"[{\"from\":..,\"to\":..}]"`) as
/// well as an already-decoded JSON array. `None` and `null` mean no rules.
pub fn parse_rules(input: Option<&Value>) -> Result<Vec<RewriteRule>> {
    match input {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(encoded)) => parse_rules_str(encoded),
        Some(value @ Value::Array(_)) => rules_from_value(value),
        Some(other) => Err(Error::rewrite_malformed_input(
            "replacePath must be a JSON array or a JSON-encoded string",
            None,
            Some(other.to_string()),
        )),
    }
}

/// Parse a JSON-encoded rule list.
pub fn parse_rules_str(encoded: &str) -> Result<Vec<RewriteRule>> {
    let value: Value = serde_json::from_str(encoded).map_err(|e| {
        Error::rewrite_malformed_input(
            format!("replacePath is not valid JSON: {}", e),
            None,
            Some(encoded.chars().take(200).collect()),
        )
    })?;

    rules_from_value(&value)
}

fn rules_from_value(value: &Value) -> Result<Vec<RewriteRule>> {
    let Some(entries) = value.as_array() else {
        return Err(Error::rewrite_malformed_input(
            "replacePath must be a JSON array",
            None,
            Some(value.to_string()),
        ));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let from = string_field(entry, "from", index)?;
            let to = string_field(entry, "to", index)?;
            RewriteRule::new(index, from, to)
        })
        .collect()
}

fn string_field<'a>(entry: &'a Value, key: &str, index: usize) -> Result<&'a str> {
    entry.get(key).and_then(Value::as_str).ok_or_else(|| {
        Error::rewrite_malformed_input(
            format!("entry is missing a string '{}'", key),
            Some(index),
            Some(entry.to_string()),
        )
    })
}

fn expand(template: &str, caps: &Captures<'_>, haystack: &str, named: bool) -> String {
    let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    let groups = caps.len() - 1;

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let consumed = match after.as_bytes().first().copied() {
            Some(b'$') => {
                out.push('$');
                1
            }
            Some(b'&') => {
                out.push_str(&haystack[start..end]);
                1
            }
            Some(b'`') => {
                out.push_str(&haystack[..start]);
                1
            }
            Some(b'\'') => {
                out.push_str(&haystack[end..]);
                1
            }
            Some(b'<') if named => match after.find('>') {
                Some(close) => {
                    out.push_str(caps.name(&after[1..close]).map_or("", |m| m.as_str()));
                    close + 1
                }
                None => {
                    out.push('$');
                    0
                }
            },
            Some(b) if b.is_ascii_digit() => {
                match group_reference(after.as_bytes(), groups) {
                    Some((index, len)) => {
                        out.push_str(caps.get(index).map_or("", |m| m.as_str()));
                        len
                    }
                    None => {
                        out.push('$');
                        0
                    }
                }
            }
            _ => {
                out.push('$');
                0
            }
        };

        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Resolve `$n` / `$nn`. Two digits win only when that group exists.
fn group_reference(digits: &[u8], groups: usize) -> Option<(usize, usize)> {
    let first = usize::from(digits[0] - b'0');

    if let Some(second) = digits.get(1).filter(|b| b.is_ascii_digit()) {
        let two = first * 10 + usize::from(second - b'0');
        if (1..=groups).contains(&two) {
            return Some((two, 2));
        }
    }

    (1..=groups).contains(&first).then_some((first, 1))
}
