//! `{placeholder}` template rendering.
//!
//! A placeholder is a brace-wrapped name made of ASCII letters, digits and
//! underscores. `{{` and `}}` render as literal braces, and brace groups that
//! do not hold a valid name (`{ "a": 1 }`) pass through unchanged.
//! Substitution is single-pass: a substituted value is never rescanned.

use crate::{Error, Result};
use compact_str::CompactString;
use std::collections::BTreeMap;

/// Name of the variable synthesized from upstream task outputs.
pub const CONTEXT: &str = "context";

/// Run-scoped variable bindings.
pub type Variables = BTreeMap<CompactString, String>;

/// Render `template`, substituting every placeholder from `vars`.
///
/// Fails with [`Error::MissingVariable`] on the first placeholder that has
/// no binding; nothing is returned for a partial render.
pub fn render(template: &str, vars: &Variables) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        match placeholder(tail) {
            Some(name) => {
                let value = vars.get(name).ok_or_else(|| Error::MissingVariable {
                    name: CompactString::from(name),
                })?;
                out.push_str(value);
                rest = &tail[name.len() + 2..];
            }
            None => {
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Distinct placeholder names referenced by `template`, in order of first
/// appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            rest = &tail[2..];
            continue;
        }

        match placeholder(tail) {
            Some(name) => {
                if !names.contains(&name) {
                    names.push(name);
                }
                rest = &tail[name.len() + 2..];
            }
            None => rest = &tail[1..],
        }
    }

    names
}

/// Parse the placeholder name at the head of `s`, which starts with a brace.
fn placeholder(s: &str) -> Option<&str> {
    let body = s.strip_prefix('{')?;
    let name = &body[..body.find('}')?];
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (CompactString::from(*k), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_every_occurrence() {
        let out = render("{topic} and {topic}", &vars(&[("topic", "Rust")])).unwrap();
        assert_eq!(out, "Rust and Rust");
    }

    #[test]
    fn missing_variable_fails() {
        let err = render("plan {topic} in {language}", &vars(&[("topic", "Rust")])).unwrap_err();
        assert!(matches!(err, Error::MissingVariable { ref name } if name == "language"));
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = render("{a}", &vars(&[("a", "{b}"), ("b", "boom")])).unwrap();
        assert_eq!(out, "{b}");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let out = render("{{topic}} is {topic}", &vars(&[("topic", "Rust")])).unwrap();
        assert_eq!(out, "{topic} is Rust");
    }

    #[test]
    fn non_name_braces_pass_through() {
        let template = r#"json: { "a": 1 } and {} and {x-y} and }"#;
        assert_eq!(render(template, &Variables::new()).unwrap(), template);
    }

    #[test]
    fn unterminated_brace_passes_through() {
        assert_eq!(render("tail {topic", &Variables::new()).unwrap(), "tail {topic");
    }

    #[test]
    fn placeholders_are_distinct_and_ordered() {
        let names = placeholders("{topic} {context} {{skip}} {topic} {language} { no }");
        assert_eq!(names, vec!["topic", "context", "language"]);
    }
}
