//! Token substitution for share text templates.
//!
//! Syntax is `{{path.to.value}}`: a dot-separated path into a nested JSON
//! context, segments restricted to alphanumerics and underscores. A lookup
//! miss at any segment yields the empty string for that token; templates
//! degrade rather than fail a resolution.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref TOKEN_RE: Regex =
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\}\}")
            .expect("token regex is valid");
}

/// Expand all `{{path}}` tokens in `template` against `data`.
///
/// Substituted values are inserted literally and never re-scanned, so a
/// value containing `{{...}}` cannot trigger another expansion.
pub fn expand(template: &str, data: &Value) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            lookup(data, &caps[1])
        })
        .into_owned()
}

/// Walk a dot-separated path; coerce the leaf to its natural string form.
fn lookup(data: &Value, path: &str) -> String {
    let mut current = data;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            // Missing key, or traversal through a non-object.
            None => return String::new(),
        }
    }
    coerce(current)
}

fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_substitution() {
        let data = json!({"entity": {"name": "Bageshwar"}});
        assert_eq!(expand("{{entity.name}} awaits!", &data), "Bageshwar awaits!");
    }

    #[test]
    fn test_missing_path_yields_empty() {
        assert_eq!(expand("{{a.b}}", &json!({"a": {}})), "");
        assert_eq!(expand("{{a.b}}", &json!({})), "");
    }

    #[test]
    fn test_traversal_through_scalar_yields_empty() {
        assert_eq!(expand("{{a.b.c}}", &json!({"a": {"b": 5}})), "");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(expand("{{a.b}}", &json!({"a": {"b": 5}})), "5");
        assert_eq!(expand("{{a.b}}", &json!({"a": {"b": 1.5}})), "1.5");
    }

    #[test]
    fn test_bool_and_null_coercion() {
        assert_eq!(expand("{{a}}", &json!({"a": true})), "true");
        assert_eq!(expand("{{a}}", &json!({"a": null})), "");
    }

    #[test]
    fn test_object_and_array_coerce_to_empty() {
        assert_eq!(expand("{{a}}", &json!({"a": {"b": 1}})), "");
        assert_eq!(expand("{{a}}", &json!({"a": [1, 2]})), "");
    }

    #[test]
    fn test_no_recursive_expansion() {
        let data = json!({"a": "{{b}}", "b": "secret"});
        assert_eq!(expand("{{a}}", &data), "{{b}}");
    }

    #[test]
    fn test_multiple_tokens_and_whitespace() {
        let data = json!({"site": {"name": "Site"}, "entity": {"name": "Bageshwar"}});
        assert_eq!(
            expand("{{ entity.name }} on {{site.name}}", &data),
            "Bageshwar on Site"
        );
    }

    #[test]
    fn test_malformed_tokens_left_alone() {
        let data = json!({"a": "x"});
        assert_eq!(expand("{{a", &data), "{{a");
        assert_eq!(expand("{{a b}}", &data), "{{a b}}");
        assert_eq!(expand("{{}}", &data), "{{}}");
    }

    #[test]
    fn test_template_without_tokens() {
        assert_eq!(expand("plain text", &json!({})), "plain text");
    }
}
