//! Default property values for previewing a component in isolation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprig_meta::InputMetadata;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").expect("integer pattern"));
static FLOAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").expect("float pattern"));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DevProps {
    pub props: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<BTreeMap<String, BTreeMap<String, Value>>>,
}

/// Read a `<stem>.props.json` sidecar. A `props` field that is not an
/// object is replaced by an empty one, and scenarios that are not objects
/// are dropped (leaving `None` when none remain); invalid JSON is an error.
pub fn load_dev_props_file(json: &str) -> Result<DevProps, serde_json::Error> {
    let root: Value = serde_json::from_str(json)?;
    let props = match root.get("props") {
        Some(Value::Object(map)) => map.clone().into_iter().collect(),
        None => BTreeMap::new(),
        Some(other) => {
            tracing::warn!("dev props `props` must be an object, found {other}; using no props");
            BTreeMap::new()
        }
    };
    let scenarios = match root.get("scenarios") {
        Some(Value::Object(map)) => {
            let valid: BTreeMap<_, _> = map
                .iter()
                .filter_map(|(name, v)| match v {
                    Value::Object(values) => Some((name.clone(), values.clone().into_iter().collect())),
                    _ => {
                        tracing::warn!(scenario = %name, "dev props scenario is not an object; skipped");
                        None
                    }
                })
                .collect();
            Some(valid).filter(|v| !v.is_empty())
        }
        Some(other) => {
            tracing::warn!("dev props `scenarios` must be an object, found {other}; ignored");
            None
        }
        None => None,
    };
    Ok(DevProps { props, scenarios })
}

/// Merge decorator defaults with an optional sidecar; sidecar values win.
pub fn resolve_dev_props(inputs: &[InputMetadata], file: Option<&DevProps>) -> DevProps {
    let mut props = BTreeMap::new();
    for input in inputs {
        let value = file
            .and_then(|f| f.props.get(&input.name))
            .cloned()
            .or_else(|| input.default_value.as_deref().map(parse_default))
            .unwrap_or_else(|| placeholder(&input.name, &input.type_text));
        props.insert(input.name.clone(), value);
    }
    // sidecar props that match no input are kept
    if let Some(f) = file {
        for (k, v) in &f.props {
            props.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    DevProps {
        props,
        scenarios: file.and_then(|f| f.scenarios.clone()),
    }
}

/// Interpret default-value source text as a JSON value.
pub fn parse_default(raw: &str) -> Value {
    let s = raw.trim();
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if INTEGER.is_match(s) {
        if let Ok(n) = s.parse::<i64>() {
            return Value::from(n);
        }
    }
    if FLOAT.is_match(s) {
        if let Ok(n) = s.parse::<f64>() {
            return Value::from(n);
        }
    }
    if s.len() >= 2 {
        let (first, last) = (s.as_bytes()[0], s.as_bytes()[s.len() - 1]);
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return Value::String(s[1..s.len() - 1].to_string());
        }
    }
    if s.starts_with('[') || s.starts_with('{') {
        if let Ok(v) = serde_json::from_str(s) {
            return v;
        }
    }
    Value::String(s.to_string())
}

/// A stand-in value for an input with neither a default nor a sidecar value.
pub fn placeholder(name: &str, type_text: &str) -> Value {
    match type_text.replace(' ', "").as_str() {
        "string" => Value::String(format!("Sample {name}")),
        "number" => Value::from(42),
        "boolean" => Value::Bool(true),
        "string[]" | "Array<string>" => Value::from(vec!["Sample 1", "Sample 2", "Sample 3"]),
        "number[]" | "Array<number>" => Value::from(vec![1, 2, 3]),
        _ => Value::String(format!("[{name}]")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_text_parsing() {
        assert_eq!(parse_default("25"), json!(25));
        assert_eq!(parse_default("-1.5"), json!(-1.5));
        assert_eq!(parse_default("'hi'"), json!("hi"));
        assert_eq!(parse_default("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_default("['a']"), json!("['a']"));
        assert_eq!(parse_default("new Date()"), json!("new Date()"));
        assert_eq!(parse_default("null"), Value::Null);
    }

    #[test]
    fn placeholders_by_type() {
        assert_eq!(placeholder("title", "string"), json!("Sample title"));
        assert_eq!(placeholder("n", "number"), json!(42));
        assert_eq!(placeholder("xs", "number[]"), json!([1, 2, 3]));
        assert_eq!(placeholder("user", "User"), json!("[user]"));
    }

    #[test]
    fn malformed_sidecar_sections_are_dropped() {
        let dp = load_dev_props_file(r#"{"props": [1], "scenarios": {"a": 1}}"#).unwrap();
        assert!(dp.props.is_empty());
        assert_eq!(dp.scenarios, None);

        let dp = load_dev_props_file(r#"{"props": {"n": 2}, "scenarios": {"bad": "x", "wide": {"n": 9}}}"#).unwrap();
        assert_eq!(dp.props["n"], json!(2));
        let scenarios = dp.scenarios.unwrap();
        assert_eq!(scenarios.keys().collect::<Vec<_>>(), vec!["wide"]);
        assert_eq!(scenarios["wide"]["n"], json!(9));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(load_dev_props_file("{ props: ").is_err());
    }
}
