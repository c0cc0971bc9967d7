//! Cypher literal rendering for query parameters.
//!
//! FalkorDB takes parameters as a `CYPHER name=value ...` prefix in front of
//! the statement text, so JSON values have to be written out as Cypher
//! literals: strings quoted and escaped, arrays as `[...]`, objects as
//! `{key: value}` maps.

use serde_json::Value;

use crate::error::{Error, Result};

/// Renders one JSON value as a Cypher literal.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", key(k), literal(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Double-quoted string with backslash escapes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Prefixes `statement` with the `CYPHER` parameter header.
///
/// # Errors
///
/// [`Error::Store`] when `params` is not an object (or null) or a parameter
/// name is not a plain identifier.
pub fn with_params(statement: &str, params: &Value) -> Result<String> {
    let map = match params {
        Value::Null => return Ok(statement.to_string()),
        Value::Object(map) if map.is_empty() => return Ok(statement.to_string()),
        Value::Object(map) => map,
        other => {
            return Err(Error::Store(format!(
                "query parameters must be an object, got {other}"
            )));
        }
    };

    let mut header = String::from("CYPHER");
    for (name, value) in map {
        if !is_identifier(name) {
            return Err(Error::Store(format!("invalid parameter name '{name}'")));
        }
        header.push(' ');
        header.push_str(name);
        header.push('=');
        header.push_str(&literal(value));
    }
    Ok(format!("{header} {statement}"))
}
