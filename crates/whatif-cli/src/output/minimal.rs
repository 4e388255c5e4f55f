use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// searching one level of nesting, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["net_worth_delta", "score", "level", "net_worth"];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(found) = lookup(map, key) {
                println!("{}", format_minimal(found));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

/// Find a non-null key at the top level or inside one nested object.
fn lookup<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(val) = map.get(key) {
        if !val.is_null() {
            return Some(val);
        }
    }
    for nested in map.values() {
        if let Value::Object(inner) = nested {
            if let Some(val) = inner.get(key) {
                if !val.is_null() {
                    return Some(val);
                }
            }
        }
    }
    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
