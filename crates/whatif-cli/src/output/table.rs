use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format output as a table using the tabled crate.
///
/// The envelope's `result` object prints as a field/value table; the sweep
/// points array prints as a row-per-point table. Warnings and methodology
/// follow the table.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            if let Some(Value::Array(points)) = result.get("points") {
                print_rows(points);
            } else {
                print_fields(result);
            }
        }
        _ => print_fields(map),
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = map.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_fields(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}
