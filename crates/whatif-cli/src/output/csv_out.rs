use serde_json::Value;
use std::io;

use super::format_value;

/// Write output as CSV to stdout. Sweep points become one row per point;
/// everything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(points)) = map.get("points") {
                write_rows(&mut wtr, points);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([&format_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
