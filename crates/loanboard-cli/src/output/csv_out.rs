use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) if map.contains_key("kpis") => write_dashboard_csv(&mut wtr, value),
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Flatten the dashboard document to (section, field, value) records.
fn write_dashboard_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, doc: &Value) {
    let _ = wtr.write_record(["section", "field", "value"]);

    if let Some(Value::Object(kpis)) = doc.pointer("/kpis/result") {
        for (key, val) in kpis {
            let _ = wtr.write_record(["kpis", key.as_str(), &format_csv_value(val)]);
        }
    }

    if let Some(months) = doc
        .pointer("/monthly_trend/result/months")
        .and_then(|v| v.as_array())
    {
        for month in months {
            let _ = wtr.write_record([
                "monthly_trend",
                &field(month, "month"),
                &field(month, "loan_count"),
            ]);
        }
    }

    if let Some(dealers) = doc
        .pointer("/dealer_performance/report/result/dealers")
        .and_then(|v| v.as_array())
    {
        for dealer in dealers {
            let _ = wtr.write_record([
                "dealer_performance",
                &field(dealer, "clinic_name"),
                &field(dealer, "loan_count"),
            ]);
        }
    }

    if let Some(Value::Object(summary)) = doc.pointer("/charge_offs/summary/result") {
        for (key, val) in summary {
            let _ = wtr.write_record(["charge_offs", key.as_str(), &format_csv_value(val)]);
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn field(obj: &Value, key: &str) -> String {
    obj.get(key).map(format_csv_value).unwrap_or_default()
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
