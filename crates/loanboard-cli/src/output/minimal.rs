use serde_json::Value;

/// Print just the headline figure from the output.
///
/// Heuristic: dashboard documents reduce to the KPI result; single reports
/// use their envelope's result. Well-known fields are tried in priority
/// order, then the first scalar field wins.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| {
            m.get("kpis")
                .and_then(|kpis| kpis.get("result"))
                .or_else(|| m.get("result"))
        })
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "loan_count",
        "total_approved",
        "average_credit_score",
        "unsecured_total",
        "secured_total",
        "dated_rows",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => format!("{} item(s)", arr.len()),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
