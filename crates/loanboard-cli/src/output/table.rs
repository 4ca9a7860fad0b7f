use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render the dashboard document or a single-report envelope as tables.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("kpis") => print_dashboard(value),
        Value::Object(map) if map.contains_key("result") => print_report(map),
        Value::Object(_) => print_flat_object(value),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_dashboard(doc: &Value) {
    // Three labeled metric displays
    if let Some(kpis) = doc.pointer("/kpis/result") {
        println!("{}", "Key Loan Metrics".bold());
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Total Loans", &field(kpis, "loan_count")]);
        builder.push_record(["Total Approved Amount ($)", &field(kpis, "total_approved")]);
        builder.push_record(["Average Credit Score", &field(kpis, "average_credit_score")]);
        println!("{}", Table::from(builder));
    }

    if let Some(months) = doc
        .pointer("/monthly_trend/result/months")
        .and_then(|v| v.as_array())
    {
        println!("\n{}", "Loan Volume Over Time".bold());
        print_array_table(months);
    }

    if let Some(dealers) = doc
        .pointer("/dealer_performance/report/result/dealers")
        .and_then(|v| v.as_array())
    {
        let shown = doc
            .pointer("/dealer_performance/shown")
            .and_then(|v| v.as_u64())
            .unwrap_or(dealers.len() as u64);
        println!("\n{}", format!("Top {} Dealers by Loan Volume", shown).bold());
        print_array_table(dealers);
    }

    // Two-row charge-off summary table
    if let Some(summary) = doc.pointer("/charge_offs/summary/result") {
        println!("\n{}", "Total Charge-Off Amounts".bold());
        let mut builder = Builder::default();
        builder.push_record(["Category", "Amount ($)"]);
        builder.push_record(["Unsecured Gross Charge-Offs", &field(summary, "unsecured_total")]);
        builder.push_record(["Secured Gross Charge-Offs", &field(summary, "secured_total")]);
        println!("{}", Table::from(builder));
    }

    if let Some(Value::Array(advisories)) = doc.get("advisories") {
        if !advisories.is_empty() {
            println!("\n{}", "Advisories".yellow().bold());
            for advisory in advisories {
                if let Value::String(s) = advisory {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::Array(charts)) = doc.get("charts") {
        for chart in charts {
            if let Value::String(path) = chart {
                println!("\nChart written: {}", path);
            }
        }
    }
}

fn print_report(envelope: &serde_json::Map<String, Value>) {
    match envelope.get("result") {
        Some(Value::Object(result)) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in result {
                match val {
                    Value::Array(arr) => {
                        builder.push_record([key.as_str(), &format!("{} row(s)", arr.len())]);
                    }
                    other => {
                        builder.push_record([key.as_str(), &format_value(other)]);
                    }
                }
            }
            println!("{}", Table::from(builder));

            // Nested tables (trend months, dealer rows) print after scalars
            for (key, val) in result {
                if let Value::Array(arr) = val {
                    if !arr.is_empty() {
                        println!("\n{}", key.bold());
                        print_array_table(arr);
                    }
                }
            }
        }
        Some(other) => println!("{}", format_value(other)),
        None => {}
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(String::as_str));

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn field(obj: &Value, key: &str) -> String {
    obj.get(key).map(format_value).unwrap_or_else(|| "n/a".to_string())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
