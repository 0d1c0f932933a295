//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{DocIndexArgs, OutputFormat};
use crate::collection::CollectionStats;
use crate::error::Result;
use crate::record::IndexRecord;

/// Result structure for index validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    pub path: String,
    pub valid: bool,
    pub records: usize,
    pub error: Option<String>,
}

/// Result structure for index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub path: String,
    pub total_records: usize,
    pub empty_text: usize,
    pub distinct_pages: usize,
    pub categories: Vec<(String, usize)>,
    pub pages: Option<Vec<(String, usize)>>,
}

impl StatsResult {
    pub fn new(path: String, stats: CollectionStats, detailed: bool) -> Self {
        StatsResult {
            path,
            total_records: stats.total_records,
            empty_text: stats.empty_text,
            distinct_pages: stats.pages.len(),
            categories: stats.categories.into_iter().collect(),
            pages: detailed.then(|| stats.pages.into_iter().collect()),
        }
    }
}

/// Result structure for listing records.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordList {
    pub matched: usize,
    pub records: Vec<IndexRecord>,
}

/// Result structure for conversions written to a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input: String,
    pub output: String,
    pub records: usize,
    pub bytes_written: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &DocIndexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Csv => output_csv(result, args),
        OutputFormat::Yaml => output_yaml(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &DocIndexArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match value.as_object() {
        Some(obj) if obj.contains_key("records") && obj["records"].is_array() => {
            output_records_human(&value, args)
        }
        Some(obj) if obj.contains_key("categories") => output_stats_human(&value, args),
        _ => output_generic_human(&value, args),
    }
}

/// Output a record list in human format.
fn output_records_human(value: &serde_json::Value, args: &DocIndexArgs) -> Result<()> {
    if let Some(records) = value.get("records").and_then(|r| r.as_array()) {
        for (i, record) in records.iter().enumerate() {
            println!(
                "{}. [{}] {} ({})",
                i + 1,
                str_field(record, "category"),
                str_field(record, "title"),
                str_field(record, "location")
            );

            let text = str_field(record, "text");
            if args.verbosity() > 1 && !text.is_empty() {
                for line in text.lines().filter(|l| !l.trim().is_empty()) {
                    println!("     {line}");
                }
            }
        }

        println!();
        let matched = value.get("matched").and_then(|m| m.as_u64()).unwrap_or(0);
        println!("Showing {} of {matched} records", records.len());
    }
    Ok(())
}

fn str_field<'a>(record: &'a serde_json::Value, name: &str) -> &'a str {
    record.get(name).and_then(|v| v.as_str()).unwrap_or("")
}

/// Output index statistics in human format.
fn output_stats_human(value: &serde_json::Value, _args: &DocIndexArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Index Statistics:");
        println!("═════════════════");

        if let Some(total) = obj.get("total_records").and_then(|t| t.as_u64()) {
            println!("Total records: {total}");
        }
        if let Some(pages) = obj.get("distinct_pages").and_then(|p| p.as_u64()) {
            println!("Pages: {pages}");
        }
        if let Some(empty) = obj.get("empty_text").and_then(|e| e.as_u64()) {
            println!("Records without text: {empty}");
        }

        for (heading, key) in [("Categories", "categories"), ("Records per page", "pages")] {
            if let Some(entries) = obj.get(key).and_then(|c| c.as_array()) {
                println!();
                println!("{heading}:");
                for entry in entries {
                    if let Some(pair) = entry.as_array()
                        && pair.len() >= 2
                    {
                        let label = pair[0].as_str().unwrap_or("unknown");
                        let count = pair[1].as_u64().unwrap_or(0);
                        println!("  {label:<30} {count}");
                    }
                }
            }
        }
    }
    Ok(())
}

/// Output generic result in human format.
fn output_generic_human(value: &serde_json::Value, _args: &DocIndexArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            if val.is_null() {
                continue;
            }
            let formatted_value = format_value(val);
            println!("{key}: {formatted_value}");
        }
    } else {
        let formatted_value = format_value(value);
        println!("{formatted_value}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &DocIndexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Output in CSV format.
fn output_csv<T: Serialize>(result: &T, _args: &DocIndexArgs) -> Result<()> {
    let value = serde_json::to_value(result)?;
    for line in csv_lines(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Render a value as CSV lines. Record lists become one row per record.
fn csv_lines(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Object(obj) if obj.get("records").is_some_and(|r| r.is_array()) => {
            csv_lines(&obj["records"])
        }
        serde_json::Value::Array(arr) => csv_table(arr),
        serde_json::Value::Object(obj) => {
            // Output single object as key-value pairs
            let mut lines = vec!["key,value".to_string()];
            lines.extend(
                obj.iter()
                    .map(|(key, value)| format!("{},{}", csv_field(key), format_csv_value(value))),
            );
            lines
        }
        _ => vec!["value".to_string(), format_csv_value(value)],
    }
}

/// One row per object. The header is the union of every object's keys in
/// first-seen order; objects lacking a column get an empty cell.
fn csv_table(items: &[serde_json::Value]) -> Vec<String> {
    let rows: Vec<_> = items.iter().filter_map(|item| item.as_object()).collect();

    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    if columns.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.iter().map(|c| csv_field(c)).collect::<Vec<_>>().join(","));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| row.get(*column).map(format_csv_value).unwrap_or_default())
            .collect();
        lines.push(cells.join(","));
    }
    lines
}

/// Output in YAML format.
fn output_yaml<T: Serialize>(result: &T, _args: &DocIndexArgs) -> Result<()> {
    let value = serde_json::to_value(result)?;
    let mut lines = Vec::new();
    yaml_lines(&value, 0, &mut lines);
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Render a value as block-style YAML.
fn yaml_lines(value: &serde_json::Value, indent: usize, lines: &mut Vec<String>) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let key = yaml_scalar(key);
                if is_nested(val) {
                    lines.push(format!("{spaces}{key}:"));
                    yaml_lines(val, indent + 1, lines);
                } else {
                    lines.push(format!("{spaces}{key}: {}", format_yaml_value(val)));
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                if is_nested(item) {
                    lines.push(format!("{spaces}  -"));
                    yaml_lines(item, indent + 2, lines);
                } else {
                    lines.push(format!("{spaces}  - {}", format_yaml_value(item)));
                }
            }
        }
        _ => lines.push(format!("{spaces}{}", format_yaml_value(value))),
    }
}

/// Non-empty objects and arrays are written as nested blocks.
fn is_nested(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(obj) => !obj.is_empty(),
        serde_json::Value::Array(arr) => !arr.is_empty(),
        _ => false,
    }
}

/// Format a JSON value for YAML output.
fn format_yaml_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => yaml_scalar(s),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Array(_) => "[]".to_string(),
        serde_json::Value::Object(_) => "{}".to_string(),
    }
}

/// A string as a YAML scalar, double-quoted when a plain scalar would be
/// read back as something else.
fn yaml_scalar(s: &str) -> String {
    if yaml_needs_quotes(s) {
        serde_json::Value::String(s.to_string()).to_string()
    } else {
        s.to_string()
    }
}

fn yaml_needs_quotes(s: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~", ".inf", ".nan",
    ];

    let Some(first) = s.chars().next() else {
        return true;
    };

    INDICATORS.contains(&first)
        || s.trim() != s
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.chars().any(char::is_control)
        || RESERVED.contains(&s.to_ascii_lowercase().as_str())
        || s.parse::<f64>().is_ok()
        || s.starts_with("0x")
        || s.starts_with("0o")
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Quote a CSV cell when it holds a separator, quote or line break.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        let escaped = s.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        s.to_string()
    }
}

/// Format a JSON value for CSV output.
fn format_csv_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => csv_field(s),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join("; ");
            format!("\"[{formatted_values}]\"")
        }
        serde_json::Value::Object(_) => "\"[object]\"".to_string(),
        serde_json::Value::Null => "".to_string(),
    }
}
