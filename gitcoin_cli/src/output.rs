use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct BountyRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    pk: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    bounty_type: String,
    #[tabled(rename = "Level")]
    #[serde(rename = "Level")]
    experience_level: String,
    #[tabled(rename = "Length")]
    #[serde(rename = "Length")]
    project_length: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "Issue")]
    #[serde(rename = "Issue")]
    github_url: String,
}

#[derive(Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    pub name: String,
    #[tabled(rename = "Multiple")]
    #[serde(rename = "Multiple")]
    pub multiple: String,
    #[tabled(rename = "Values")]
    #[serde(rename = "Values")]
    pub values: String,
}

// -- Row builders --

/// Accepts a list, a paginated object with `results`, or a single bounty.
fn bounty_items(resp: &Value) -> Vec<&Value> {
    match resp {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => match obj.get("results") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![resp],
        },
        _ => Vec::new(),
    }
}

fn build_bounty_rows(resp: &Value) -> Vec<BountyRow> {
    bounty_items(resp)
        .into_iter()
        .map(|b| BountyRow {
            pk: text(&b["pk"]),
            title: text(&b["title"]),
            bounty_type: text(&b["bounty_type"]),
            experience_level: text(&b["experience_level"]),
            project_length: text(&b["project_length"]),
            status: text(&b["status"]),
            value: format_usd(&b["value_in_usdt"]),
            github_url: text(&b["github_url"]),
        })
        .collect()
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_usd(value: &Value) -> String {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(amount) => format!("${:.2}", amount),
        None => String::new(),
    }
}

// -- Table output --

pub fn print_bounties_table(resp: &Value) {
    println!("{}", Table::new(build_bounty_rows(resp)));
}

pub fn print_fields_table(rows: Vec<FieldRow>) {
    println!("{}", Table::new(rows));
}

// -- Markdown output --

pub fn print_bounties_markdown(resp: &Value) {
    let mut table = Table::new(build_bounty_rows(resp));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_fields_markdown(rows: Vec<FieldRow>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

fn write_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_bounties_csv(resp: &Value) -> Result<()> {
    write_csv(build_bounty_rows(resp))
}

pub fn print_fields_csv(rows: Vec<FieldRow>) -> Result<()> {
    write_csv(rows)
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
