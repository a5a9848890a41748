use anyhow::Result;
use gitcoin_api::query::validation::{
    BOUNTY_TYPES, EXPERIENCE_LEVELS, IDX_STATUSES, ORDER_BY_FIELDS, PROJECT_LENGTHS,
};
use gitcoin_api::Gitcoin;

use crate::output::{
    print_fields_csv, print_fields_markdown, print_fields_table, print_json, FieldRow,
    OutputFormat,
};

/// Allowed values for enumerated fields. Empty for free-form fields.
fn allowed_values(name: &str) -> &'static [&'static str] {
    match name {
        "experience_level" => EXPERIENCE_LEVELS,
        "project_length" => PROJECT_LENGTHS,
        "bounty_type" => BOUNTY_TYPES,
        "idx_status" => IDX_STATUSES,
        "order_by" => ORDER_BY_FIELDS,
        _ => &[],
    }
}

pub fn build_field_rows(client: &Gitcoin) -> Result<Vec<FieldRow>> {
    let endpoint = client.bounties()?;
    let schema = endpoint.schema();
    let mut rows = Vec::with_capacity(schema.len());
    for name in schema.field_names() {
        let rule = schema.get(name)?;
        rows.push(FieldRow {
            name: name.to_string(),
            multiple: (if rule.multi_valued { "yes" } else { "no" }).to_string(),
            values: allowed_values(name).join(", "),
        });
    }
    Ok(rows)
}

pub fn run(client: &Gitcoin, format: &OutputFormat) -> Result<()> {
    let rows = build_field_rows(client)?;
    match format {
        OutputFormat::Table => print_fields_table(rows),
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_fields_csv(rows)?,
        OutputFormat::Markdown => print_fields_markdown(rows),
    }
    Ok(())
}
