use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use freight_map::{ColumnMappingStatus, ConfidenceLevel};
use freight_report::Page;
use serde_json::Value;

use crate::types::{MapOutcome, ReportOutcome};

/// Number of alternatives offered per unmapped column.
const ALTERNATIVES_SHOWN: usize = 3;

pub fn print_map_summary(outcome: &MapOutcome) {
    println!("Upload: {}", outcome.upload.display());
    println!(
        "Rows: {} ({} shown)",
        outcome.preview.total_rows,
        outcome.preview.sample_rows.len()
    );
    println!("{}", preview_table(outcome));
    println!("{}", mapping_table(outcome));
    for (level, count) in outcome.session.suggestions().count_by_level() {
        println!("  {count} suggested with {}", level.description());
    }

    let summary = outcome.session.summary();
    println!(
        "Mapped {}/{} columns ({} manual), required fields {}/{}",
        summary.mapped_columns,
        summary.total_columns,
        summary.manual_columns,
        summary.required_mapped,
        summary.required_total
    );

    for header in outcome.session.headers() {
        let column = header.column_name.as_str();
        if outcome.session.status(column) != ColumnMappingStatus::Unmapped {
            continue;
        }
        let alternatives = outcome.session.alternatives(column, ALTERNATIVES_SHOWN);
        let names: Vec<&str> = alternatives.iter().map(|a| a.field.as_str()).collect();
        println!("  {} unmapped; closest fields: {}", column, names.join(", "));
    }

    if let Some(path) = &outcome.template_saved {
        println!("Template saved: {}", path.display());
    }
    if let Some(plan) = &outcome.plan {
        println!(
            "Import plan: {} (create {}, update {}, skipped {})",
            plan.path.display(),
            plan.create,
            plan.update,
            plan.skipped
        );
    }
    if outcome.has_missing() {
        eprintln!("Import blocked, required fields without a column:");
        for missing in &outcome.missing {
            eprintln!("  - {} ({})", missing.label, missing.field);
        }
    }
}

fn preview_table(outcome: &MapOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(
        outcome
            .preview
            .headers
            .iter()
            .map(|h| header_cell(&format!("{} {}", h.column_letter, h.column_name))),
    );
    apply_table_style(&mut table);
    for row in &outcome.preview.sample_rows {
        table.add_row(row);
    }
    table
}

/// Column, letter, target field, score and rule for every uploaded column.
pub fn mapping_table(outcome: &MapOutcome) -> Table {
    let session = &outcome.session;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Letter"),
        header_cell("Field"),
        header_cell("Score"),
        header_cell("Rule"),
        header_cell("Confidence"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for header in session.headers() {
        let column = header.column_name.as_str();
        let field = session.mapping().field_for(column);
        let suggested = match session.status(column) {
            ColumnMappingStatus::Suggested => session.suggestions().get(column),
            _ => None,
        };
        let (score, rule, confidence) = match (session.status(column), suggested) {
            (ColumnMappingStatus::Manual, _) => {
                (dim_cell("-"), Cell::new("manual"), dim_cell("-"))
            }
            (_, Some(found)) => (
                Cell::new(found.score),
                Cell::new(found.rule.as_str()),
                level_cell(found.level()),
            ),
            _ => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(column),
            dim_cell(&header.column_letter),
            field.map_or_else(|| dim_cell("(unmapped)"), Cell::new),
            score,
            rule,
            confidence,
        ]);
    }
    table
}

pub fn print_report(outcome: &ReportOutcome) {
    let page = &outcome.page;
    println!(
        "{} report: page {}/{}, rows {}-{} of {}",
        outcome.kind,
        page.page_number,
        page.total_pages,
        page.start_index + usize::from(!page.is_empty()),
        page.end_index,
        page.total_items
    );

    let mut table = Table::new();
    table.set_header(outcome.columns.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table);
    for row in &page.items {
        table.add_row(row);
    }
    println!("{table}");
    if let Some(hint) = page_hint(page) {
        println!("{hint}");
    }
    println!("{}", stats_table(&outcome.stats));

    if let Some((path, rows)) = &outcome.exported {
        println!("Exported {rows} row(s) to {}", path.display());
    }
}

/// Navigation hint naming the neighbouring pages, if any.
pub fn page_hint<T>(page: &Page<T>) -> Option<String> {
    let mut hints = Vec::new();
    if page.has_previous() {
        let previous = (page.page_number - 1).min(page.total_pages);
        hints.push(format!("--page {previous} for previous"));
    }
    if page.has_next() {
        hints.push(format!("--page {} for next", page.page_number + 1));
    }
    (!hints.is_empty()).then(|| hints.join(", "))
}

fn stats_table(stats: &Value) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stat"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, value) in stats_rows(stats) {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}

/// Flattens serialized stats into `name, value` rows, nested names joined
/// with `.`. Fractional numbers get two decimals.
pub fn stats_rows(stats: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_stats("", stats, &mut rows);
    rows
}

fn flatten_stats(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_stats(&name, nested, rows);
            }
        }
        Value::Number(number) => {
            let text = match (number.as_u64(), number.as_f64()) {
                (Some(whole), _) => whole.to_string(),
                (None, Some(fraction)) => format!("{fraction:.2}"),
                (None, None) => number.to_string(),
            };
            rows.push((prefix.to_string(), text));
        }
        Value::Bool(flag) => {
            let text = if *flag { "yes" } else { "no" };
            rows.push((prefix.to_string(), text.to_string()));
        }
        Value::Null => rows.push((prefix.to_string(), "-".to_string())),
        other => rows.push((prefix.to_string(), other.to_string())),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("yes").fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    match level {
        ConfidenceLevel::High => Cell::new("high").fg(Color::Green),
        ConfidenceLevel::Medium => Cell::new("medium").fg(Color::Yellow),
        ConfidenceLevel::Low => Cell::new("low").fg(Color::Red),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
