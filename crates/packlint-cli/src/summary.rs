//! Terminal tables and the run summary.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use packlint_report::summary_line;
use packlint_validate::{RunOutcome, ValidatorRegistry};

pub fn print_outcome(outcome: &RunOutcome) {
    if !outcome.results.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("File"),
            header_cell("Code"),
            header_cell("Message"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Center);
        for result in &outcome.results {
            table.add_row(vec![
                Cell::new(result.path.display()),
                Cell::new(&result.error_code).fg(Color::Red),
                Cell::new(&result.message),
            ]);
        }
        println!("{table}");
    }
    if !outcome.contract_failures.is_empty() {
        eprintln!("Rule contract failures (these are validator bugs, not content problems):");
        for failure in &outcome.contract_failures {
            eprintln!("- [{}]: {}", failure.error_code, failure.message);
        }
    }
    println!(
        "Checked {} content items in {} packs.",
        outcome.checked_items, outcome.checked_packs
    );
    println!("{}", summary_line(outcome));
}

pub fn print_rules_table(registry: &ValidatorRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Content types"),
        header_cell("Modes"),
    ]);
    apply_table_style(&mut table);
    for validator in registry.validators() {
        let types = summarize_types(validator.content_types());
        let modes: Vec<&str> = validator
            .modes()
            .iter()
            .map(|mode| mode.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(validator.error_code())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(validator.description()),
            Cell::new(types),
            Cell::new(modes.join(", ")),
        ]);
    }
    println!("{table}");
}

/// The full item-type list is long; collapse it instead of flooding the row.
fn summarize_types(types: &[packlint_model::ContentType]) -> String {
    if types.len() > 4 {
        format!("{} types", types.len())
    } else {
        types
            .iter()
            .map(|content_type| content_type.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
