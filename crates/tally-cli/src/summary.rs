use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::TallyOutcome;

pub fn print_summary(outcome: &TallyOutcome) {
    println!(
        "Files processed: {}/{}",
        outcome.files_processed, outcome.file_count
    );
    for report in &outcome.reports {
        println!();
        println!(
            "{} ({} admitted) -> {}",
            report.alias,
            report.total,
            report.path.display()
        );
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Value"),
            header_cell("Count"),
            header_cell("Percent"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        if report.entries.is_empty() {
            table.add_row(vec![dim_cell("-"), dim_cell("-"), dim_cell("-")]);
        }
        for entry in &report.entries {
            table.add_row(vec![
                Cell::new(&entry.value),
                Cell::new(entry.count),
                Cell::new(&entry.percent),
            ]);
        }
        println!("{table}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
