//! Console summary of a generation run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use stig_model::{ControlId, LevelReport};

use crate::commands::GenerateResult;

/// Longest level name carried into a breakdown column header.
const LEVEL_HEADER_LIMIT: usize = 15;

pub fn print_summary(result: &GenerateResult) {
    let report = &result.report;
    println!("Revision: {}", report.revision);
    println!(
        "Catalog: {} controls, {} with CCI mappings",
        report.catalog_entries, report.mapped_controls
    );
    println!("Output: {}", result.output_dir.display());
    for path in &result.written {
        println!("- {}", path.display());
    }

    print_overview_table(report.levels.as_slice());
    print_breakdown_table(result);
    print_findings(result);
}

fn print_overview_table(levels: &[LevelReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Controls"),
        header_cell("Legacy"),
        header_cell("CCIs"),
        header_cell("Avg CCIs/Control"),
    ]);
    apply_overview_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_controls = 0usize;
    let mut total_legacy = 0usize;
    let mut total_requirements = 0usize;
    for level in levels {
        total_controls += level.stats.total_controls;
        total_legacy += level.partition.legacy.len();
        total_requirements += level.stats.total_requirements;
        table.add_row(vec![
            level_cell(&level.name),
            Cell::new(level.stats.total_controls),
            legacy_cell(level.partition.legacy.len()),
            Cell::new(level.stats.total_requirements),
            Cell::new(format!("{:.2}", level.stats.average_requirements())),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_controls).add_attribute(Attribute::Bold),
        legacy_cell(total_legacy).add_attribute(Attribute::Bold),
        Cell::new(total_requirements).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!();
    println!("{table}");
}

fn print_breakdown_table(result: &GenerateResult) {
    let breakdown = &result.report.family_breakdown;
    if breakdown.is_empty() {
        return;
    }
    let mut table = Table::new();
    let mut headers = vec![header_cell("Family"), header_cell("Name")];
    for name in &breakdown.level_names {
        headers.push(header_cell(clipped(name, LEVEL_HEADER_LIMIT)));
    }
    headers.push(header_cell("Controls"));
    headers.push(header_cell("CCIs"));
    let columns = headers.len();
    table.set_header(headers);
    apply_table_style(&mut table);
    for index in 2..columns {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for row in &breakdown.rows {
        let mut cells = vec![
            Cell::new(&row.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.display_name),
        ];
        for count in &row.control_counts {
            cells.push(count_cell(*count));
        }
        cells.push(Cell::new(row.total_controls).add_attribute(Attribute::Bold));
        cells.push(Cell::new(row.total_requirements).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    println!();
    println!("Controls by family:");
    println!("{table}");
}

/// Non-fatal findings accumulated over the full pass.
fn print_findings(result: &GenerateResult) {
    let levels = &result.report.levels;
    print_level_listing(
        "Withdrawn controls (legacy revision only):",
        levels,
        |level| &level.partition.legacy,
    );
    print_level_listing("Controls with no recognizable family:", levels, |level| {
        &level.stats.unknown_family_controls
    });
    print_level_listing("Controls missing from the catalog:", levels, |level| {
        &level.stats.not_in_catalog
    });
    if !result.suspects.is_empty() {
        println!();
        println!("Suspect identifiers in the source datasets:");
        println!("- {}", joined(&result.suspects));
    }
}

fn print_level_listing<'a>(
    title: &str,
    levels: &'a [LevelReport],
    select: impl Fn(&'a LevelReport) -> &'a [ControlId],
) {
    let listed: Vec<(&str, &[ControlId])> = levels
        .iter()
        .map(|level| (level.name.as_str(), select(level)))
        .filter(|(_, ids)| !ids.is_empty())
        .collect();
    if listed.is_empty() {
        return;
    }
    println!();
    println!("{title}");
    for (name, ids) in listed {
        println!("- {name}: {}", joined(ids));
    }
}

fn joined(ids: &[ControlId]) -> String {
    ids.iter()
        .map(ControlId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_overview_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn legacy_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell<T: ToString>(label: T) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// First `max_chars` characters of `text`, on a char boundary.
fn clipped(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
