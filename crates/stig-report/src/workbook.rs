//! SpreadsheetML 2003 workbook output.
//!
//! A single-file XML workbook Excel opens natively: a Summary worksheet with
//! the level overview and family rollups, one worksheet per level, and
//! optional per-level CCI detail worksheets.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use stig_model::LevelReport;
use stig_reconcile::RunOutcome;

use crate::common::{
    DETAIL_HEADERS, LEVEL_HEADERS, OVERVIEW_HEADERS, SheetNames, cci_detail_rows, clipped,
    control_rows, overview_rows,
};

/// Spreadsheet namespace.
const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Office namespace.
const OFFICE_NS: &str = "urn:schemas-microsoft-com:office:office";

/// Excel namespace.
const EXCEL_NS: &str = "urn:schemas-microsoft-com:office:excel";

const LEVEL_WIDTHS: [f64; 6] = [90.0, 240.0, 360.0, 300.0, 72.0, 60.0];

const DETAIL_WIDTHS: [f64; 4] = [90.0, 240.0, 90.0, 480.0];

/// Options for workbook output.
#[derive(Debug, Clone, Default)]
pub struct WorkbookOptions {
    /// Also write one CCI detail worksheet per level.
    pub detailed_cci: bool,
}

/// Write the reconciliation workbook.
pub fn write_workbook(
    output_path: &Path,
    outcome: &RunOutcome,
    options: &WorkbookOptions,
) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    let writer = BufWriter::new(file);
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::PI(BytesPI::new(
        "mso-application progid=\"Excel.Sheet\"",
    )))?;

    let mut root = BytesStart::new("Workbook");
    root.push_attribute(("xmlns", SPREADSHEET_NS));
    root.push_attribute(("xmlns:o", OFFICE_NS));
    root.push_attribute(("xmlns:x", EXCEL_NS));
    root.push_attribute(("xmlns:ss", SPREADSHEET_NS));
    xml.write_event(Event::Start(root))?;

    write_document_properties(&mut xml)?;
    write_styles(&mut xml)?;

    let mut names = SheetNames::default();
    write_summary_sheet(&mut xml, &mut names, outcome)?;
    for level in &outcome.levels {
        write_level_sheet(&mut xml, &mut names, level, outcome)?;
        if options.detailed_cci {
            write_cci_detail_sheet(&mut xml, &mut names, level, outcome)?;
        }
    }

    xml.write_event(Event::End(BytesEnd::new("Workbook")))?;
    let mut writer = xml.into_inner();
    writer
        .flush()
        .with_context(|| format!("flush {}", output_path.display()))?;
    Ok(())
}

fn write_document_properties<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    let mut properties = BytesStart::new("DocumentProperties");
    properties.push_attribute(("xmlns", OFFICE_NS));
    xml.write_event(Event::Start(properties))?;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    write_text_element(xml, "Created", &timestamp)?;
    xml.write_event(Event::End(BytesEnd::new("DocumentProperties")))?;
    Ok(())
}

fn write_styles<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Styles")))?;
    write_style(xml, "Title", "16", "#000000", None)?;
    write_style(xml, "Section", "14", "#000000", None)?;
    write_style(xml, "HeaderBlue", "12", "#FFFFFF", Some("#1565C0"))?;
    write_style(xml, "SubHeaderBlue", "12", "#FFFFFF", Some("#42A5F5"))?;
    write_style(xml, "HeaderGreen", "11", "#FFFFFF", Some("#2E7D32"))?;
    write_style(xml, "HeaderPurple", "11", "#FFFFFF", Some("#7B1FA2"))?;
    xml.write_event(Event::End(BytesEnd::new("Styles")))?;
    Ok(())
}

fn write_style<W: Write>(
    xml: &mut Writer<W>,
    id: &str,
    font_size: &str,
    font_color: &str,
    interior_color: Option<&str>,
) -> Result<()> {
    let mut style = BytesStart::new("Style");
    style.push_attribute(("ss:ID", id));
    xml.write_event(Event::Start(style))?;
    let mut font = BytesStart::new("Font");
    font.push_attribute(("ss:Bold", "1"));
    font.push_attribute(("ss:Size", font_size));
    font.push_attribute(("ss:Color", font_color));
    xml.write_event(Event::Empty(font))?;
    if let Some(color) = interior_color {
        let mut interior = BytesStart::new("Interior");
        interior.push_attribute(("ss:Color", color));
        interior.push_attribute(("ss:Pattern", "Solid"));
        xml.write_event(Event::Empty(interior))?;
    }
    xml.write_event(Event::End(BytesEnd::new("Style")))?;
    Ok(())
}

fn write_summary_sheet<W: Write>(
    xml: &mut Writer<W>,
    names: &mut SheetNames,
    outcome: &RunOutcome,
) -> Result<()> {
    let name = names.claim("Summary");
    start_worksheet(xml, &name)?;

    let mut widths = vec![72.0, 270.0];
    widths.extend(std::iter::repeat_n(108.0, outcome.levels.len() + 1));
    write_columns(xml, &widths)?;

    write_label_row(xml, "Title", "STIG Control Level Summary Report")?;
    write_blank_row(xml)?;

    write_label_row(xml, "Section", "Level Overview")?;
    write_header_row(xml, "HeaderBlue", &OVERVIEW_HEADERS)?;
    for row in overview_rows(&outcome.levels) {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        write_string_cell(xml, None, clipped(row.level, 30))?;
        write_count_cell(xml, row.total_controls)?;
        write_count_cell(xml, row.total_requirements)?;
        write_number_cell(xml, row.average)?;
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }
    write_blank_row(xml)?;

    let mut family_headers = vec!["Family", "Family Name"];
    let level_names: Vec<&str> = outcome
        .breakdown
        .level_names
        .iter()
        .map(|level| clipped(level, 15))
        .collect();
    family_headers.extend(level_names);
    family_headers.push("Total");

    write_label_row(xml, "Section", "Controls by Family Across Levels")?;
    write_header_row(xml, "HeaderBlue", &family_headers)?;
    for row in &outcome.breakdown.rows {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        write_string_cell(xml, None, &row.code)?;
        write_string_cell(xml, None, &row.display_name)?;
        for count in &row.control_counts {
            write_count_cell(xml, *count)?;
        }
        write_count_cell(xml, row.total_controls)?;
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }
    write_blank_row(xml)?;

    write_label_row(xml, "Section", "CCI Count by Family Across Levels")?;
    write_header_row(xml, "SubHeaderBlue", &family_headers)?;
    for row in &outcome.breakdown.rows {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        write_string_cell(xml, None, &row.code)?;
        write_string_cell(xml, None, &row.display_name)?;
        for count in &row.requirement_counts {
            write_count_cell(xml, *count)?;
        }
        write_count_cell(xml, row.total_requirements)?;
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    end_table(xml)?;
    xml.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    Ok(())
}

fn write_level_sheet<W: Write>(
    xml: &mut Writer<W>,
    names: &mut SheetNames,
    level: &LevelReport,
    outcome: &RunOutcome,
) -> Result<()> {
    let name = names.claim(&level.name);
    start_worksheet(xml, &name)?;
    write_columns(xml, &LEVEL_WIDTHS)?;
    write_header_row(xml, "HeaderGreen", &LEVEL_HEADERS)?;

    for row in control_rows(&level.partition.current, &outcome.controls, &outcome.ccis) {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        write_string_cell(xml, None, row.id)?;
        write_string_cell(xml, None, row.name)?;
        write_string_cell(xml, None, row.text)?;
        write_string_cell(xml, None, &row.cci_numbers)?;
        write_count_cell(xml, row.cci_count)?;
        write_string_cell(xml, None, row.family)?;
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    end_table(xml)?;
    write_frozen_header(xml)?;
    xml.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    Ok(())
}

fn write_cci_detail_sheet<W: Write>(
    xml: &mut Writer<W>,
    names: &mut SheetNames,
    level: &LevelReport,
    outcome: &RunOutcome,
) -> Result<()> {
    let name = names.claim(&format!("{} CCIs", clipped(&level.name, 25)));
    start_worksheet(xml, &name)?;
    write_columns(xml, &DETAIL_WIDTHS)?;
    write_header_row(xml, "HeaderPurple", &DETAIL_HEADERS)?;

    for row in cci_detail_rows(&level.partition.current, &outcome.controls, &outcome.ccis) {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        write_string_cell(xml, None, row.id)?;
        write_string_cell(xml, None, row.name)?;
        write_string_cell(xml, None, row.number)?;
        write_string_cell(xml, None, row.description)?;
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    end_table(xml)?;
    write_frozen_header(xml)?;
    xml.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    Ok(())
}

fn start_worksheet<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", name));
    xml.write_event(Event::Start(worksheet))?;
    xml.write_event(Event::Start(BytesStart::new("Table")))?;
    Ok(())
}

fn end_table<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new("Table")))?;
    Ok(())
}

fn write_columns<W: Write>(xml: &mut Writer<W>, widths: &[f64]) -> Result<()> {
    for width in widths {
        let mut column = BytesStart::new("Column");
        column.push_attribute(("ss:AutoFitWidth", "0"));
        column.push_attribute(("ss:Width", width.to_string().as_str()));
        xml.write_event(Event::Empty(column))?;
    }
    Ok(())
}

/// Header row: every cell styled, string typed.
fn write_header_row<W: Write>(xml: &mut Writer<W>, style: &str, headers: &[&str]) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Row")))?;
    for header in headers {
        write_string_cell(xml, Some(style), header)?;
    }
    xml.write_event(Event::End(BytesEnd::new("Row")))?;
    Ok(())
}

/// Single styled cell on its own row, used for titles and section labels.
fn write_label_row<W: Write>(xml: &mut Writer<W>, style: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Row")))?;
    write_string_cell(xml, Some(style), text)?;
    xml.write_event(Event::End(BytesEnd::new("Row")))?;
    Ok(())
}

fn write_blank_row<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    xml.write_event(Event::Empty(BytesStart::new("Row")))?;
    Ok(())
}

fn write_string_cell<W: Write>(
    xml: &mut Writer<W>,
    style: Option<&str>,
    text: &str,
) -> Result<()> {
    let mut cell = BytesStart::new("Cell");
    if let Some(style) = style {
        cell.push_attribute(("ss:StyleID", style));
    }
    xml.write_event(Event::Start(cell))?;
    write_data_element(xml, "String", text)?;
    xml.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_count_cell<W: Write>(xml: &mut Writer<W>, value: usize) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Cell")))?;
    write_data_element(xml, "Number", &value.to_string())?;
    xml.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_number_cell<W: Write>(xml: &mut Writer<W>, value: f64) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Cell")))?;
    write_data_element(xml, "Number", &value.to_string())?;
    xml.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_data_element<W: Write>(xml: &mut Writer<W>, data_type: &str, text: &str) -> Result<()> {
    let mut data = BytesStart::new("Data");
    data.push_attribute(("ss:Type", data_type));
    xml.write_event(Event::Start(data))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("Data")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Freeze the header row so it stays visible while scrolling.
fn write_frozen_header<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    let mut options = BytesStart::new("WorksheetOptions");
    options.push_attribute(("xmlns", EXCEL_NS));
    xml.write_event(Event::Start(options))?;
    xml.write_event(Event::Empty(BytesStart::new("FreezePanes")))?;
    xml.write_event(Event::Empty(BytesStart::new("FrozenNoSplit")))?;
    write_text_element(xml, "SplitHorizontal", "1")?;
    write_text_element(xml, "TopRowBottomPane", "1")?;
    write_text_element(xml, "ActivePane", "2")?;
    xml.write_event(Event::End(BytesEnd::new("WorksheetOptions")))?;
    Ok(())
}
